//! Pass 4: content-hash dedup of shader source, assigning each distinct
//! body a monotonic `u16` `data_id` in first-occurrence order.
//!
//! Shader source lives in a `#wgsl` declaration's `value` string property;
//! a declaration without one contributes no fragment (pass 2 already flags
//! any dangling reference to it, this pass just has nothing to hash).

use std::collections::HashMap;

use kiln_ast::{Ast, NodeIndex, NodeTag, ShaderFragment, Token};

use crate::props::{find_property_value, string_literal_text};

pub struct ShaderTable {
    pub fragments: Vec<ShaderFragment>,
    pub data_id_by_node: HashMap<NodeIndex, u16>,
}

pub fn run(
    ast: &Ast,
    tokens: &[Token],
    source: &str,
    dependencies: &HashMap<NodeIndex, Vec<NodeIndex>>,
) -> ShaderTable {
    let mut fragments: Vec<ShaderFragment> = Vec::new();
    let mut id_by_hash: HashMap<u64, u16> = HashMap::new();
    let mut data_id_by_node = HashMap::new();

    for decl in ast.children_of(NodeIndex::ROOT) {
        if ast.tag_of(decl) != NodeTag::MacroWgsl {
            continue;
        }
        let body = ast
            .data_of(decl)
            .as_node()
            .expect("wgsl decl data is always a Node pointing at its object body");
        let Some(value_node) = find_property_value(ast, tokens, source, body, "value") else {
            continue;
        };
        if ast.tag_of(value_node) != NodeTag::StringValue {
            continue;
        }
        let content = string_literal_text(ast, tokens, source, value_node).to_string();

        let mut fragment = ShaderFragment::new(decl, content);
        fragment.dependencies = dependencies.get(&decl).cloned().unwrap_or_default();
        let data_id = match id_by_hash.get(&fragment.content_hash) {
            Some(&id) => id,
            None => {
                let id = fragments.len() as u16;
                id_by_hash.insert(fragment.content_hash, id);
                fragment.data_id = Some(id);
                fragments.push(fragment);
                id
            }
        };
        data_id_by_node.insert(decl, data_id);
    }

    ShaderTable {
        fragments,
        data_id_by_node,
    }
}
