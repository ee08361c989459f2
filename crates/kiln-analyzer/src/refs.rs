//! Shared traversal for every value position that can hold a reference:
//! explicit `$ns.name`, `$ns.name.field`, and bare names resolved against
//! the property key they're assigned to.

use kiln_ast::{token_text, Ast, Namespace, NodeIndex, NodeTag, Token};

/// A single reference use found while walking a declaration body.
pub struct ReferenceUse<'a> {
    pub node: NodeIndex,
    /// `Some` for `$ns.name`, `None` for a bare identifier whose namespace
    /// is only implied by `contextual_namespace`.
    pub namespace_text: Option<&'a str>,
    pub name: &'a str,
    pub name_token: u32,
    /// The namespace implied by the enclosing property's key, when that
    /// key happens to name one. Used to resolve bare-name values.
    pub contextual_namespace: Option<Namespace>,
}

/// Walks every property in `root` recursively (through nested objects and
/// arrays), invoking `visit` for each reference-shaped value encountered.
pub fn for_each_reference<'a>(
    ast: &'a Ast,
    tokens: &[Token],
    source: &'a str,
    root: NodeIndex,
    visit: &mut impl FnMut(ReferenceUse<'a>),
) {
    match ast.tag_of(root) {
        NodeTag::Object => {
            for child in ast.children_of(root) {
                walk_property(ast, tokens, source, child, visit);
            }
        }
        other if other.is_macro_declaration() => {
            if let Some(body) = ast.data_of(root).as_node() {
                for_each_reference(ast, tokens, source, body, visit);
            }
        }
        _ => {}
    }
}

fn walk_property<'a>(
    ast: &'a Ast,
    tokens: &[Token],
    source: &'a str,
    property: NodeIndex,
    visit: &mut impl FnMut(ReferenceUse<'a>),
) {
    let key_token = ast.main_token_of(property) as usize;
    let key_text = token_str(tokens, source, key_token);
    let contextual_namespace = Namespace::from_str(key_text);
    let value = ast
        .data_of(property)
        .as_node()
        .expect("property data is always a Node");
    walk_value(ast, tokens, source, value, contextual_namespace, visit);
}

fn walk_value<'a>(
    ast: &'a Ast,
    tokens: &[Token],
    source: &'a str,
    value: NodeIndex,
    contextual_namespace: Option<Namespace>,
    visit: &mut impl FnMut(ReferenceUse<'a>),
) {
    match ast.tag_of(value) {
        NodeTag::Reference | NodeTag::UniformAccess => {
            let (ns_token, name_token) = ast
                .data_of(value)
                .as_token_pair()
                .expect("reference data is always a token pair");
            visit(ReferenceUse {
                node: value,
                namespace_text: Some(token_str(tokens, source, ns_token as usize)),
                name: token_str(tokens, source, name_token as usize),
                name_token,
                contextual_namespace,
            });
        }
        NodeTag::Identifier => {
            let token = ast.main_token_of(value);
            visit(ReferenceUse {
                node: value,
                namespace_text: None,
                name: token_str(tokens, source, token as usize),
                name_token: token,
                contextual_namespace,
            });
        }
        NodeTag::Array => {
            for element in ast.children_of(value) {
                walk_value(ast, tokens, source, element, contextual_namespace, visit);
            }
        }
        NodeTag::Object => {
            for property in ast.children_of(value) {
                walk_property(ast, tokens, source, property, visit);
            }
        }
        _ => {}
    }
}

fn token_str<'a>(tokens: &[Token], source: &'a str, token_index: usize) -> &'a str {
    let bytes = token_text(tokens, token_index, source.as_bytes());
    std::str::from_utf8(bytes).expect("source is valid utf-8, token spans do not split chars")
}
