//! Small helpers for pulling a named property's value out of a
//! declaration's object body, used by passes that care about one specific
//! property rather than every reference in the tree (pass 3's `imports`,
//! pass 4's `value`).

use kiln_ast::{token_text, Ast, NodeIndex, NodeTag, Token};

/// Finds the value node of the property named `key` directly inside
/// `object` (an `Object`-tagged node), if one exists.
pub fn find_property_value(
    ast: &Ast,
    tokens: &[Token],
    source: &str,
    object: NodeIndex,
    key: &str,
) -> Option<NodeIndex> {
    ast.children_of(object).find_map(|property| {
        let key_token = ast.main_token_of(property) as usize;
        let text = token_str(tokens, source, key_token);
        if text == key {
            ast.data_of(property).as_node()
        } else {
            None
        }
    })
}

/// Reads a `StringValue` node's literal text with its surrounding quotes
/// stripped. Panics if `node` is not a `StringValue`, since callers only
/// reach here after checking the tag.
pub fn string_literal_text<'a>(ast: &Ast, tokens: &[Token], source: &'a str, node: NodeIndex) -> &'a str {
    assert_eq!(ast.tag_of(node), NodeTag::StringValue, "not a string value node");
    let token = ast.main_token_of(node) as usize;
    let text = token_str(tokens, source, token);
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

fn token_str<'a>(tokens: &[Token], source: &'a str, token_index: usize) -> &'a str {
    let bytes = token_text(tokens, token_index, source.as_bytes());
    std::str::from_utf8(bytes).expect("source is valid utf-8, token spans do not split chars")
}
