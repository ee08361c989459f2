//! Pass 1: collect every top-level declaration into its namespace's
//! symbol table, flagging duplicate names.

use kiln_ast::{token_text, Ast, Namespace, NodeIndex, SymbolInfo, SymbolTable, Token};
use kiln_diagnostics::AnalysisError;

pub fn run(
    ast: &Ast,
    tokens: &[Token],
    source: &str,
    errors: &mut Vec<AnalysisError>,
) -> SymbolTable {
    let mut symbols = SymbolTable::new();

    for decl in ast.children_of(NodeIndex::ROOT) {
        let tag = ast.tag_of(decl);
        let Some(namespace) = Namespace::from_macro_tag(tag) else {
            continue;
        };
        let name_token = ast.main_token_of(decl);
        let name = std::str::from_utf8(token_text(tokens, name_token as usize, source.as_bytes()))
            .expect("source is valid utf-8");

        let info = SymbolInfo {
            node: decl,
            name_token,
        };
        if let Some(prior) = symbols.declare(namespace, name, info) {
            errors.push(AnalysisError::DuplicateDefinition {
                namespace,
                name: name.to_string(),
                first_token: prior.name_token,
                redeclaration_token: name_token,
                node: decl,
            });
        }
    }

    symbols
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Ast, Vec<Token>) {
        let tokens = kiln_lexer::lex(source).unwrap();
        (kiln_parser::parse(source).unwrap(), tokens)
    }

    #[test]
    fn declares_each_namespace_member() {
        let (ast, tokens) = parse("#buffer a {} #texture b {}");
        let mut errors = Vec::new();
        let symbols = run(&ast, &tokens, "#buffer a {} #texture b {}", &mut errors);
        assert!(errors.is_empty());
        assert!(symbols.contains(Namespace::Buffer, "a"));
        assert!(symbols.contains(Namespace::Texture, "b"));
    }

    #[test]
    fn flags_duplicate_definitions_in_the_same_namespace() {
        let source = "#buffer a {} #buffer a {}";
        let (ast, tokens) = parse(source);
        let mut errors = Vec::new();
        run(&ast, &tokens, source, &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AnalysisError::DuplicateDefinition { .. }));
    }
}
