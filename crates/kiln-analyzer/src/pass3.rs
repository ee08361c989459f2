//! Pass 3: build the shader import graph from each `#wgsl` declaration's
//! `imports` property, then walk it iteratively for cycles.
//!
//! Unlike pass 2's general reference walk, this graph has edges only
//! between shader declarations: a `#bind_group` referencing a `#buffer` is
//! not an import and never contributes an edge here, no matter how many
//! other declarations point at each other.

use std::collections::{HashMap, HashSet};

use kiln_ast::{token_text, Ast, DependencyGraph, Namespace, NodeIndex, NodeTag, SymbolTable, Token};
use kiln_diagnostics::AnalysisError;

use crate::props::find_property_value;

/// Runs cycle detection over the shader import graph and returns it keyed
/// by declaration node, so pass 4 can record each fragment's dependencies
/// without re-parsing the `imports` property.
pub fn run(
    ast: &Ast,
    tokens: &[Token],
    source: &str,
    symbols: &SymbolTable,
    errors: &mut Vec<AnalysisError>,
) -> HashMap<NodeIndex, Vec<NodeIndex>> {
    let dependencies = collect_imports(ast, tokens, source, symbols);
    let graph = build_graph(&dependencies);

    let shader_decls: Vec<NodeIndex> = ast
        .children_of(NodeIndex::ROOT)
        .filter(|&decl| ast.tag_of(decl) == NodeTag::MacroWgsl)
        .collect();

    let mut reported: HashSet<Vec<NodeIndex>> = HashSet::new();
    for &decl in &shader_decls {
        if let Some(cycle) = graph.detect_cycle_from(decl) {
            let mut signature = cycle.clone();
            signature.sort();
            if reported.insert(signature) {
                let names = cycle
                    .iter()
                    .map(|&node| declaration_name(ast, tokens, source, node))
                    .collect();
                errors.push(AnalysisError::CircularDependency { cycle: names, node: decl });
            }
        }
    }

    dependencies
}

/// For every `#wgsl` declaration, resolves its `imports` array (if any)
/// against the shader namespace. An import that doesn't resolve is left
/// out here; pass 2 already reported it as an undefined reference.
fn collect_imports(
    ast: &Ast,
    tokens: &[Token],
    source: &str,
    symbols: &SymbolTable,
) -> HashMap<NodeIndex, Vec<NodeIndex>> {
    let mut dependencies = HashMap::new();

    for decl in ast.children_of(NodeIndex::ROOT) {
        if ast.tag_of(decl) != NodeTag::MacroWgsl {
            continue;
        }
        let body = ast
            .data_of(decl)
            .as_node()
            .expect("wgsl decl data is always a Node pointing at its object body");
        let Some(imports) = find_property_value(ast, tokens, source, body, "imports") else {
            continue;
        };
        if ast.tag_of(imports) != NodeTag::Array {
            continue;
        }

        let mut targets = Vec::new();
        for element in ast.children_of(imports) {
            if let Some(target) = resolve_import_element(ast, tokens, source, symbols, element) {
                targets.push(target);
            }
        }
        dependencies.insert(decl, targets);
    }

    dependencies
}

fn resolve_import_element(
    ast: &Ast,
    tokens: &[Token],
    source: &str,
    symbols: &SymbolTable,
    element: NodeIndex,
) -> Option<NodeIndex> {
    match ast.tag_of(element) {
        NodeTag::Reference | NodeTag::UniformAccess => {
            let (ns_token, name_token) = ast
                .data_of(element)
                .as_token_pair()
                .expect("reference data is always a token pair");
            let namespace = Namespace::from_str(token_str(tokens, source, ns_token as usize))?;
            let name = token_str(tokens, source, name_token as usize);
            symbols.lookup(namespace, name).map(|info| info.node)
        }
        // A bare name inside `imports` always means another shader: there
        // is no other namespace this property could plausibly mean.
        NodeTag::Identifier => {
            let name = token_str(tokens, source, ast.main_token_of(element) as usize);
            symbols.lookup(Namespace::Wgsl, name).map(|info| info.node)
        }
        _ => None,
    }
}

fn build_graph(dependencies: &HashMap<NodeIndex, Vec<NodeIndex>>) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (&from, targets) in dependencies {
        for &to in targets {
            graph.add_edge(from, to);
        }
    }
    graph
}

fn declaration_name(ast: &Ast, tokens: &[Token], source: &str, node: NodeIndex) -> String {
    let token = ast.main_token_of(node) as usize;
    token_str(tokens, source, token).to_string()
}

fn token_str<'a>(tokens: &[Token], source: &'a str, token_index: usize) -> &'a str {
    let bytes = token_text(tokens, token_index, source.as_bytes());
    std::str::from_utf8(bytes).expect("source is valid utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> Vec<AnalysisError> {
        let tokens = kiln_lexer::lex(source).unwrap();
        let ast = kiln_parser::parse(source).unwrap();
        let mut errors = Vec::new();
        let symbols = crate::pass1::run(&ast, &tokens, source, &mut errors);
        run(&ast, &tokens, source, &symbols, &mut errors);
        errors
    }

    #[test]
    fn acyclic_imports_report_nothing() {
        let errors = analyze(
            "#wgsl a { value = \"\" } #wgsl b { imports = [$wgsl.a] value = \"\" }",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn mutual_imports_are_a_circular_dependency() {
        let source = "#wgsl a { imports = [$wgsl.b] value = \"\" } \
                       #wgsl b { imports = [$wgsl.a] value = \"\" }";
        let errors = analyze(source);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AnalysisError::CircularDependency { .. }));
    }

    #[test]
    fn self_import_is_a_circular_dependency() {
        let source = "#wgsl a { imports = [$wgsl.a] value = \"\" }";
        let errors = analyze(source);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AnalysisError::CircularDependency { .. }));
    }

    #[test]
    fn non_shader_reference_cycles_are_not_flagged_here() {
        let source = "#bind_group a { other = $bind_group.b } #bind_group b { other = $bind_group.a }";
        let errors = analyze(source);
        assert!(errors.is_empty(), "pass 3 only tracks shader imports");
    }
}
