//! Pass 2: resolve every `$ns.name` reference and bare-name value against
//! the symbol table built in pass 1.

use kiln_ast::{Ast, Namespace, NodeIndex, SymbolTable, Token};
use kiln_diagnostics::AnalysisError;

use crate::refs::for_each_reference;

pub fn run(
    ast: &Ast,
    tokens: &[Token],
    source: &str,
    symbols: &SymbolTable,
    errors: &mut Vec<AnalysisError>,
) {
    for decl in ast.children_of(NodeIndex::ROOT) {
        for_each_reference(ast, tokens, source, decl, &mut |reference| {
            match reference.namespace_text {
                Some(namespace_text) => match Namespace::from_str(namespace_text) {
                    Some(namespace) => {
                        if !symbols.contains(namespace, reference.name) {
                            errors.push(AnalysisError::UndefinedReference {
                                namespace,
                                name: reference.name.to_string(),
                                reference_token: reference.name_token,
                                node: reference.node,
                            });
                        }
                    }
                    None => errors.push(AnalysisError::InvalidReferenceNamespace {
                        namespace_text: namespace_text.to_string(),
                        reference_token: reference.name_token,
                        node: reference.node,
                    }),
                },
                None => {
                    if let Some(namespace) = reference.contextual_namespace {
                        if !symbols.contains(namespace, reference.name) {
                            errors.push(AnalysisError::UndefinedReference {
                                namespace,
                                name: reference.name.to_string(),
                                reference_token: reference.name_token,
                                node: reference.node,
                            });
                        }
                    }
                }
            }
        });
    }
}
