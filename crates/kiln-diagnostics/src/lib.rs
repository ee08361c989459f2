//! Error taxonomy and diagnostics rendering shared across the compiler
//! pipeline.

pub mod analysis_error;
pub mod compile_error;
pub mod diagnostic;
pub mod emit_error;
pub mod parse_error;
pub mod resolve_error;

pub use analysis_error::AnalysisError;
pub use compile_error::CompileError;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use emit_error::EmitError;
pub use parse_error::ParseError;
pub use resolve_error::ResolveError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_errors_render_sorted_by_offset() {
        let errors = vec![
            AnalysisError::UndefinedReference {
                namespace: kiln_ast::Namespace::Buffer,
                name: "b".to_string(),
                reference_token: 20,
                node: kiln_ast::NodeIndex(2),
            },
            AnalysisError::UndefinedReference {
                namespace: kiln_ast::Namespace::Buffer,
                name: "a".to_string(),
                reference_token: 5,
                node: kiln_ast::NodeIndex(1),
            },
        ];
        let diagnostics = Diagnostics::from_analysis_errors(&errors);
        assert_eq!(diagnostics.0[0].offset, Some(5));
        assert_eq!(diagnostics.0[1].offset, Some(20));
    }

    #[test]
    fn diagnostics_display_renders_kind_message_and_node() {
        let errors = vec![AnalysisError::UndefinedReference {
            namespace: kiln_ast::Namespace::Buffer,
            name: "ghost".to_string(),
            reference_token: 5,
            node: kiln_ast::NodeIndex(3),
        }];
        let diagnostics = Diagnostics::from_analysis_errors(&errors);
        let rendered = diagnostics.to_string();
        assert_eq!(
            rendered,
            "error[undefined_reference]: `ghost` is not defined in the Buffer namespace (node 3)"
        );
    }

    #[test]
    fn compile_error_from_resolve_wraps_via_from() {
        let resolve_error = ResolveError::FileTooLarge {
            path: "shader.wgsl".into(),
            size: 99,
        };
        let compile_error: CompileError = resolve_error.into();
        assert!(matches!(compile_error, CompileError::Resolve(_)));
    }
}
