//! Non-fatal semantic errors accumulated across the four analyzer passes.
//!
//! These never abort the pass that raised them; the driver collects every
//! one into a `Vec` and hands the whole batch to the caller once analysis
//! finishes, so a source file with three unrelated typos gets three
//! diagnostics in one run instead of three separate compiles.

use kiln_ast::{Namespace, NodeIndex};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("`{name}` is already defined in the {namespace:?} namespace")]
    DuplicateDefinition {
        namespace: Namespace,
        name: String,
        first_token: u32,
        redeclaration_token: u32,
        node: NodeIndex,
    },

    #[error("`{name}` is not defined in the {namespace:?} namespace")]
    UndefinedReference {
        namespace: Namespace,
        name: String,
        reference_token: u32,
        node: NodeIndex,
    },

    #[error("`{namespace_text}` is not a valid reference namespace")]
    InvalidReferenceNamespace {
        namespace_text: String,
        reference_token: u32,
        node: NodeIndex,
    },

    #[error("circular dependency detected: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String>, node: NodeIndex },
}

impl AnalysisError {
    /// A stable, lowercase tag for each variant, used by [`crate::Diagnostic::kind`].
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::DuplicateDefinition { .. } => "duplicate_definition",
            AnalysisError::UndefinedReference { .. } => "undefined_reference",
            AnalysisError::InvalidReferenceNamespace { .. } => "invalid_reference_namespace",
            AnalysisError::CircularDependency { .. } => "circular_dependency",
        }
    }

    pub fn node(&self) -> NodeIndex {
        match self {
            AnalysisError::DuplicateDefinition { node, .. }
            | AnalysisError::UndefinedReference { node, .. }
            | AnalysisError::InvalidReferenceNamespace { node, .. }
            | AnalysisError::CircularDependency { node, .. } => *node,
        }
    }
}
