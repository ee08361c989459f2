//! The top-level error returned by `kiln_driver::compile`.
//!
//! Stage errors compose in via `#[from]`; the accumulated `AnalysisError`s
//! get their own fatal variant since analysis reports a batch, not a single
//! failure.

use crate::analysis_error::AnalysisError;
use crate::emit_error::EmitError;
use crate::parse_error::ParseError;
use crate::resolve_error::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("import resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{} analysis error(s) found", .0.len())]
    Analysis(Vec<AnalysisError>),

    #[error("emit failed: {0}")]
    Emit(#[from] EmitError),
}
