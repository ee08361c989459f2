//! Host-facing rendering of compiler errors.
//!
//! This layer turns the typed error enums into plain data a host
//! application can format however it likes; it never prints anything
//! itself.

use crate::analysis_error::AnalysisError;
use crate::compile_error::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// A stable tag identifying the kind of problem, e.g.
    /// `"duplicate_definition"` or `"parse_error"`.
    pub kind: &'static str,
    pub message: String,
    /// Byte offset of the most relevant token, when one is known.
    pub offset: Option<u32>,
    /// The AST node the problem was raised against, when analysis got far
    /// enough to have one. `None` for resolver/lexer/parser-stage errors,
    /// which fail before an AST exists.
    pub node: Option<u32>,
}

impl Diagnostic {
    pub fn error(kind: &'static str, message: String, offset: Option<u32>, node: Option<u32>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message,
            offset,
            node,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.kind, self.message)?;
        if let Some(node) = self.node {
            write!(f, " (node {node})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Renders a batch of accumulated analysis errors, offset-sorted so a
    /// host can display them in source order.
    pub fn from_analysis_errors(errors: &[AnalysisError]) -> Self {
        let mut diagnostics: Vec<Diagnostic> = errors
            .iter()
            .map(|err| {
                let offset = match err {
                    AnalysisError::DuplicateDefinition {
                        redeclaration_token,
                        ..
                    } => Some(*redeclaration_token),
                    AnalysisError::UndefinedReference {
                        reference_token, ..
                    } => Some(*reference_token),
                    AnalysisError::InvalidReferenceNamespace {
                        reference_token, ..
                    } => Some(*reference_token),
                    AnalysisError::CircularDependency { .. } => None,
                };
                Diagnostic::error(err.kind(), err.to_string(), offset, Some(err.node().0))
            })
            .collect();
        diagnostics.sort_by_key(|d| d.offset.unwrap_or(u32::MAX));
        Diagnostics(diagnostics)
    }

    /// Renders any fatal `CompileError` as a single-element diagnostics
    /// batch, so hosts can funnel both fatal and non-fatal failures through
    /// one display path.
    pub fn from_compile_error(error: &CompileError) -> Self {
        match error {
            CompileError::Analysis(errors) => Self::from_analysis_errors(errors),
            CompileError::Parse(parse_error) => Diagnostics(vec![Diagnostic::error(
                "parse_error",
                parse_error.to_string(),
                Some(parse_error.offset()),
                None,
            )]),
            CompileError::Resolve(resolve_error) => Diagnostics(vec![Diagnostic::error(
                "resolve_error",
                resolve_error.to_string(),
                None,
                None,
            )]),
            CompileError::Emit(emit_error) => Diagnostics(vec![Diagnostic::error(
                "emit_error",
                emit_error.to_string(),
                None,
                None,
            )]),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
