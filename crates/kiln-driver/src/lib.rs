//! The compiler driver: `compile()` and its configuration and output seams.

mod driver;
mod emitter;
mod options;
mod plugins;

pub use driver::{compile, compile_with_plugins};
pub use emitter::{EmitContext, Emitter, PNGB_MAGIC};
#[cfg(any(test, feature = "stub-emitter"))]
pub use emitter::StubEmitter;
pub use options::CompileOptions;
pub use plugins::PluginSet;

pub use kiln_analyzer::AnalysisResult;
pub use kiln_diagnostics::{AnalysisError, CompileError, Diagnostic, Diagnostics, Severity};
pub use kiln_resolver::{FileLoader, MapFileLoader, StdFileLoader};
