//! Compiler for the Kiln GPU-resource DSL: DSL source to `PNGB` bytecode.
//!
//! This crate re-exports [`kiln_driver`]'s public surface so embedders
//! depend on one crate instead of the seven-crate pipeline it's built
//! from.

pub use kiln_driver::{
    compile, compile_with_plugins, AnalysisError, AnalysisResult, CompileError, CompileOptions,
    Diagnostic, Diagnostics, EmitContext, Emitter, FileLoader, MapFileLoader, PluginSet, Severity,
    StdFileLoader, PNGB_MAGIC,
};
#[cfg(any(test, feature = "stub-emitter"))]
pub use kiln_driver::StubEmitter;

pub mod prelude {
    pub use crate::{
        compile, CompileError, CompileOptions, Diagnostics, Emitter, FileLoader, StdFileLoader,
    };
}
