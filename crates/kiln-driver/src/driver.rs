//! The single entry point tying every stage together.

use std::path::Path;

use kiln_diagnostics::{CompileError, ResolveError};
use kiln_resolver::FileLoader;
use tracing::instrument;

use crate::emitter::{EmitContext, Emitter, PNGB_MAGIC};
use crate::options::CompileOptions;
use crate::plugins::{self, PluginSet};

/// Resolves (optionally), lexes, parses, analyzes, and emits `entry_path`
/// through `loader`/`emitter`, discarding the plugin set
/// [`compile_with_plugins`] also computes.
///
/// Returns `CompileError::Analysis` holding every accumulated
/// [`kiln_diagnostics::AnalysisError`] if semantic analysis found any;
/// every earlier stage is fatal on its first error instead, since there is
/// no well-formed intermediate value to keep going from.
pub fn compile(
    entry_path: &Path,
    loader: &dyn FileLoader,
    emitter: &dyn Emitter,
    options: &CompileOptions,
) -> Result<Vec<u8>, CompileError> {
    compile_with_plugins(entry_path, loader, emitter, options).map(|(buffer, _plugins)| buffer)
}

/// Same pipeline as [`compile`], additionally returning the [`PluginSet`]
/// detected from the populated declaration namespaces. Selected by setting
/// `options.detect_plugins`, though this function computes the set
/// unconditionally — the flag exists for callers to forward their own
/// intent to an `Emitter`, not to gate the computation itself.
#[instrument(skip(loader, emitter, options))]
pub fn compile_with_plugins(
    entry_path: &Path,
    loader: &dyn FileLoader,
    emitter: &dyn Emitter,
    options: &CompileOptions,
) -> Result<(Vec<u8>, PluginSet), CompileError> {
    let entry_path = match &options.base_dir {
        Some(base_dir) => base_dir.join(entry_path),
        None => entry_path.to_path_buf(),
    };
    let entry_path = entry_path.as_path();

    let source = if options.resolve_imports {
        kiln_resolver::resolve(entry_path, loader)?
    } else {
        loader
            .read(entry_path)
            .map_err(|source| ResolveError::Io {
                path: entry_path.to_path_buf(),
                source,
            })?
    };

    let tokens = kiln_lexer::lex(&source)?;
    let ast = kiln_parser::parse(&source)?;
    let analysis = kiln_analyzer::analyze(&ast, &tokens, &source);

    if !analysis.is_ok() {
        return Err(CompileError::Analysis(analysis.errors));
    }

    let detected_plugins = plugins::detect(&analysis.symbols);
    let ctx = EmitContext {
        minify_shaders: options.minify_shaders,
        plugins: detected_plugins,
    };

    let buffer = emitter.emit(&ast, &tokens, &source, &analysis, &ctx)?;
    debug_assert!(
        buffer.starts_with(PNGB_MAGIC),
        "emitter produced a buffer that does not start with the PNGB magic"
    );
    Ok((buffer, detected_plugins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::StubEmitter;
    use kiln_resolver::MapFileLoader;

    #[test]
    fn compiles_a_clean_program_to_a_pngb_buffer() {
        let loader = MapFileLoader::new().with_file(
            "main.kiln",
            "#wgsl vs { value = \"fn main() {}\" } #buffer b { size = 4 }",
        );
        let buffer = compile(
            Path::new("main.kiln"),
            &loader,
            &StubEmitter,
            &CompileOptions::new(),
        )
        .unwrap();
        assert!(buffer.starts_with(PNGB_MAGIC));
    }

    #[test]
    fn compiles_through_import_resolution_when_enabled() {
        let loader = MapFileLoader::new()
            .with_file("main.kiln", "#import \"common.kiln\"\n#buffer b { size = 4 }\n")
            .with_file("common.kiln", "#wgsl vs { value = \"fn main() {}\" }\n");
        let buffer = compile(
            Path::new("main.kiln"),
            &loader,
            &StubEmitter,
            &CompileOptions::with_base_dir("."),
        )
        .unwrap();
        assert!(buffer.starts_with(PNGB_MAGIC));
    }

    #[test]
    fn analysis_errors_surface_as_a_batch() {
        let loader =
            MapFileLoader::new().with_file("main.kiln", "#bind_group bg { target = $buffer.missing }");
        let err = compile(
            Path::new("main.kiln"),
            &loader,
            &StubEmitter,
            &CompileOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Analysis(_)));
    }

    #[test]
    fn parse_errors_are_fatal_immediately() {
        let loader = MapFileLoader::new().with_file("main.kiln", "#nope foo {}");
        let err = compile(
            Path::new("main.kiln"),
            &loader,
            &StubEmitter,
            &CompileOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn compile_with_plugins_detects_render_capability() {
        let loader = MapFileLoader::new().with_file(
            "main.kiln",
            "#render_pipeline rp { vertex = vs } #wgsl vs { value = \"\" }",
        );
        let (buffer, plugins) = compile_with_plugins(
            Path::new("main.kiln"),
            &loader,
            &StubEmitter,
            &CompileOptions::new(),
        )
        .unwrap();
        assert!(buffer.starts_with(PNGB_MAGIC));
        assert!(plugins.render);
        assert!(!plugins.compute);
    }
}
