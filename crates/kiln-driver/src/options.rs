//! The driver's typed configuration surface.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options controlling a single [`crate::compile`] call.
///
/// `resolve_imports` defaults to `false` so a caller who hands `compile` an
/// already-inlined source string (e.g. a test fixture) doesn't pay for a
/// filesystem walk it doesn't need. [`CompileOptions::with_base_dir`] flips
/// it to `true`, since giving a base directory only makes sense when you
/// want `#import` directives followed from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileOptions {
    pub base_dir: Option<PathBuf>,
    /// The entry file's path relative to `base_dir`, consulted by
    /// [`CompileOptions::resolved_entry_path`]; callers driving
    /// [`crate::compile`] with their own explicit path can ignore it.
    pub source_path: String,
    pub resolve_imports: bool,
    /// Forwarded to the [`crate::Emitter`] as-is; the core pipeline never
    /// reads it.
    pub minify_shaders: bool,
    /// Selects [`crate::compile_with_plugins`]'s behavior at the call site;
    /// `compile_with_plugins` always computes the plugin set regardless, so
    /// this mainly documents caller intent and is forwarded to the emitter
    /// alongside `minify_shaders`.
    pub detect_plugins: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            base_dir: None,
            source_path: "main".to_string(),
            resolve_imports: false,
            minify_shaders: false,
            detect_plugins: false,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            resolve_imports: true,
            ..Self::default()
        }
    }

    /// `base_dir.join(source_path)`, or a bare `source_path` when no
    /// `base_dir` is set. Lets a caller that only has `CompileOptions`
    /// (loaded from its own config, say) derive an entry path without
    /// separately tracking one.
    pub fn resolved_entry_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(base_dir) => base_dir.join(&self.source_path),
            None => PathBuf::from(&self.source_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_do_not_resolve_imports() {
        let options = CompileOptions::default();
        assert!(!options.resolve_imports);
        assert_eq!(options.source_path, "main");
        assert!(!options.minify_shaders);
        assert!(!options.detect_plugins);
    }

    #[test]
    fn with_base_dir_enables_import_resolution() {
        let options = CompileOptions::with_base_dir("/shaders");
        assert!(options.resolve_imports);
        assert_eq!(options.base_dir, Some(PathBuf::from("/shaders")));
    }

    #[test]
    fn resolved_entry_path_joins_base_dir_and_source_path() {
        let options = CompileOptions::with_base_dir("/shaders");
        assert_eq!(options.resolved_entry_path(), PathBuf::from("/shaders/main"));
    }

    #[test]
    fn resolved_entry_path_is_bare_source_path_without_a_base_dir() {
        let options = CompileOptions::new();
        assert_eq!(options.resolved_entry_path(), PathBuf::from("main"));
    }
}
