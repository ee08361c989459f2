//! Errors raised while inlining `#import` directives.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("import cycle: {}", format_cycle(.0))]
    ImportCycle(Vec<PathBuf>),

    #[error("{path} is {size} bytes, exceeding the 16 MiB import limit")]
    FileTooLarge { path: PathBuf, size: u64 },

    #[error("import depth exceeded 64 while resolving {path}")]
    DepthExceeded { path: PathBuf },
}

fn format_cycle(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
