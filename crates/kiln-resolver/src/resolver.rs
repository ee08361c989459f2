//! Pre-parse textual inlining of `#import "path"` directives.
//!
//! Import detection is line-oriented and deliberately naive: a line is an
//! import directive if, after trimming leading ASCII whitespace, its first
//! [`LINE_SCAN_BUDGET`] bytes start with `#import `. No tokenizer runs at
//! this stage, so a `#import` appearing inside a string or comment on its
//! own line is still treated as a directive — the DSL has no block
//! comments that could span a directive line, so this has never mattered
//! in practice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use kiln_diagnostics::ResolveError;
use tracing::instrument;

use crate::file_loader::FileLoader;
use crate::normalize::{normalize, resolve_relative};

const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;
const MAX_DEPTH: u32 = 64;
const LINE_SCAN_BUDGET: usize = 4096;

/// Inlines `entry` and everything it transitively imports into one string,
/// in deterministic left-to-right depth-first order. Each distinct path is
/// inlined at most once, at its first occurrence.
#[instrument(skip(loader))]
pub fn resolve(entry: &Path, loader: &dyn FileLoader) -> Result<String, ResolveError> {
    let mut state = ResolveState {
        included: HashSet::new(),
        in_progress: Vec::new(),
        output: String::new(),
    };
    let normalized_entry = normalize(entry);
    resolve_into(&normalized_entry, loader, &mut state, 0)?;
    Ok(state.output)
}

struct ResolveState {
    included: HashSet<PathBuf>,
    in_progress: Vec<PathBuf>,
    output: String,
}

fn resolve_into(
    path: &Path,
    loader: &dyn FileLoader,
    state: &mut ResolveState,
    depth: u32,
) -> Result<(), ResolveError> {
    if depth > MAX_DEPTH {
        return Err(ResolveError::DepthExceeded {
            path: path.to_path_buf(),
        });
    }

    if state.in_progress.contains(&path.to_path_buf()) {
        let mut cycle = state.in_progress.clone();
        cycle.push(path.to_path_buf());
        return Err(ResolveError::ImportCycle(cycle));
    }

    if state.included.contains(path) {
        return Ok(());
    }

    let content = loader.read(path).map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if content.len() as u64 > MAX_FILE_SIZE {
        return Err(ResolveError::FileTooLarge {
            path: path.to_path_buf(),
            size: content.len() as u64,
        });
    }

    state.included.insert(path.to_path_buf());
    state.in_progress.push(path.to_path_buf());

    for line in content.lines() {
        match detect_import(line) {
            Some(target) => {
                let resolved = resolve_relative(path, &target);
                resolve_into(&resolved, loader, state, depth + 1)?;
            }
            None => {
                state.output.push_str(line);
                state.output.push('\n');
            }
        }
    }

    state.in_progress.pop();
    Ok(())
}

/// Returns the quoted path of an `#import "path"` directive, if `line` is
/// one.
fn detect_import(line: &str) -> Option<String> {
    let scan_end = line
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= LINE_SCAN_BUDGET)
        .last()
        .unwrap_or(0);
    let scanned = &line[..scan_end];
    let trimmed = scanned.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let rest = trimmed.strip_prefix("#import")?;
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_loader::MapFileLoader;

    #[test]
    fn inlines_a_single_import_depth_first() {
        let loader = MapFileLoader::new()
            .with_file("main.kiln", "#import \"common.kiln\"\n#buffer foo {}\n")
            .with_file("common.kiln", "#wgsl shared {}\n");
        let output = resolve(Path::new("main.kiln"), &loader).unwrap();
        assert_eq!(output, "#wgsl shared {}\n#buffer foo {}\n");
    }

    #[test]
    fn includes_each_distinct_path_only_once() {
        let loader = MapFileLoader::new()
            .with_file(
                "main.kiln",
                "#import \"common.kiln\"\n#import \"common.kiln\"\n#buffer foo {}\n",
            )
            .with_file("common.kiln", "#wgsl shared {}\n");
        let output = resolve(Path::new("main.kiln"), &loader).unwrap();
        assert_eq!(output, "#wgsl shared {}\n#buffer foo {}\n");
    }

    #[test]
    fn detects_direct_cycle() {
        let loader = MapFileLoader::new()
            .with_file("a.kiln", "#import \"b.kiln\"\n")
            .with_file("b.kiln", "#import \"a.kiln\"\n");
        let err = resolve(Path::new("a.kiln"), &loader).unwrap_err();
        assert!(matches!(err, ResolveError::ImportCycle(_)));
    }

    #[test]
    fn rejects_files_over_the_size_bound() {
        let huge = "x".repeat(MAX_FILE_SIZE as usize + 1);
        let loader = MapFileLoader::new().with_file("big.kiln", huge);
        let err = resolve(Path::new("big.kiln"), &loader).unwrap_err();
        assert!(matches!(err, ResolveError::FileTooLarge { .. }));
    }

    #[test]
    fn non_import_lines_pass_through_unchanged() {
        let loader = MapFileLoader::new().with_file("main.kiln", "#buffer foo {}\n");
        let output = resolve(Path::new("main.kiln"), &loader).unwrap();
        assert_eq!(output, "#buffer foo {}\n");
    }
}
