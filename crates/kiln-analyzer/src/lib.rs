//! Four-pass semantic analysis: declaration collection, reference
//! resolution, import-cycle detection, and shader dedup.

mod pass1;
mod pass2;
mod pass3;
mod pass4;
mod props;
mod refs;

use std::collections::HashMap;

use kiln_ast::{Ast, NodeIndex, ShaderFragment, SymbolTable, Token};
use kiln_diagnostics::AnalysisError;
use tracing::instrument;

pub struct AnalysisResult {
    pub symbols: SymbolTable,
    pub errors: Vec<AnalysisError>,
    pub shader_fragments: Vec<ShaderFragment>,
    pub shader_data_ids: HashMap<NodeIndex, u16>,
}

impl AnalysisResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs all four passes over `ast`/`tokens` (the resolved source they were
/// built from is `source`). Every pass's errors accumulate into one batch;
/// a duplicate-definition error in pass 1 does not stop pass 2 from also
/// reporting any undefined references it finds.
#[instrument(skip(ast, tokens, source))]
pub fn analyze(ast: &Ast, tokens: &[Token], source: &str) -> AnalysisResult {
    let mut errors = Vec::new();

    let symbols = pass1::run(ast, tokens, source, &mut errors);
    pass2::run(ast, tokens, source, &symbols, &mut errors);
    let shader_dependencies = pass3::run(ast, tokens, source, &symbols, &mut errors);
    let shader_table = pass4::run(ast, tokens, source, &shader_dependencies);

    AnalysisResult {
        symbols,
        errors,
        shader_fragments: shader_table.fragments,
        shader_data_ids: shader_table.data_id_by_node,
    }
}
