//! Disjoint boolean capability detection for [`crate::compile_with_plugins`].

use kiln_ast::{Namespace, SymbolTable};
use serde::{Deserialize, Serialize};

/// Which capability categories a compiled program touches, inferred from
/// which declaration namespaces came out of analysis non-empty. A program
/// with both a `render_pipeline` and a `compute_pipeline` sets both
/// `render` and `compute`; nothing here is mutually exclusive despite the
/// name "disjoint" referring to the booleans being independently set, not
/// to the programs being restricted to one each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSet {
    pub render: bool,
    pub compute: bool,
    pub animation: bool,
    pub texture: bool,
    pub wasm: bool,
}

/// `shader_module` is the only namespace in this DSL that names a
/// non-WGSL code module; a host capable of executing WebAssembly is the
/// one that cares whether it's populated.
pub fn detect(symbols: &SymbolTable) -> PluginSet {
    PluginSet {
        render: populated(symbols, Namespace::RenderPipeline)
            || populated(symbols, Namespace::RenderPass),
        compute: populated(symbols, Namespace::ComputePipeline)
            || populated(symbols, Namespace::ComputePass),
        animation: populated(symbols, Namespace::Frame),
        texture: populated(symbols, Namespace::Texture) || populated(symbols, Namespace::Sampler),
        wasm: populated(symbols, Namespace::ShaderModule),
    }
}

fn populated(symbols: &SymbolTable, namespace: Namespace) -> bool {
    symbols.names_in(namespace).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_ast::SymbolInfo;

    fn symbols_with(entries: &[(Namespace, &str)]) -> SymbolTable {
        let mut symbols = SymbolTable::new();
        for &(namespace, name) in entries {
            symbols.declare(
                namespace,
                name,
                SymbolInfo {
                    node: kiln_ast::NodeIndex(0),
                    name_token: 0,
                },
            );
        }
        symbols
    }

    #[test]
    fn empty_program_has_no_capabilities() {
        let set = detect(&symbols_with(&[]));
        assert_eq!(set, PluginSet::default());
    }

    #[test]
    fn render_pipeline_sets_only_render() {
        let set = detect(&symbols_with(&[(Namespace::RenderPipeline, "p")]));
        assert!(set.render);
        assert!(!set.compute);
    }

    #[test]
    fn render_and_compute_pipelines_set_both_independently() {
        let set = detect(&symbols_with(&[
            (Namespace::RenderPipeline, "p"),
            (Namespace::ComputePipeline, "c"),
        ]));
        assert!(set.render);
        assert!(set.compute);
        assert!(!set.animation);
    }

    #[test]
    fn frame_declaration_sets_animation() {
        let set = detect(&symbols_with(&[(Namespace::Frame, "main")]));
        assert!(set.animation);
    }

    #[test]
    fn shader_module_sets_wasm() {
        let set = detect(&symbols_with(&[(Namespace::ShaderModule, "m")]));
        assert!(set.wasm);
    }
}
