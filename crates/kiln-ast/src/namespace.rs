//! The closed set of declaration namespaces, plus the `pipeline`/`pass`
//! aliases from the reference grammar.

use crate::ast::NodeTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Wgsl,
    Buffer,
    Texture,
    Sampler,
    BindGroup,
    BindGroupLayout,
    PipelineLayout,
    RenderPipeline,
    ComputePipeline,
    RenderPass,
    ComputePass,
    Frame,
    ShaderModule,
    Data,
    Define,
}

impl Namespace {
    /// Parses a namespace string from `$ns.name` references or bare-name
    /// context tags, including the `pipeline` and `pass` aliases.
    ///
    /// Per the reference grammar, compute variants have no such alias;
    /// this is mirrored exactly rather than "fixed".
    pub fn from_str(s: &str) -> Option<Namespace> {
        Some(match s {
            "wgsl" => Namespace::Wgsl,
            "buffer" => Namespace::Buffer,
            "texture" => Namespace::Texture,
            "sampler" => Namespace::Sampler,
            "bind_group" => Namespace::BindGroup,
            "bind_group_layout" => Namespace::BindGroupLayout,
            "pipeline_layout" => Namespace::PipelineLayout,
            "render_pipeline" => Namespace::RenderPipeline,
            "compute_pipeline" => Namespace::ComputePipeline,
            "render_pass" => Namespace::RenderPass,
            "compute_pass" => Namespace::ComputePass,
            "frame" => Namespace::Frame,
            "shader_module" => Namespace::ShaderModule,
            "data" => Namespace::Data,
            "define" => Namespace::Define,
            "pipeline" => Namespace::RenderPipeline,
            "pass" => Namespace::RenderPass,
            _ => return None,
        })
    }

    /// Maps a macro declaration's node tag to the namespace it declares into.
    pub fn from_macro_tag(tag: NodeTag) -> Option<Namespace> {
        Some(match tag {
            NodeTag::MacroWgsl => Namespace::Wgsl,
            NodeTag::MacroBuffer => Namespace::Buffer,
            NodeTag::MacroTexture => Namespace::Texture,
            NodeTag::MacroSampler => Namespace::Sampler,
            NodeTag::MacroBindGroup => Namespace::BindGroup,
            NodeTag::MacroBindGroupLayout => Namespace::BindGroupLayout,
            NodeTag::MacroPipelineLayout => Namespace::PipelineLayout,
            NodeTag::MacroRenderPipeline => Namespace::RenderPipeline,
            NodeTag::MacroComputePipeline => Namespace::ComputePipeline,
            NodeTag::MacroRenderPass => Namespace::RenderPass,
            NodeTag::MacroComputePass => Namespace::ComputePass,
            NodeTag::MacroFrame => Namespace::Frame,
            NodeTag::MacroShaderModule => Namespace::ShaderModule,
            NodeTag::MacroData => Namespace::Data,
            NodeTag::MacroDefine => Namespace::Define,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_namespace() {
        assert_eq!(Namespace::from_str("pipeline"), Some(Namespace::RenderPipeline));
        assert_eq!(Namespace::from_str("pass"), Some(Namespace::RenderPass));
    }

    #[test]
    fn compute_variants_have_no_alias() {
        assert_eq!(Namespace::from_str("compute"), None);
    }

    #[test]
    fn unknown_namespace_is_none() {
        assert_eq!(Namespace::from_str("nope"), None);
    }
}
