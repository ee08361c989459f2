//! The `PNGB` bytecode emission seam.
//!
//! `compile` holds an `&dyn Emitter` rather than a concrete serializer so
//! hosts can swap in a format variant or a test double without touching
//! the resolver/lexer/parser/analyzer pipeline in front of it.

use kiln_analyzer::AnalysisResult;
use kiln_ast::{Ast, Token};
use kiln_diagnostics::EmitError;

use crate::plugins::PluginSet;

/// The 4-byte magic every `PNGB` buffer must begin with.
pub const PNGB_MAGIC: &[u8; 4] = b"PNGB";
const PNGB_VERSION: u16 = 1;

/// The collaborator-facing inputs an [`Emitter`] needs beyond the AST and
/// analysis result: the bits of [`crate::CompileOptions`] that are the
/// emitter's concern rather than the core pipeline's, plus the detected
/// [`PluginSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitContext {
    pub minify_shaders: bool,
    pub plugins: PluginSet,
}

pub trait Emitter {
    fn emit(
        &self,
        ast: &Ast,
        tokens: &[Token],
        source: &str,
        analysis: &AnalysisResult,
        ctx: &EmitContext,
    ) -> Result<Vec<u8>, EmitError>;
}

/// Writes a minimal, valid `PNGB` buffer: magic, version, and one entry per
/// deduped shader fragment (`data_id`, content length, raw WGSL bytes).
/// Declaration metadata beyond shaders is left for a production emitter;
/// this is the contract test double, gated behind `stub-emitter` (on by
/// default) so a host that brings its own `Emitter` can drop it.
#[cfg(any(test, feature = "stub-emitter"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct StubEmitter;

#[cfg(any(test, feature = "stub-emitter"))]
impl Emitter for StubEmitter {
    fn emit(
        &self,
        _ast: &Ast,
        _tokens: &[Token],
        _source: &str,
        analysis: &AnalysisResult,
        ctx: &EmitContext,
    ) -> Result<Vec<u8>, EmitError> {
        if analysis.shader_fragments.len() > u16::MAX as usize {
            return Err(EmitError::TooManyShaders {
                count: analysis.shader_fragments.len(),
            });
        }

        let mut buffer = Vec::new();
        buffer.extend_from_slice(PNGB_MAGIC);
        buffer.extend_from_slice(&PNGB_VERSION.to_le_bytes());
        buffer.extend_from_slice(&(analysis.shader_fragments.len() as u16).to_le_bytes());

        for fragment in &analysis.shader_fragments {
            let data_id = fragment.data_id.ok_or(EmitError::MissingShaderFragment {
                data_id: u16::MAX,
            })?;
            buffer.extend_from_slice(&data_id.to_le_bytes());
            let content = if ctx.minify_shaders {
                minify(&fragment.content)
            } else {
                fragment.content.clone()
            };
            let content_bytes = content.as_bytes();
            buffer.extend_from_slice(&(content_bytes.len() as u32).to_le_bytes());
            buffer.extend_from_slice(content_bytes);
        }

        Ok(buffer)
    }
}

/// Collapses runs of ASCII whitespace to a single space. Good enough for a
/// test double; a real emitter's minifier would parse WGSL instead.
#[cfg(any(test, feature = "stub-emitter"))]
fn minify(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last_was_space = false;
    for c in content.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_emitter_output_starts_with_the_pngb_magic() {
        let source = "#wgsl vs { value = \"fn main() {}\" }";
        let tokens = kiln_lexer::lex(source).unwrap();
        let ast = kiln_parser::parse(source).unwrap();
        let analysis = kiln_analyzer::analyze(&ast, &tokens, source);
        let buffer = StubEmitter
            .emit(&ast, &tokens, source, &analysis, &EmitContext::default())
            .unwrap();
        assert_eq!(&buffer[0..4], PNGB_MAGIC);
    }

    #[test]
    fn minify_shaders_collapses_whitespace_in_stored_content() {
        let source = "#wgsl vs { value = \"fn  main()  {\\n  }\" }";
        let tokens = kiln_lexer::lex(source).unwrap();
        let ast = kiln_parser::parse(source).unwrap();
        let analysis = kiln_analyzer::analyze(&ast, &tokens, source);
        let ctx = EmitContext {
            minify_shaders: true,
            ..Default::default()
        };
        let buffer = StubEmitter.emit(&ast, &tokens, source, &analysis, &ctx).unwrap();
        let content_len = u32::from_le_bytes([buffer[10], buffer[11], buffer[12], buffer[13]]) as usize;
        let content = std::str::from_utf8(&buffer[14..14 + content_len]).unwrap();
        assert_eq!(content, "fn main() { }");
    }
}
