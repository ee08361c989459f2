//! Recursive-descent parser turning a token stream into a [`kiln_ast::Ast`].
//!
//! The grammar is a flat sequence of macro declarations, each a name
//! followed by a braced object of `key = value` properties — `#wgsl` is no
//! different, its shader source lives in an ordinary `value` string
//! property. Bare identifiers used as values are left untagged here —
//! whether `layout = my_layout` means "the pipeline_layout named my_layout"
//! is a property of the surrounding declaration, which only the analyzer's
//! contextual pass knows.

use kiln_ast::{Ast, NodeData, NodeIndex, NodeTag, Token, TokenKind};
use kiln_diagnostics::ParseError;

pub fn parse(source: &str) -> Result<Ast, ParseError> {
    let tokens = kiln_lexer::lex(source)?;
    Parser {
        source,
        tokens,
        pos: 0,
        ast: Ast::new(),
    }
    .parse_program()
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    ast: Ast,
}

/// Wraps a token index as a [`NodeIndex`] for storage in a [`NodeData`]
/// slot that is documented to hold token indices rather than node indices
/// (reference/builtin-ref/wgsl-body payloads).
fn as_token_ref(token_index: usize) -> NodeIndex {
    NodeIndex(token_index as u32)
}

impl<'a> Parser<'a> {
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn current_text(&self) -> &'a str {
        let bytes = kiln_ast::token_text(&self.tokens, self.pos, self.source.as_bytes());
        std::str::from_utf8(bytes).expect("source is valid utf-8, token spans do not split chars")
    }

    fn bump(&mut self) -> usize {
        let index = self.pos;
        if self.current_kind() != TokenKind::Eof {
            self.pos += 1;
        }
        index
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<usize, ParseError> {
        if self.current_kind() == kind {
            Ok(self.bump())
        } else if self.current_kind() == TokenKind::Eof {
            Err(ParseError::UnexpectedEof {
                offset: self.current().start,
                expected,
            })
        } else {
            Err(ParseError::UnexpectedToken {
                offset: self.current().start,
                expected,
            })
        }
    }

    fn parse_program(mut self) -> Result<Ast, ParseError> {
        let mut declarations = Vec::new();
        while self.current_kind() != TokenKind::Eof {
            declarations.push(self.parse_declaration()?);
        }
        let (start, end) = self.ast.push_extra(&declarations);
        self.ast.push(NodeTag::Root, 0, NodeData::ExtraRange { start, end });
        Ok(self.ast)
    }

    fn parse_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        let macro_token = self.expect(TokenKind::MacroKeyword, "a macro declaration")?;
        let raw = kiln_ast::token_text(&self.tokens, macro_token, self.source.as_bytes());
        let raw = std::str::from_utf8(raw).expect("valid utf-8");
        let name = raw.trim_start_matches('#');

        match name {
            "wgsl" => self.parse_object_decl(NodeTag::MacroWgsl),
            "define" => self.parse_define_decl(),
            "buffer" => self.parse_object_decl(NodeTag::MacroBuffer),
            "texture" => self.parse_object_decl(NodeTag::MacroTexture),
            "sampler" => self.parse_object_decl(NodeTag::MacroSampler),
            "bind_group" => self.parse_object_decl(NodeTag::MacroBindGroup),
            "bind_group_layout" => self.parse_object_decl(NodeTag::MacroBindGroupLayout),
            "pipeline_layout" => self.parse_object_decl(NodeTag::MacroPipelineLayout),
            "render_pipeline" => self.parse_object_decl(NodeTag::MacroRenderPipeline),
            "compute_pipeline" => self.parse_object_decl(NodeTag::MacroComputePipeline),
            "render_pass" => self.parse_object_decl(NodeTag::MacroRenderPass),
            "compute_pass" => self.parse_object_decl(NodeTag::MacroComputePass),
            "frame" => self.parse_object_decl(NodeTag::MacroFrame),
            "shader_module" => self.parse_object_decl(NodeTag::MacroShaderModule),
            "data" => self.parse_object_decl(NodeTag::MacroData),
            other => Err(ParseError::UnknownMacro {
                offset: self.tokens[macro_token].start,
                name: other.to_string(),
            }),
        }
    }

    fn parse_define_decl(&mut self) -> Result<NodeIndex, ParseError> {
        let name_token = self.expect(TokenKind::Identifier, "a define name")?;
        self.expect(TokenKind::Equals, "`=`")?;
        let value = self.parse_value()?;
        Ok(self.ast.push(
            NodeTag::MacroDefine,
            name_token as u32,
            NodeData::Node(value),
        ))
    }

    fn parse_object_decl(&mut self, tag: NodeTag) -> Result<NodeIndex, ParseError> {
        let name_token = self.expect(TokenKind::Identifier, "a declaration name")?;
        let body = self.parse_object()?;
        Ok(self.ast.push(tag, name_token as u32, NodeData::Node(body)))
    }

    fn parse_object(&mut self) -> Result<NodeIndex, ParseError> {
        let brace_token = self.expect(TokenKind::LBrace, "`{`")?;
        let mut properties = Vec::new();
        while self.current_kind() != TokenKind::RBrace {
            properties.push(self.parse_property()?);
            if self.current_kind() == TokenKind::Comma {
                self.bump();
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        let (start, end) = self.ast.push_extra(&properties);
        Ok(self.ast.push(
            NodeTag::Object,
            brace_token as u32,
            NodeData::ExtraRange { start, end },
        ))
    }

    fn parse_property(&mut self) -> Result<NodeIndex, ParseError> {
        let key_token = self.expect(TokenKind::Identifier, "a property name")?;
        self.expect(TokenKind::Equals, "`=`")?;
        let value = self.parse_value()?;
        Ok(self
            .ast
            .push(NodeTag::Property, key_token as u32, NodeData::Node(value)))
    }

    fn parse_value(&mut self) -> Result<NodeIndex, ParseError> {
        match self.current_kind() {
            TokenKind::Number => {
                let token = self.bump();
                Ok(self.ast.push(NodeTag::NumberValue, token as u32, NodeData::None))
            }
            TokenKind::String => {
                let token = self.bump();
                Ok(self.ast.push(NodeTag::StringValue, token as u32, NodeData::None))
            }
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_object(),
            TokenKind::ReferenceSigil => self.parse_reference(),
            TokenKind::Builtin => {
                let token = self.bump();
                Ok(self.ast.push(
                    NodeTag::BuiltinRef,
                    token as u32,
                    NodeData::Node(as_token_ref(token)),
                ))
            }
            TokenKind::Identifier => {
                let text = self.current_text();
                let token = self.bump();
                let tag = match text {
                    "true" | "false" => NodeTag::BooleanValue,
                    _ => NodeTag::Identifier,
                };
                Ok(self.ast.push(tag, token as u32, NodeData::None))
            }
            _ => Err(ParseError::UnexpectedToken {
                offset: self.current().start,
                expected: "a value",
            }),
        }
    }

    fn parse_array(&mut self) -> Result<NodeIndex, ParseError> {
        let bracket_token = self.expect(TokenKind::LBracket, "`[`")?;
        let mut elements = Vec::new();
        while self.current_kind() != TokenKind::RBracket {
            elements.push(self.parse_value()?);
            if self.current_kind() == TokenKind::Comma {
                self.bump();
            }
        }
        self.expect(TokenKind::RBracket, "`]`")?;
        let (start, end) = self.ast.push_extra(&elements);
        Ok(self.ast.push(
            NodeTag::Array,
            bracket_token as u32,
            NodeData::ExtraRange { start, end },
        ))
    }

    /// Parses `$ns.name` and its optional `.field` uniform-access suffix.
    fn parse_reference(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect(TokenKind::ReferenceSigil, "`$`")?;
        let ns_token = self.expect(TokenKind::Identifier, "a namespace")?;
        self.expect(TokenKind::Dot, "`.`")?;
        let name_token = self.expect(TokenKind::Identifier, "a declaration name")?;

        if self.current_kind() == TokenKind::Dot {
            self.bump();
            let field_token = self.expect(TokenKind::Identifier, "a field name")?;
            return Ok(self.ast.push(
                NodeTag::UniformAccess,
                field_token as u32,
                NodeData::NodeAndNode(as_token_ref(ns_token), as_token_ref(name_token)),
            ));
        }

        Ok(self.ast.push(
            NodeTag::Reference,
            name_token as u32,
            NodeData::NodeAndNode(as_token_ref(ns_token), as_token_ref(name_token)),
        ))
    }
}
