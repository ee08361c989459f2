//! Token and attributed-AST data model shared by the lexer, parser, and
//! analyzer stages.

pub mod ast;
pub mod namespace;
pub mod shader;
pub mod symbol;
pub mod token;

pub use ast::{Ast, NodeData, NodeIndex, NodeTag};
pub use namespace::Namespace;
pub use shader::{DependencyGraph, ShaderFragment};
pub use symbol::{SymbolInfo, SymbolTable};
pub use token::{token_slice, token_text, Token, TokenKind};
