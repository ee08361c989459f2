//! The attributed AST, stored as a structure-of-arrays.
//!
//! A node is identified by its index into the parallel `tag`/`main_token`/
//! `data` arrays. This keeps per-node memory compact and lets later passes
//! hold plain indices instead of borrowed references into the tree.

/// Index of a node in an [`Ast`]. Node `0` is always the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    Root,

    MacroWgsl,
    MacroBuffer,
    MacroTexture,
    MacroSampler,
    MacroBindGroup,
    MacroBindGroupLayout,
    MacroPipelineLayout,
    MacroRenderPipeline,
    MacroComputePipeline,
    MacroRenderPass,
    MacroComputePass,
    MacroFrame,
    MacroShaderModule,
    MacroData,
    MacroDefine,

    Object,
    Array,
    Property,

    Identifier,
    NumberValue,
    StringValue,
    BooleanValue,

    Reference,
    BuiltinRef,
    UniformAccess,
}

impl NodeTag {
    pub fn is_macro_declaration(self) -> bool {
        matches!(
            self,
            NodeTag::MacroWgsl
                | NodeTag::MacroBuffer
                | NodeTag::MacroTexture
                | NodeTag::MacroSampler
                | NodeTag::MacroBindGroup
                | NodeTag::MacroBindGroupLayout
                | NodeTag::MacroPipelineLayout
                | NodeTag::MacroRenderPipeline
                | NodeTag::MacroComputePipeline
                | NodeTag::MacroRenderPass
                | NodeTag::MacroComputePass
                | NodeTag::MacroFrame
                | NodeTag::MacroShaderModule
                | NodeTag::MacroData
                | NodeTag::MacroDefine
        )
    }
}

/// The data payload attached to a node.
///
/// A tagged union over a range into the shared `extra_data` pool, a single
/// child node, or a pair. `Reference`/`BuiltinRef`/`UniformAccess` nodes
/// reuse the pair variant to hold two *token* indices (namespace, name)
/// rather than node indices — the two fields are plain `u32`s either way,
/// so no extra variant is needed for that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeData {
    ExtraRange { start: u32, end: u32 },
    Node(NodeIndex),
    NodeAndNode(NodeIndex, NodeIndex),
    /// Leaves that carry no payload beyond their `main_token` (identifiers,
    /// literals).
    None,
}

impl NodeData {
    /// Interprets a `NodeAndNode` payload as a (namespace token, name token)
    /// pair, as used by `reference`/`builtin_ref`/`uniform_access` nodes.
    pub fn as_token_pair(self) -> Option<(u32, u32)> {
        match self {
            NodeData::NodeAndNode(a, b) => Some((a.0, b.0)),
            _ => None,
        }
    }

    pub fn as_extra_range(self) -> Option<(u32, u32)> {
        match self {
            NodeData::ExtraRange { start, end } => Some((start, end)),
            _ => None,
        }
    }

    pub fn as_node(self) -> Option<NodeIndex> {
        match self {
            NodeData::Node(n) => Some(n),
            _ => None,
        }
    }
}

/// The attributed AST: parallel `tag`/`main_token`/`data` arrays plus a
/// shared pool of child-node indices referenced by `ExtraRange`s.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub tag: Vec<NodeTag>,
    pub main_token: Vec<u32>,
    pub data: Vec<NodeData>,
    pub extra_data: Vec<u32>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_empty()
    }

    /// Appends a node, returning its index.
    pub fn push(&mut self, tag: NodeTag, main_token: u32, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.tag.len() as u32);
        self.tag.push(tag);
        self.main_token.push(main_token);
        self.data.push(data);
        index
    }

    /// Appends a slice of child node indices to `extra_data`, returning the
    /// `(start, end)` range to store in a `NodeData::ExtraRange`.
    pub fn push_extra(&mut self, children: &[NodeIndex]) -> (u32, u32) {
        let start = self.extra_data.len() as u32;
        self.extra_data.extend(children.iter().map(|n| n.0));
        let end = self.extra_data.len() as u32;
        (start, end)
    }

    pub fn extra_slice(&self, start: u32, end: u32) -> &[u32] {
        &self.extra_data[start as usize..end as usize]
    }

    /// Iterates the child node indices stored in an `ExtraRange`.
    pub fn children_of(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let range = self.data[node.0 as usize].as_extra_range();
        let (start, end) = range.unwrap_or((0, 0));
        self.extra_slice(start, end).iter().map(|&i| NodeIndex(i))
    }

    pub fn tag_of(&self, node: NodeIndex) -> NodeTag {
        self.tag[node.0 as usize]
    }

    pub fn main_token_of(&self, node: NodeIndex) -> u32 {
        self.main_token[node.0 as usize]
    }

    pub fn data_of(&self, node: NodeIndex) -> NodeData {
        self.data[node.0 as usize]
    }

    /// Iterates every node index in the tree, in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.tag.len() as u32).map(NodeIndex)
    }
}
