//! Shader fragment records and the import dependency graph used by
//! analyzer passes 3 (cycle detection) and 4 (content-hash dedup).

use std::collections::HashMap;

use crate::ast::NodeIndex;

/// A single `wgsl` declaration's resolved text and dedup state.
///
/// `dependencies` is reserved for a future cross-shader `#import` graph
/// inside WGSL bodies themselves; nothing populates it yet, declarations
/// are deduped purely on `content_hash`.
#[derive(Debug, Clone)]
pub struct ShaderFragment {
    pub node: NodeIndex,
    pub content: String,
    pub content_hash: u64,
    pub data_id: Option<u16>,
    pub dependencies: Vec<NodeIndex>,
}

impl ShaderFragment {
    pub fn new(node: NodeIndex, content: String) -> Self {
        let content_hash = fnv1a_64(content.as_bytes());
        Self {
            node,
            content,
            content_hash,
            data_id: None,
            dependencies: Vec::new(),
        }
    }
}

/// 64-bit FNV-1a, used to content-hash shader bodies for dedup.
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting,
    Visited,
}

/// The directed graph of declaration-to-declaration references walked by
/// pass 3 to find import cycles.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: HashMap<NodeIndex, Vec<NodeIndex>>,
}

/// Iteration budget for the cycle-detection DFS, per root. Exceeding it is
/// an invariant violation: the symbol table bounds the node count, so a
/// well-formed graph can never need this many steps to exhaust its nodes.
const DFS_ITERATION_CAP: usize = 1024;

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.edges.entry(from).or_default().push(to);
    }

    fn neighbors(&self, node: NodeIndex) -> &[NodeIndex] {
        self.edges.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Walks the graph from `root` with an explicit stack, never recursion.
    /// Returns the cycle as a path of nodes (root-to-repeat) if one is
    /// reachable from `root`.
    pub fn detect_cycle_from(&self, root: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut state: HashMap<NodeIndex, VisitState> = HashMap::new();
        let mut stack: Vec<(NodeIndex, usize)> = vec![(root, 0)];
        let mut path: Vec<NodeIndex> = vec![root];
        state.insert(root, VisitState::Visiting);

        let mut iterations = 0usize;
        while let Some(&(node, child_index)) = stack.last() {
            iterations += 1;
            assert!(
                iterations <= DFS_ITERATION_CAP,
                "dependency graph DFS exceeded iteration cap for root {root:?}; \
                 this indicates a malformed graph, not legal input"
            );

            let neighbors = self.neighbors(node);
            if child_index >= neighbors.len() {
                state.insert(node, VisitState::Visited);
                stack.pop();
                path.pop();
                continue;
            }

            let next = neighbors[child_index];
            stack.last_mut().unwrap().1 += 1;

            match state.get(&next) {
                Some(VisitState::Visiting) => {
                    let mut cycle = path.clone();
                    cycle.push(next);
                    return Some(cycle);
                }
                Some(VisitState::Visited) => continue,
                None => {
                    state.insert(next, VisitState::Visiting);
                    stack.push((next, 0));
                    path.push(next);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_content_hashes_identically() {
        let a = ShaderFragment::new(NodeIndex(0), "fn main() {}".to_string());
        let b = ShaderFragment::new(NodeIndex(1), "fn main() {}".to_string());
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn different_content_hashes_differently() {
        let a = ShaderFragment::new(NodeIndex(0), "fn a() {}".to_string());
        let b = ShaderFragment::new(NodeIndex(1), "fn b() {}".to_string());
        assert_ne!(a.content_hash, b.content_hash);
    }

    #[test]
    fn acyclic_graph_reports_no_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(NodeIndex(0), NodeIndex(1));
        graph.add_edge(NodeIndex(1), NodeIndex(2));
        assert!(graph.detect_cycle_from(NodeIndex(0)).is_none());
    }

    #[test]
    fn direct_self_loop_is_a_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(NodeIndex(0), NodeIndex(0));
        let cycle = graph.detect_cycle_from(NodeIndex(0));
        assert_eq!(cycle, Some(vec![NodeIndex(0), NodeIndex(0)]));
    }

    #[test]
    fn indirect_cycle_is_detected() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(NodeIndex(0), NodeIndex(1));
        graph.add_edge(NodeIndex(1), NodeIndex(2));
        graph.add_edge(NodeIndex(2), NodeIndex(0));
        let cycle = graph.detect_cycle_from(NodeIndex(0));
        assert_eq!(cycle, Some(vec![NodeIndex(0), NodeIndex(1), NodeIndex(2), NodeIndex(0)]));
    }
}
