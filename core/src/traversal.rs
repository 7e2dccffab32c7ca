use tracing::debug;

use crate::error::NodeError;
use crate::graph::{CsrGraph, NodeId};

/// Fixed-size bit set over `[0, len)`: one bit per node, O(1) test-and-set.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitedSet {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    #[inline]
    fn contains(&self, idx: usize) -> bool {
        self.words[idx / 64] & (1u64 << (idx % 64)) != 0
    }

    /// Mark `idx` visited. Returns true if it was not already set.
    #[inline]
    pub fn insert(&mut self, idx: usize) -> bool {
        let word = &mut self.words[idx / 64];
        let bit = 1u64 << (idx % 64);
        let fresh = *word & bit == 0;
        *word |= bit;
        fresh
    }

    #[cfg(test)]
    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Result of a bounded BFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsResult {
    /// Discovered nodes in discovery order, `start` first.
    pub nodes: Vec<NodeId>,
    /// `(parent, child)` for every node except `start`, in discovery order.
    pub tree_edges: Vec<(NodeId, NodeId)>,
    /// Deepest level that discovered at least one node.
    pub depth_reached: u32,
}

/// BFS from `start`, following outgoing edges at most `max_depth` hops.
///
/// Level-synchronous: the whole frontier at depth `d` is expanded before any
/// node at `d + 1`, in frontier order, with each node's neighbors in store
/// order. Each node is recorded once, with the edge that first reached it,
/// so the edges form a BFS tree rooted at `start` even when the graph has
/// cycles or parallel paths.
pub fn bfs(graph: &CsrGraph, start: NodeId, max_depth: u32) -> Result<BfsResult, NodeError> {
    // Validates start before anything is allocated.
    graph.out_degree(start)?;

    let mut visited = VisitedSet::new(graph.node_count());
    visited.insert(start as usize);

    let mut nodes = vec![start];
    let mut tree_edges = Vec::new();
    let mut frontier = vec![start];
    let mut depth = 0u32;
    let mut depth_reached = 0u32;

    while !frontier.is_empty() && depth < max_depth {
        let mut next_frontier = Vec::new();
        for &u in &frontier {
            for &v in graph.neighbors_at(u as usize) {
                if visited.insert(v as usize) {
                    nodes.push(v);
                    tree_edges.push((u, v));
                    next_frontier.push(v);
                }
            }
        }
        depth += 1;
        if !next_frontier.is_empty() {
            depth_reached = depth;
        }
        frontier = next_frontier;
    }

    debug!(
        start,
        max_depth,
        found = nodes.len(),
        depth_reached,
        "bfs complete"
    );

    Ok(BfsResult {
        nodes,
        tree_edges,
        depth_reached,
    })
}
