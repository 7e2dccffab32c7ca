use std::mem::size_of;

use crate::error::NodeError;

/// Dense node identifier. Doubles as the index into the offset array.
///
/// 32 bits keeps the neighbor array at four bytes per edge.
pub type NodeId = u32;

/// Immutable directed graph in compressed sparse row layout.
///
/// `targets` holds every edge's destination, grouped by source. The
/// out-neighbors of node `n` are `targets[offsets[n]..offsets[n + 1]]`.
/// Two flat allocations regardless of node count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrGraph {
    offsets: Vec<usize>,
    targets: Vec<NodeId>,
}

impl CsrGraph {
    /// Build from an edge sequence in two passes.
    ///
    /// The node count is `max(node_count_hint, max id + 1)`, so a hint can
    /// only add trailing isolated nodes, never drop referenced ones.
    /// Neighbors keep edge-arrival order within each node.
    pub fn build(edges: &[(NodeId, NodeId)], node_count_hint: usize) -> Self {
        // Pass 1: node space and out-degree counts, shifted by one so the
        // prefix sum below turns them into start offsets in place.
        let referenced = edges
            .iter()
            .map(|&(src, dst)| src.max(dst) as usize + 1)
            .max()
            .unwrap_or(0);
        let node_count = node_count_hint.max(referenced);

        let mut offsets = vec![0usize; node_count + 1];
        for &(src, _) in edges {
            offsets[src as usize + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        // Pass 2: scatter destinations through a per-node write cursor.
        let mut cursor = offsets[..node_count].to_vec();
        let mut targets: Vec<NodeId> = vec![0; edges.len()];
        for &(src, dst) in edges {
            let slot = &mut cursor[src as usize];
            targets[*slot] = dst;
            *slot += 1;
        }

        debug_assert_eq!(offsets[node_count], targets.len());
        Self { offsets, targets }
    }

    /// Bytes the CSR arrays for a graph of this size will occupy.
    pub fn estimate_memory(node_count: usize, edge_count: usize) -> usize {
        (node_count + 1) * size_of::<usize>() + edge_count * size_of::<NodeId>()
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    #[inline]
    fn check(&self, node: NodeId) -> Result<usize, NodeError> {
        let idx = node as usize;
        if idx < self.node_count() {
            Ok(idx)
        } else {
            Err(NodeError::OutOfRange {
                node,
                node_count: self.node_count(),
            })
        }
    }

    /// Out-degree in O(1) from adjacent offsets.
    pub fn out_degree(&self, node: NodeId) -> Result<usize, NodeError> {
        let idx = self.check(node)?;
        Ok(self.offsets[idx + 1] - self.offsets[idx])
    }

    /// Borrowed view of a node's out-neighbors.
    pub fn neighbors(&self, node: NodeId) -> Result<&[NodeId], NodeError> {
        let idx = self.check(node)?;
        Ok(&self.targets[self.offsets[idx]..self.offsets[idx + 1]])
    }

    /// Unchecked neighbor slice for traversal inner loops. `idx` must be
    /// below `node_count()`.
    #[inline]
    pub(crate) fn neighbors_at(&self, idx: usize) -> &[NodeId] {
        &self.targets[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Offset array of length `node_count() + 1` (empty for a default graph).
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.offsets.capacity() * size_of::<usize>()
            + self.targets.capacity() * size_of::<NodeId>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_triangle() {
        let g = CsrGraph::build(&[(0, 1), (1, 2), (2, 0)], 0);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.offsets(), &[0, 1, 2, 3]);
        assert_eq!(g.neighbors(0).unwrap(), &[1]);
        assert_eq!(g.neighbors(2).unwrap(), &[0]);
    }

    #[test]
    fn test_arrival_order_preserved() {
        let g = CsrGraph::build(&[(1, 3), (0, 2), (1, 0), (1, 2), (0, 1)], 0);
        assert_eq!(g.neighbors(0).unwrap(), &[2, 1]);
        assert_eq!(g.neighbors(1).unwrap(), &[3, 0, 2]);
        assert_eq!(g.neighbors(3).unwrap(), &[] as &[NodeId]);
    }

    #[test]
    fn test_sink_only_node_counts() {
        let g = CsrGraph::build(&[(0, 5)], 0);
        assert_eq!(g.node_count(), 6);
        assert_eq!(g.out_degree(0), Ok(1));
        assert_eq!(g.out_degree(5), Ok(0));
        assert_eq!(g.out_degree(3), Ok(0));
    }

    #[test]
    fn test_hint_adds_isolated_nodes() {
        let g = CsrGraph::build(&[(0, 1)], 10);
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.out_degree(9), Ok(0));
    }

    #[test]
    fn test_hint_never_truncates() {
        let g = CsrGraph::build(&[(0, 7)], 2);
        assert_eq!(g.node_count(), 8);
    }

    #[test]
    fn test_duplicates_and_self_loops() {
        let g = CsrGraph::build(&[(0, 1), (0, 1), (1, 1)], 0);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(0).unwrap(), &[1, 1]);
        assert_eq!(g.neighbors(1).unwrap(), &[1]);
    }

    #[test]
    fn test_empty() {
        let g = CsrGraph::build(&[], 0);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert_eq!(
            g.out_degree(0),
            Err(NodeError::OutOfRange { node: 0, node_count: 0 })
        );
    }

    #[test]
    fn test_default_is_empty() {
        let g = CsrGraph::default();
        assert_eq!(g.node_count(), 0);
        assert!(g.neighbors(0).is_err());
    }

    #[test]
    fn test_out_of_range() {
        let g = CsrGraph::build(&[(0, 1), (1, 2), (2, 0)], 0);
        assert_eq!(
            g.out_degree(3),
            Err(NodeError::OutOfRange { node: 3, node_count: 3 })
        );
        assert!(g.neighbors(u32::MAX).is_err());
    }

    #[test]
    fn test_degree_sum_equals_edges() {
        let edges: Vec<(NodeId, NodeId)> = (0..50).map(|i| (i % 7, (i * 3) % 11)).collect();
        let g = CsrGraph::build(&edges, 0);
        let total: usize = (0..g.node_count() as NodeId)
            .map(|n| g.out_degree(n).unwrap())
            .sum();
        assert_eq!(total, g.edge_count());
    }

    #[test]
    fn test_memory_estimate_matches_build() {
        let g = CsrGraph::build(&[(0, 1), (1, 2)], 0);
        assert_eq!(g.memory_usage(), CsrGraph::estimate_memory(3, 2));
    }
}
