use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::EmptyGraphError;
use crate::graph::{CsrGraph, NodeId};

/// Out-degree of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeEntry {
    pub node: NodeId,
    pub degree: usize,
}

/// Iterate `(node, out_degree)` in ascending id order straight off the
/// offset array.
fn degrees(graph: &CsrGraph) -> impl Iterator<Item = DegreeEntry> + '_ {
    graph
        .offsets()
        .windows(2)
        .enumerate()
        .map(|(idx, w)| DegreeEntry {
            node: idx as NodeId,
            degree: w[1] - w[0],
        })
}

/// The node with the highest out-degree.
///
/// Linear scan; the smallest id wins ties because only a strictly greater
/// degree replaces the running maximum.
pub fn max_degree_node(graph: &CsrGraph) -> Result<DegreeEntry, EmptyGraphError> {
    let mut best: Option<DegreeEntry> = None;
    for entry in degrees(graph) {
        if best.map_or(true, |b| entry.degree > b.degree) {
            best = Some(entry);
        }
    }

    let best = best.ok_or(EmptyGraphError)?;
    debug!(node = best.node, degree = best.degree, "max-degree node");
    Ok(best)
}

/// Return nodes ranked by out-degree.
///
/// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
/// degree (descending). Ties are broken by node ID (ascending).
pub fn top_degrees(graph: &CsrGraph, top_n: usize) -> Vec<DegreeEntry> {
    let mut results: Vec<DegreeEntry> = if top_n == 0 || top_n >= graph.node_count() {
        degrees(graph).collect()
    } else {
        // Min-heap of the current top N, keyed so the weakest entry (lowest
        // degree, then highest id) sits at the root.
        let mut heap: BinaryHeap<Reverse<(usize, Reverse<NodeId>)>> =
            BinaryHeap::with_capacity(top_n + 1);
        for entry in degrees(graph) {
            heap.push(Reverse((entry.degree, Reverse(entry.node))));
            if heap.len() > top_n {
                heap.pop();
            }
        }
        heap.into_iter()
            .map(|Reverse((degree, Reverse(node)))| DegreeEntry { node, degree })
            .collect()
    };

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.node.cmp(&b.node)));
    results
}
