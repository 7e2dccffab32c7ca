use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use neuronet_core::{GraphHandle, LoadOptions, NodeId};
use tracing::warn;

use crate::output::{
    self, BfsOutput, DegreeOutput, NeighborsOutput, StatsOutput, TopOutput,
};

/// BFS depth beyond which the result may cover most of a large graph.
const DEEP_BFS_WARN_DEPTH: u32 = 6;

/// Graph size at which deep traversals get a warning.
const DEEP_BFS_WARN_NODES: usize = 1_000_000;

fn load(file: &Path, options: &LoadOptions) -> anyhow::Result<GraphHandle> {
    GraphHandle::load_with(file, options)
        .with_context(|| format!("failed to load {}", file.display()))
}

pub fn stats(file: &Path, options: &LoadOptions, json: bool) -> anyhow::Result<()> {
    let graph = load(file, options)?;
    let report = graph.report();
    output::emit(
        &StatsOutput {
            file: file.display().to_string(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            lines_read: report.lines_read,
            skipped_lines: report.skipped_lines,
            wide_id_lines: report.wide_id_lines,
            blank_lines: report.blank_lines,
            comment_lines: report.comment_lines,
            memory_mb: output::mb(report.memory_bytes),
            load_ms: report.load_time.as_secs_f64() * 1000.0,
        },
        json,
    )
}

pub fn degree(file: &Path, options: &LoadOptions, node: NodeId, json: bool) -> anyhow::Result<()> {
    let graph = load(file, options)?;
    let degree = graph.degree(node)?;
    output::emit(&DegreeOutput { node, degree }, json)
}

pub fn neighbors(
    file: &Path,
    options: &LoadOptions,
    node: NodeId,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let graph = load(file, options)?;
    let all = graph.neighbors(node)?;
    let (neighbors, truncated) = output::truncate(all, limit);
    output::emit(
        &NeighborsOutput {
            node,
            degree: all.len(),
            neighbors,
            truncated,
        },
        json,
    )
}

pub fn max_degree(file: &Path, options: &LoadOptions, json: bool) -> anyhow::Result<()> {
    let graph = load(file, options)?;
    let entry = graph.max_degree()?;
    output::emit(&DegreeOutput::from(entry), json)
}

pub fn top(file: &Path, options: &LoadOptions, count: usize, json: bool) -> anyhow::Result<()> {
    let graph = load(file, options)?;
    let nodes = graph
        .top_degrees(count)
        .into_iter()
        .map(DegreeOutput::from)
        .collect();
    output::emit(&TopOutput { nodes }, json)
}

pub fn bfs(
    file: &Path,
    options: &LoadOptions,
    start: NodeId,
    depth: u32,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let graph = load(file, options)?;

    if depth > DEEP_BFS_WARN_DEPTH && graph.node_count() >= DEEP_BFS_WARN_NODES {
        warn!(
            depth,
            nodes = graph.node_count(),
            "deep traversal on a large graph may return millions of nodes"
        );
    }

    let t = Instant::now();
    let result = graph
        .bfs(start, depth)
        .with_context(|| format!("bfs from node {start}"))?;
    let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;

    let (nodes, nodes_cut) = output::truncate(&result.nodes, limit);
    let (edges, edges_cut) = output::truncate(&result.tree_edges, limit);
    output::emit(
        &BfsOutput {
            start,
            max_depth: depth,
            depth_reached: result.depth_reached,
            node_count: result.nodes.len(),
            edge_count: result.tree_edges.len(),
            nodes,
            edges,
            truncated: nodes_cut || edges_cut,
            elapsed_ms,
        },
        json,
    )
}
