use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::LoadOptions;
use crate::degree::{self, DegreeEntry};
use crate::error::{EmptyGraphError, LoadError, NodeError};
use crate::graph::{CsrGraph, NodeId};
use crate::parser::{self, ParsedEdges};
use crate::traversal::{self, BfsResult};

const BYTES_PER_MB: usize = 1024 * 1024;

/// Diagnostics from the load that produced a handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub lines_read: u64,
    pub skipped_lines: u64,
    pub wide_id_lines: u64,
    pub blank_lines: u64,
    pub comment_lines: u64,
    pub load_time: Duration,
    pub memory_bytes: usize,
}

/// A loaded, immutable graph and the report of how it was loaded.
///
/// This is the query surface for callers. Every query is read-only, so a
/// handle can be shared across threads behind an `Arc` once built. Loading
/// a new file produces a new handle; nothing is global.
#[derive(Debug, Clone, Default)]
pub struct GraphHandle {
    graph: CsrGraph,
    report: LoadReport,
}

impl GraphHandle {
    /// Load an edge-list file with default options.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Parse and build in one call. No handle exists until both succeed.
    pub fn load_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let start = Instant::now();
        info!(path = %path.display(), "loading edge list");

        let parsed = parser::parse(path, options)?;
        let handle = Self::from_parsed(parsed, options, start)?;

        info!(
            nodes = handle.node_count(),
            edges = handle.edge_count(),
            skipped = handle.report.skipped_lines,
            wide_ids = handle.report.wide_id_lines,
            memory_mb = handle.report.memory_bytes / BYTES_PER_MB,
            elapsed_ms = handle.report.load_time.as_millis() as u64,
            "CSR graph built"
        );
        Ok(handle)
    }

    /// Build from already-parsed edges, enforcing the memory cap first.
    pub(crate) fn from_parsed(
        parsed: ParsedEdges,
        options: &LoadOptions,
        started: Instant,
    ) -> Result<Self, LoadError> {
        let node_count = parsed.node_count();
        let estimate = CsrGraph::estimate_memory(node_count, parsed.edges.len());
        if let Some(limit_mb) = options.max_memory_mb {
            let required_mb = estimate.div_ceil(BYTES_PER_MB);
            if required_mb > limit_mb {
                return Err(LoadError::MemoryLimit { required_mb, limit_mb });
            }
        }

        let graph = CsrGraph::build(&parsed.edges, node_count);
        let report = LoadReport {
            lines_read: parsed.lines_read,
            skipped_lines: parsed.skipped_lines,
            wide_id_lines: parsed.wide_id_lines,
            blank_lines: parsed.blank_lines,
            comment_lines: parsed.comment_lines,
            load_time: started.elapsed(),
            memory_bytes: graph.memory_usage(),
        };
        Ok(Self { graph, report })
    }

    /// Build directly from in-memory edges.
    pub fn from_edges(edges: &[(NodeId, NodeId)]) -> Self {
        let started = Instant::now();
        let graph = CsrGraph::build(edges, 0);
        let report = LoadReport {
            load_time: started.elapsed(),
            memory_bytes: graph.memory_usage(),
            ..LoadReport::default()
        };
        Self { graph, report }
    }

    pub fn graph(&self) -> &CsrGraph {
        &self.graph
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn memory_usage(&self) -> usize {
        self.graph.memory_usage()
    }

    pub fn degree(&self, node: NodeId) -> Result<usize, NodeError> {
        self.graph.out_degree(node)
    }

    pub fn neighbors(&self, node: NodeId) -> Result<&[NodeId], NodeError> {
        self.graph.neighbors(node)
    }

    pub fn max_degree_node(&self) -> Result<NodeId, EmptyGraphError> {
        degree::max_degree_node(&self.graph).map(|e| e.node)
    }

    /// Max-degree node together with its degree.
    pub fn max_degree(&self) -> Result<DegreeEntry, EmptyGraphError> {
        degree::max_degree_node(&self.graph)
    }

    pub fn top_degrees(&self, top_n: usize) -> Vec<DegreeEntry> {
        degree::top_degrees(&self.graph, top_n)
    }

    pub fn bfs(&self, start: NodeId, max_depth: u32) -> Result<BfsResult, NodeError> {
        traversal::bfs(&self.graph, start, max_depth)
    }
}
