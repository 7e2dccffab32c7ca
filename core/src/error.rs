//! Error types for loading and querying a graph.
//!
//! Load failures are fatal to the load call and produce no graph. Query
//! failures are ordinary values: a bad node id never takes the process down.
//! Malformed input lines are not errors at all; the parser tallies them in
//! the load report.

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Failure to produce a graph from an edge-list file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path does not exist.
    #[error("edge list not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Any other file-system failure (permissions, read error mid-stream).
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSR arrays for this input would exceed the configured memory cap.
    #[error("graph needs ~{required_mb}MB, exceeds max_memory_mb={limit_mb}MB")]
    MemoryLimit { required_mb: usize, limit_mb: usize },
}

impl LoadError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound { path }
        } else {
            LoadError::Io { path, source }
        }
    }
}

/// A query referenced a node outside `[0, node_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node {node} out of range (graph has {node_count} nodes)")]
    OutOfRange { node: NodeId, node_count: usize },
}

/// Max-degree lookup on a graph with no nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("graph is empty: no nodes loaded")]
pub struct EmptyGraphError;
