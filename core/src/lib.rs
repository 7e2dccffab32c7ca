//! neuronet-core: compressed sparse row graph engine.
//!
//! Loads directed edge-list files (`src dst` per line) into a CSR structure
//! of two flat arrays and answers degree, neighbor, max-degree and bounded
//! BFS queries against it. Built for inputs with hundreds of millions of
//! edges: no per-node allocations, O(1) degree lookups, O(degree) neighbor
//! enumeration and a bit-per-node visited set for traversal.
//!
//! `GraphHandle` is the entry point. It is immutable after load and safe to
//! query from many threads at once.

mod config;
mod degree;
mod error;
mod graph;
mod handle;
mod parser;
mod traversal;

pub use config::{LoadOptions, DEFAULT_COMMENT_PREFIX};
pub use degree::{max_degree_node, top_degrees, DegreeEntry};
pub use error::{EmptyGraphError, LoadError, NodeError};
pub use graph::{CsrGraph, NodeId};
pub use handle::{GraphHandle, LoadReport};
pub use parser::{parse, parse_reader, ParsedEdges, MAX_LINE_BYTES};
pub use traversal::{bfs, BfsResult, VisitedSet};
