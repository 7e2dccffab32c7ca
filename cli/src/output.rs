//! Serializable result shapes and their text rendering.

use std::fmt;
use std::io::Write;

use neuronet_core::{DegreeEntry, NodeId};
use serde::Serialize;

/// Print `value` to stdout as pretty JSON or via its `Display` impl.
pub fn emit<T: Serialize + fmt::Display>(value: &T, json: bool) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
    } else {
        write!(out, "{value}")?;
    }
    Ok(())
}

/// First `limit` items of `items`, or all of them when `limit` is 0.
pub fn truncate<T: Clone>(items: &[T], limit: usize) -> (Vec<T>, bool) {
    if limit == 0 || items.len() <= limit {
        (items.to_vec(), false)
    } else {
        (items[..limit].to_vec(), true)
    }
}

pub fn mb(bytes: usize) -> f64 {
    bytes as f64 / 1_048_576.0
}

#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub file: String,
    pub nodes: usize,
    pub edges: usize,
    pub lines_read: u64,
    pub skipped_lines: u64,
    pub wide_id_lines: u64,
    pub blank_lines: u64,
    pub comment_lines: u64,
    pub memory_mb: f64,
    pub load_ms: f64,
}

impl fmt::Display for StatsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File:     {}", self.file)?;
        writeln!(f, "Nodes:    {}", self.nodes)?;
        writeln!(f, "Edges:    {}", self.edges)?;
        writeln!(
            f,
            "Lines:    {} read, {} skipped, {} blank, {} comments",
            self.lines_read, self.skipped_lines, self.blank_lines, self.comment_lines
        )?;
        if self.wide_id_lines > 0 {
            writeln!(
                f,
                "Wide ids: {} edges dropped (id > {})",
                self.wide_id_lines,
                NodeId::MAX
            )?;
        }
        writeln!(f, "Memory:   ~{:.1}MB", self.memory_mb)?;
        writeln!(f, "Load:     {:.1}ms", self.load_ms)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DegreeOutput {
    pub node: NodeId,
    pub degree: usize,
}

impl From<DegreeEntry> for DegreeOutput {
    fn from(e: DegreeEntry) -> Self {
        Self {
            node: e.node,
            degree: e.degree,
        }
    }
}

impl fmt::Display for DegreeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node {}: degree {}", self.node, self.degree)
    }
}

#[derive(Debug, Serialize)]
pub struct TopOutput {
    pub nodes: Vec<DegreeOutput>,
}

impl fmt::Display for TopOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>6} {:>12} {:>10}", "rank", "node", "degree")?;
        writeln!(f, "{:->6} {:->12} {:->10}", "", "", "")?;
        for (rank, entry) in self.nodes.iter().enumerate() {
            writeln!(f, "{:>6} {:>12} {:>10}", rank + 1, entry.node, entry.degree)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct NeighborsOutput {
    pub node: NodeId,
    pub degree: usize,
    pub neighbors: Vec<NodeId>,
    pub truncated: bool,
}

impl fmt::Display for NeighborsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node {}: {} neighbors", self.node, self.degree)?;
        for n in &self.neighbors {
            writeln!(f, "  -> {n}")?;
        }
        if self.truncated {
            writeln!(f, "  ... {} more", self.degree - self.neighbors.len())?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct BfsOutput {
    pub start: NodeId,
    pub max_depth: u32,
    pub depth_reached: u32,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub truncated: bool,
    pub elapsed_ms: f64,
}

impl fmt::Display for BfsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BFS from {} (depth {}): {} nodes, {} tree edges, deepest level {} in {:.1}ms",
            self.start,
            self.max_depth,
            self.node_count,
            self.edge_count,
            self.depth_reached,
            self.elapsed_ms
        )?;
        writeln!(f, "Nodes:")?;
        for n in &self.nodes {
            writeln!(f, "  {n}")?;
        }
        writeln!(f, "Edges:")?;
        for (p, c) in &self.edges {
            writeln!(f, "  {p} -> {c}")?;
        }
        if self.truncated {
            writeln!(
                f,
                "(showing {} of {} nodes, {} of {} edges)",
                self.nodes.len(),
                self.node_count,
                self.edges.len(),
                self.edge_count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        let items = [1, 2, 3, 4];
        assert_eq!(truncate(&items, 0), (vec![1, 2, 3, 4], false));
        assert_eq!(truncate(&items, 4), (vec![1, 2, 3, 4], false));
        assert_eq!(truncate(&items, 2), (vec![1, 2], true));
    }

    #[test]
    fn test_neighbors_text_reports_remainder() {
        let out = NeighborsOutput {
            node: 3,
            degree: 5,
            neighbors: vec![1, 2],
            truncated: true,
        };
        let text = out.to_string();
        assert!(text.starts_with("Node 3: 5 neighbors"));
        assert!(text.contains("... 3 more"));
    }

    #[test]
    fn test_bfs_json_shape() {
        let out = BfsOutput {
            start: 0,
            max_depth: 1,
            depth_reached: 1,
            node_count: 2,
            edge_count: 1,
            nodes: vec![0, 1],
            edges: vec![(0, 1)],
            truncated: false,
            elapsed_ms: 0.5,
        };
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["nodes"], serde_json::json!([0, 1]));
        assert_eq!(value["edges"], serde_json::json!([[0, 1]]));
        assert_eq!(value["truncated"], serde_json::json!(false));
    }

    #[test]
    fn test_top_text_ranks() {
        let out = TopOutput {
            nodes: vec![
                DegreeOutput { node: 7, degree: 9 },
                DegreeOutput { node: 2, degree: 4 },
            ],
        };
        let text = out.to_string();
        let rows: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].trim_start().starts_with("1"));
        assert!(rows[0].contains('7'));
    }
}
