//! Streaming edge-list parser.
//!
//! One edge per line: two whitespace-separated non-negative integers. Lines
//! end at `\n`, `\r\n` or a lone `\r`. The reader reuses a single line buffer
//! capped at `MAX_LINE_BYTES`, so memory stays proportional to the edge count
//! rather than the file size. Bad lines are counted and skipped; only I/O
//! failures abort.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::LoadOptions;
use crate::error::LoadError;
use crate::graph::NodeId;

/// Read buffer size for edge-list files.
const READ_BUFFER_BYTES: usize = 1 << 20;

/// Longest line kept in memory. A valid edge line needs at most ~25 bytes;
/// anything past this is discarded up to the next line end and counted as
/// malformed.
pub const MAX_LINE_BYTES: usize = 1024;

/// Only the first few malformed lines are logged individually.
const MAX_LOGGED_MALFORMED: u64 = 5;

/// Output of a parse: the edge pairs in file order plus line tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEdges {
    pub edges: Vec<(NodeId, NodeId)>,
    /// Largest id seen as source or destination. `None` when no edges.
    pub max_node_id: Option<NodeId>,
    pub lines_read: u64,
    /// Lines that are not an edge at all (also counts overlong lines).
    pub skipped_lines: u64,
    /// Well-formed edges whose ids do not fit a `NodeId`. Not loaded.
    pub wide_id_lines: u64,
    pub blank_lines: u64,
    pub comment_lines: u64,
}

impl ParsedEdges {
    /// Node count implied by the edges: max id + 1, or 0.
    pub fn node_count(&self) -> usize {
        self.max_node_id.map_or(0, |id| id as usize + 1)
    }
}

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Edge(NodeId, NodeId),
    WideId,
    Blank,
    Comment,
    Malformed,
}

fn classify(raw: &[u8], comment_prefix: Option<char>) -> Line {
    let Ok(text) = std::str::from_utf8(raw) else {
        return Line::Malformed;
    };
    let text = text.trim();
    if text.is_empty() {
        return Line::Blank;
    }
    if let Some(prefix) = comment_prefix {
        if text.starts_with(prefix) {
            return Line::Comment;
        }
    }

    let mut tokens = text.split_ascii_whitespace();
    let (Some(src), Some(dst), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Line::Malformed;
    };
    match (src.parse::<u64>(), dst.parse::<u64>()) {
        (Ok(src), Ok(dst)) => match (NodeId::try_from(src), NodeId::try_from(dst)) {
            (Ok(src), Ok(dst)) => Line::Edge(src, dst),
            _ => Line::WideId,
        },
        _ => Line::Malformed,
    }
}

/// Outcome of reading one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineRead {
    Eof,
    Line,
    /// Longer than `MAX_LINE_BYTES`; `buf` holds nothing useful.
    Overlong,
}

fn fill<R: BufRead>(reader: &mut R) -> io::Result<&[u8]> {
    loop {
        match reader.fill_buf() {
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    reader.fill_buf()
}

/// Read one line into `buf` without its terminator, keeping at most
/// `max_len` bytes. Bytes past the cap are consumed and dropped.
fn read_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_len: usize,
) -> io::Result<LineRead> {
    let mut read_any = false;
    let mut overlong = false;

    loop {
        let available = fill(reader)?;
        if available.is_empty() {
            return Ok(match (read_any, overlong) {
                (false, _) => LineRead::Eof,
                (true, true) => LineRead::Overlong,
                (true, false) => LineRead::Line,
            });
        }
        read_any = true;

        let end = available.iter().position(|&b| b == b'\n' || b == b'\r');
        let chunk = &available[..end.unwrap_or(available.len())];
        if !overlong {
            if buf.len() + chunk.len() > max_len {
                overlong = true;
                buf.clear();
            } else {
                buf.extend_from_slice(chunk);
            }
        }

        let Some(i) = end else {
            let used = available.len();
            reader.consume(used);
            continue;
        };
        let ended_by_cr = available[i] == b'\r';
        reader.consume(i + 1);

        // `\r\n` is one terminator.
        if ended_by_cr && fill(reader)?.first() == Some(&b'\n') {
            reader.consume(1);
        }
        return Ok(if overlong { LineRead::Overlong } else { LineRead::Line });
    }
}

/// Parse an edge list from any buffered reader.
pub fn parse_reader<R: BufRead>(mut reader: R, options: &LoadOptions) -> io::Result<ParsedEdges> {
    let mut parsed = ParsedEdges::default();
    let mut buf: Vec<u8> = Vec::with_capacity(256);

    loop {
        buf.clear();
        let line = match read_line(&mut reader, &mut buf, MAX_LINE_BYTES)? {
            LineRead::Eof => break,
            LineRead::Line => classify(&buf, options.comment_prefix),
            LineRead::Overlong => Line::Malformed,
        };
        parsed.lines_read += 1;

        match line {
            Line::Edge(src, dst) => {
                let hi = src.max(dst);
                parsed.max_node_id = Some(parsed.max_node_id.map_or(hi, |m| m.max(hi)));
                parsed.edges.push((src, dst));
            }
            Line::WideId => parsed.wide_id_lines += 1,
            Line::Blank => parsed.blank_lines += 1,
            Line::Comment => parsed.comment_lines += 1,
            Line::Malformed => {
                parsed.skipped_lines += 1;
                if parsed.skipped_lines <= MAX_LOGGED_MALFORMED {
                    let content = String::from_utf8_lossy(&buf);
                    debug!(
                        line = parsed.lines_read,
                        content = %content.trim_end(),
                        overlong = buf.is_empty(),
                        "skipping malformed edge line"
                    );
                }
            }
        }
    }

    if parsed.skipped_lines > 0 {
        warn!(
            skipped = parsed.skipped_lines,
            lines = parsed.lines_read,
            "skipped malformed lines in edge list"
        );
    }
    if parsed.wide_id_lines > 0 {
        warn!(
            wide = parsed.wide_id_lines,
            max_id = NodeId::MAX,
            "skipped edges with ids wider than 32 bits"
        );
    }

    Ok(parsed)
}

/// Parse an edge-list file in a single streaming pass.
pub fn parse(path: &Path, options: &LoadOptions) -> Result<ParsedEdges, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);
    parse_reader(reader, options).map_err(|e| LoadError::from_io(path, e))
}
