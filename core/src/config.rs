/// Default comment prefix, as used by SNAP-style edge-list dumps.
pub const DEFAULT_COMMENT_PREFIX: char = '#';

/// Settings that shape a load.
///
/// The defaults accept plain `src dst` files with `#` comment lines and no
/// memory cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Lines starting with this character (after leading whitespace) are
    /// counted as comments instead of malformed. `None` disables comments.
    pub comment_prefix: Option<char>,
    /// Refuse to build when the CSR arrays would exceed this many MB.
    pub max_memory_mb: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            comment_prefix: Some(DEFAULT_COMMENT_PREFIX),
            max_memory_mb: None,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment_prefix(mut self, prefix: Option<char>) -> Self {
        self.comment_prefix = prefix;
        self
    }

    pub fn with_max_memory_mb(mut self, limit: Option<usize>) -> Self {
        self.max_memory_mb = limit;
        self
    }
}
