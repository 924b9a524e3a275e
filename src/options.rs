/// Default limit on nested containers.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Per-call parser settings.
///
/// ```
/// use refjson::ParseOptions;
///
/// let opts = ParseOptions::new().with_circular_refs(false).with_max_depth(16);
/// assert!(!opts.circular_refs);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Replace `{"$ref": "#/..."}` markers with the ancestor they point to.
    /// When off, markers are returned as ordinary objects.
    pub circular_refs: bool,
    /// Maximum number of nested arrays and objects.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            circular_refs: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_circular_refs(mut self, enabled: bool) -> Self {
        self.circular_refs = enabled;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
