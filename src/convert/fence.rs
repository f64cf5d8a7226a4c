//! Code fence tracking shared by the rewrite passes

/// The fence delimiter marker.
pub(crate) const FENCE_MARKER: &str = "```";

/// Returns true if the line is a code-fence delimiter: after stripping
/// leading whitespace it starts with the three-backtick marker.
pub(crate) fn is_fence_delimiter(line: &str) -> bool {
    line.trim_start().starts_with(FENCE_MARKER)
}

/// Tracks whether the scanner is currently inside a fenced code block.
///
/// One tracker is owned by one pass over one document; state never leaks
/// across passes or documents. The tracker does not pair fences by language,
/// it simply toggles on every delimiter line.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    in_fence: bool,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Observes one line, toggling on delimiter lines. Returns true if the
    /// line was a delimiter.
    pub(crate) fn observe(&mut self, line: &str) -> bool {
        if is_fence_delimiter(line) {
            self.in_fence = !self.in_fence;
            true
        } else {
            false
        }
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.in_fence
    }
}
