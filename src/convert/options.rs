//! Pipeline configuration

use super::callout::CalloutKinds;

/// Options for the conversion pipeline.
///
/// The pipeline owns its configuration; there is no process-wide mutable
/// state. The defaults match what Quarto accepts and are right for almost
/// every caller.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Callout kind table: supported kinds, alias fallbacks, default kind.
    pub callouts: CalloutKinds,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the callout kind table.
    pub fn with_callouts(mut self, callouts: CalloutKinds) -> Self {
        self.callouts = callouts;
        self
    }
}
