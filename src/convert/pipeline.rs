//! Pass composition

use std::time::Instant;

use super::callout::convert_callouts;
use super::mermaid::convert_mermaid_fences;
use super::options::PipelineOptions;
use super::report::{ConversionReport, ConversionStatistics};
use super::spacing::{ensure_header_spacing, ensure_list_spacing};

/// The GFM to Quarto conversion pipeline.
///
/// Applies the passes in a fixed order: callouts, mermaid fences, header
/// spacing, list spacing. Callouts run first so that the spacing passes see
/// the emitted `:::` div markers as ordinary text rather than raw
/// `>`-prefixed blockquote lines.
///
/// Conversion is a pure function of the input text and the options, and it
/// is idempotent: converting its own output is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Converts one document, collecting statistics about what was changed.
    ///
    /// Lines are rejoined with `\n`; the output carries no trailing newline.
    pub fn convert_with_stats(&self, text: &str) -> (String, ConversionStatistics) {
        let mut stats = ConversionStatistics::default();
        let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        stats.total_lines = lines.len();

        let lines = convert_callouts(&lines, &self.options.callouts, &mut stats);
        let lines = convert_mermaid_fences(&lines, &mut stats);
        let lines = ensure_header_spacing(&lines, &mut stats);
        let lines = ensure_list_spacing(&lines, &mut stats);

        (lines.join("\n"), stats)
    }

    /// Converts one document.
    pub fn convert(&self, text: &str) -> String {
        self.convert_with_stats(text).0
    }

    /// Converts one document and builds a timed report for it.
    pub fn convert_with_report(
        &self,
        text: &str,
        input_name: &str,
        output_name: &str,
    ) -> (String, ConversionReport) {
        let start = Instant::now();
        let mut report = ConversionReport::new(input_name, output_name);
        let (converted, stats) = self.convert_with_stats(text);
        report.statistics = stats;
        report.duration_ms = start.elapsed().as_millis() as u64;
        (converted, report)
    }
}
