//! Conversion report types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the pipeline did to one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStatistics {
    /// Total lines in the input
    pub total_lines: usize,
    /// Callouts converted, counted per normalized kind
    pub callout_counts: HashMap<String, usize>,
    /// Callouts whose kind was unsupported and fell back to an alias or the
    /// default kind
    pub callout_fallbacks: usize,
    /// Mermaid fence openers rewritten to the executable spelling
    pub mermaid_fences_rewritten: usize,
    /// Blank lines inserted before headers
    pub header_blanks_inserted: usize,
    /// Blank lines inserted before list runs
    pub list_blanks_inserted: usize,
}

impl ConversionStatistics {
    /// Increment the count for a callout kind.
    pub fn increment_callout(&mut self, kind: &str) {
        *self.callout_counts.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Total number of callouts converted.
    pub fn callouts_converted(&self) -> usize {
        self.callout_counts.values().sum()
    }
}

/// Complete report for one document conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Input file path (or "stdin")
    pub input_file: String,
    /// Output file path (or "stdout")
    pub output_file: String,
    /// Timestamp of conversion
    pub timestamp: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Conversion statistics
    pub statistics: ConversionStatistics,
}

impl ConversionReport {
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            input_file: input.to_string(),
            output_file: output.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            duration_ms: 0,
            statistics: ConversionStatistics::default(),
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to human-readable text format
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("GFM to Quarto Conversion Report\n");
        output.push_str("===============================\n");
        output.push_str(&format!("Input:  {}\n", self.input_file));
        output.push_str(&format!("Output: {}\n", self.output_file));
        output.push_str(&format!("Date:   {}\n", self.timestamp));
        output.push_str(&format!("Time:   {}ms\n\n", self.duration_ms));

        output.push_str("Statistics\n");
        output.push_str("----------\n");
        output.push_str(&format!("Total lines:        {}\n", self.statistics.total_lines));
        output.push_str(&format!(
            "Callouts:           {}\n",
            self.statistics.callouts_converted()
        ));
        output.push_str(&format!(
            "Callout fallbacks:  {}\n",
            self.statistics.callout_fallbacks
        ));
        output.push_str(&format!(
            "Mermaid fences:     {}\n",
            self.statistics.mermaid_fences_rewritten
        ));
        output.push_str(&format!(
            "Header spacing:     {} inserted\n",
            self.statistics.header_blanks_inserted
        ));
        output.push_str(&format!(
            "List spacing:       {} inserted\n",
            self.statistics.list_blanks_inserted
        ));

        if !self.statistics.callout_counts.is_empty() {
            output.push('\n');
            output.push_str("Callout kinds\n");
            output.push_str("-------------\n");
            let mut kinds: Vec<_> = self.statistics.callout_counts.iter().collect();
            kinds.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            for (kind, count) in kinds {
                output.push_str(&format!("✓ {}: {}\n", kind, count));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_increment() {
        let mut stats = ConversionStatistics::default();
        stats.increment_callout("note");
        stats.increment_callout("note");
        stats.increment_callout("tip");

        assert_eq!(stats.callout_counts.get("note"), Some(&2));
        assert_eq!(stats.callouts_converted(), 3);
    }

    #[test]
    fn test_report_to_json() {
        let report = ConversionReport::new("input.md", "output.qmd");
        let json = report.to_json().unwrap();
        assert!(json.contains("\"input_file\": \"input.md\""));
        assert!(json.contains("\"output_file\": \"output.qmd\""));
    }

    #[test]
    fn test_report_to_text() {
        let mut report = ConversionReport::new("input.md", "output.qmd");
        report.statistics.total_lines = 42;
        report.statistics.increment_callout("warning");

        let text = report.to_text();
        assert!(text.contains("Input:  input.md"));
        assert!(text.contains("Total lines:        42"));
        assert!(text.contains("✓ warning: 1"));
    }
}
