//! Blank-line spacing before headers and list runs
//!
//! Quarto is stricter than GFM about block separation: a header or a list
//! that follows a text line without a blank line in between is parsed as part
//! of the preceding paragraph. These two passes insert the missing blank
//! line, skipping anything inside fenced code blocks.

use super::fence::FenceTracker;
use super::report::ConversionStatistics;

/// Header line: one or more `#` followed by at least one whitespace character.
fn is_header_line(line: &str) -> bool {
    let rest = line.trim_start_matches('#');
    rest.len() < line.len() && rest.starts_with(|c: char| c.is_whitespace())
}

/// List item line: optional leading whitespace, then a bullet marker
/// (`-`, `*`, `+`) or a numeric marker (digits then `.`), then at least one
/// whitespace character.
fn is_list_item(line: &str) -> bool {
    let rest = line.trim_start();
    let after_marker = if let Some(after) = rest.strip_prefix(['-', '*', '+']) {
        after
    } else {
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return false;
        }
        match rest[digits..].strip_prefix('.') {
            Some(after) => after,
            None => return false,
        }
    };
    after_marker.starts_with(|c: char| c.is_whitespace())
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Inserts a blank line before each header whose preceding line is non-blank.
/// Headers inside fenced code are left alone; the fence toggle is evaluated
/// before the header check, so a fence opener is never treated as a header.
pub(crate) fn ensure_header_spacing(
    lines: &[String],
    stats: &mut ConversionStatistics,
) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut fences = FenceTracker::new();
    for line in lines {
        fences.observe(line);
        if !fences.in_fence()
            && is_header_line(line)
            && out.last().is_some_and(|prev: &String| !is_blank(prev))
        {
            out.push(String::new());
            stats.header_blanks_inserted += 1;
        }
        out.push(line.clone());
    }
    out
}

/// Inserts a blank line before the first item of each list run whose
/// preceding line is non-blank. Items after the first are left alone; a blank
/// line or a non-list text line ends the run, so a list item right after a
/// blank line starts a new run.
pub(crate) fn ensure_list_spacing(
    lines: &[String],
    stats: &mut ConversionStatistics,
) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut fences = FenceTracker::new();
    let mut in_list_block = false;
    for line in lines {
        fences.observe(line);
        if !fences.in_fence() {
            if is_list_item(line) {
                if !in_list_block && out.last().is_some_and(|prev: &String| !is_blank(prev)) {
                    out.push(String::new());
                    stats.list_blanks_inserted += 1;
                }
                in_list_block = true;
            } else {
                // Blank lines and ordinary text both end the run.
                in_list_block = false;
            }
        }
        out.push(line.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(text: &str) -> String {
        let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        let mut stats = ConversionStatistics::default();
        ensure_header_spacing(&lines, &mut stats).join("\n")
    }

    fn lists(text: &str) -> String {
        let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        let mut stats = ConversionStatistics::default();
        ensure_list_spacing(&lines, &mut stats).join("\n")
    }

    #[test]
    fn test_header_classification() {
        assert!(is_header_line("# Title"));
        assert!(is_header_line("### deep"));
        assert!(!is_header_line("#nospace"));
        assert!(!is_header_line("#"));
        assert!(!is_header_line("text # not a header"));
    }

    #[test]
    fn test_list_classification() {
        assert!(is_list_item("- a"));
        assert!(is_list_item("  * b"));
        assert!(is_list_item("+ c"));
        assert!(is_list_item("12. item"));
        assert!(!is_list_item("-nospace"));
        assert!(!is_list_item("1two"));
        assert!(!is_list_item("1."));
        assert!(!is_list_item("word - dash"));
    }

    #[test]
    fn test_blank_inserted_before_header() {
        assert_eq!(headers("text\n# Title"), "text\n\n# Title");
    }

    #[test]
    fn test_header_at_document_start() {
        assert_eq!(headers("# Title\ntext"), "# Title\ntext");
    }

    #[test]
    fn test_header_already_spaced() {
        assert_eq!(headers("text\n\n# Title"), "text\n\n# Title");
    }

    #[test]
    fn test_header_inside_fence_ignored() {
        let input = "text\n```\n# not a real header\n```";
        assert_eq!(headers(input), input);
    }

    #[test]
    fn test_blank_before_first_list_item_only() {
        assert_eq!(lists("text\n- a\n- b\n- c"), "text\n\n- a\n- b\n- c");
    }

    #[test]
    fn test_list_at_document_start() {
        assert_eq!(lists("- a\n- b\n- c"), "- a\n- b\n- c");
    }

    #[test]
    fn test_blank_line_starts_a_new_run() {
        // The blank line exits list context, so "c" starts a new run, but its
        // preceding line is already blank.
        assert_eq!(lists("- a\n- b\n\n- c"), "- a\n- b\n\n- c");
    }

    #[test]
    fn test_text_between_lists() {
        assert_eq!(
            lists("- a\ninterlude\n- b"),
            "- a\ninterlude\n\n- b"
        );
    }

    #[test]
    fn test_list_inside_fence_ignored() {
        let input = "text\n```\n- not a list\n```";
        assert_eq!(lists(input), input);
    }

    #[test]
    fn test_numbered_list_spacing() {
        assert_eq!(lists("intro\n1. one\n2. two"), "intro\n\n1. one\n2. two");
    }
}
