//! Mermaid fence rewriting
//!
//! Quarto renders ```` ```{mermaid} ```` blocks as diagrams, while a bare
//! ```` ```mermaid ```` fence is shown as static code. This pass rewrites the
//! opener to the executable spelling and leaves the fence body and the bare
//! closing fence alone, so opens and closes stay paired.

use super::fence::FENCE_MARKER;
use super::report::ConversionStatistics;

const EXECUTABLE_MERMAID: &str = "```{mermaid}";

/// Returns true for a line of optional leading whitespace, the fence marker,
/// the literal tag `mermaid`, then end of line or a non-word character.
fn is_mermaid_opener(line: &str) -> bool {
    let rest = match line.trim_start().strip_prefix(FENCE_MARKER) {
        Some(rest) => rest,
        None => return false,
    };
    match rest.strip_prefix("mermaid") {
        Some(tail) => match tail.chars().next() {
            None => true,
            // Word characters extend the tag (Unicode letters and digits,
            // plus underscore), so `mermaidjs` or `mermaidé` is another
            // language, not a mermaid fence.
            Some(c) => !(c.is_alphanumeric() || c == '_'),
        },
        None => false,
    }
}

/// Rewrites mermaid fence openers over a whole document. Mermaid fences do
/// not nest, so no fence state is needed.
pub(crate) fn convert_mermaid_fences(
    lines: &[String],
    stats: &mut ConversionStatistics,
) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            if is_mermaid_opener(line) {
                stats.mermaid_fences_rewritten += 1;
                EXECUTABLE_MERMAID.to_string()
            } else {
                line.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str) -> String {
        let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        let mut stats = ConversionStatistics::default();
        convert_mermaid_fences(&lines, &mut stats).join("\n")
    }

    #[test]
    fn test_opener_detection() {
        assert!(is_mermaid_opener("```mermaid"));
        assert!(is_mermaid_opener("  ```mermaid"));
        assert!(is_mermaid_opener("```mermaid extra"));
        assert!(!is_mermaid_opener("```"));
        assert!(!is_mermaid_opener("```mermaidfoo"));
        assert!(!is_mermaid_opener("```mermaidé"));
        assert!(!is_mermaid_opener("```mermaid_js"));
        assert!(is_mermaid_opener("```mermaid-v2"));
        assert!(!is_mermaid_opener("```{mermaid}"));
        assert!(!is_mermaid_opener("```python"));
    }

    #[test]
    fn test_rewrites_opener_only() {
        let out = convert("```mermaid\ngraph TD;\n```");
        assert_eq!(out, "```{mermaid}\ngraph TD;\n```");
    }

    #[test]
    fn test_idempotent() {
        let once = convert("```mermaid\ngraph TD;\n```");
        assert_eq!(convert(&once), once);
    }

    #[test]
    fn test_body_mentioning_mermaid_untouched() {
        let out = convert("```text\nuse mermaid here\n```");
        assert_eq!(out, "```text\nuse mermaid here\n```");
    }
}
