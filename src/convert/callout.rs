//! GFM blockquote callouts to Quarto div callouts
//!
//! A GFM callout is a blockquote whose first line carries a `[!kind]` marker:
//!
//! ```text
//! > [!note] Heads up
//! > Remember this
//! ```
//!
//! It is rewritten to a Quarto fenced div:
//!
//! ```text
//! ::: {.callout-note title="Heads up"}
//! Remember this
//! :::
//! ```
//!
//! The rewrite is a two-state machine over the line stream; a block left open
//! at end of input is closed with a synthesized `:::`.

use std::collections::HashMap;

use super::report::ConversionStatistics;

/// Callout kinds accepted by Quarto.
const SUPPORTED_KINDS: [&str; 5] = ["note", "tip", "important", "warning", "caution"];

/// Aliases for kinds Quarto does not support, mapped to a supported kind.
const KIND_ALIASES: [(&str, &str); 3] = [("quote", "note"), ("question", "tip"), ("example", "note")];

/// Kind used when a callout kind is neither supported nor aliased.
const DEFAULT_KIND: &str = "note";

/// Read-only table of callout kinds: the supported set, the alias fallbacks,
/// and the default kind for everything else.
#[derive(Debug, Clone)]
pub struct CalloutKinds {
    supported: Vec<String>,
    aliases: HashMap<String, String>,
    default_kind: String,
}

impl Default for CalloutKinds {
    fn default() -> Self {
        Self {
            supported: SUPPORTED_KINDS.iter().map(|s| s.to_string()).collect(),
            aliases: KIND_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            default_kind: DEFAULT_KIND.to_string(),
        }
    }
}

impl CalloutKinds {
    pub fn is_supported(&self, kind: &str) -> bool {
        self.supported.iter().any(|k| k == kind)
    }

    /// Normalizes a parsed kind: lowercase, then the alias table for
    /// unsupported kinds, then the default kind. Returns the normalized kind
    /// and whether a fallback was applied.
    pub fn normalize(&self, raw: &str) -> (String, bool) {
        let kind = raw.to_lowercase();
        if self.is_supported(&kind) {
            return (kind, false);
        }
        match self.aliases.get(&kind) {
            Some(alias) => (alias.clone(), true),
            None => (self.default_kind.clone(), true),
        }
    }
}

/// State of the callout scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalloutState {
    #[default]
    Outside,
    Inside,
}

/// Parses a callout start line: `>` at column 0, optional whitespace, `[!`,
/// an identifier of ASCII alphanumerics and `-`, `]`, then the title.
/// Returns the raw kind and the trimmed title.
fn parse_callout_start(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('>')?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix("[!")?;
    let ident_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len());
    if ident_len == 0 {
        return None;
    }
    let (ident, rest) = rest.split_at(ident_len);
    let title = rest.strip_prefix(']')?;
    Some((ident, title.trim()))
}

/// Formats the opening div marker for a callout.
fn opening_marker(kind: &str, title: &str) -> String {
    // Quote characters in titles are passed through unescaped.
    if title.is_empty() {
        format!("::: {{.callout-{}}}", kind)
    } else {
        format!("::: {{.callout-{} title=\"{}\"}}", kind, title)
    }
}

const CLOSING_MARKER: &str = ":::";

/// The callout rewrite state machine.
///
/// `step` consumes one input line and appends whatever the transition emits;
/// `finish` closes a block left open at end of input.
pub struct CalloutTransformer<'a> {
    kinds: &'a CalloutKinds,
    state: CalloutState,
}

impl<'a> CalloutTransformer<'a> {
    pub fn new(kinds: &'a CalloutKinds) -> Self {
        Self {
            kinds,
            state: CalloutState::Outside,
        }
    }

    pub fn state(&self) -> CalloutState {
        self.state
    }

    /// One transition of the state machine:
    /// - a callout start line closes any open block, opens a new one, and is
    ///   consumed (never re-emitted verbatim)
    /// - inside a block, `>`-continuation lines are emitted with one `>` and
    ///   one following space stripped; if the stripped line is itself a
    ///   callout start (a nested `[!kind]` marker), it opens a new block
    ///   instead of being emitted as body text, so no emitted line can parse
    ///   as a start on a later run
    /// - any other line inside a block closes it first, then is emitted
    ///   unmodified
    pub fn step(&mut self, line: &str, out: &mut Vec<String>, stats: &mut ConversionStatistics) {
        if let Some((raw_kind, title)) = parse_callout_start(line) {
            if self.state == CalloutState::Inside {
                out.push(CLOSING_MARKER.to_string());
            }
            let (kind, fell_back) = self.kinds.normalize(raw_kind);
            if fell_back {
                stats.callout_fallbacks += 1;
            }
            stats.increment_callout(&kind);
            out.push(opening_marker(&kind, title));
            self.state = CalloutState::Inside;
            return;
        }

        match self.state {
            CalloutState::Inside => {
                let trimmed = line.trim_start();
                if let Some(content) = trimmed.strip_prefix('>') {
                    let content = content.strip_prefix(' ').unwrap_or(content);
                    if parse_callout_start(content).is_some() {
                        self.step(content, out, stats);
                    } else {
                        out.push(content.to_string());
                    }
                } else {
                    out.push(CLOSING_MARKER.to_string());
                    self.state = CalloutState::Outside;
                    out.push(line.to_string());
                }
            }
            CalloutState::Outside => out.push(line.to_string()),
        }
    }

    /// Closes a dangling callout at end of input.
    pub fn finish(&mut self, out: &mut Vec<String>) {
        if self.state == CalloutState::Inside {
            out.push(CLOSING_MARKER.to_string());
            self.state = CalloutState::Outside;
        }
    }
}

/// Runs the callout pass over a whole document.
pub(crate) fn convert_callouts(
    lines: &[String],
    kinds: &CalloutKinds,
    stats: &mut ConversionStatistics,
) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut transformer = CalloutTransformer::new(kinds);
    for line in lines {
        transformer.step(line, &mut out, stats);
    }
    transformer.finish(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str) -> String {
        let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        let kinds = CalloutKinds::default();
        let mut stats = ConversionStatistics::default();
        convert_callouts(&lines, &kinds, &mut stats).join("\n")
    }

    #[test]
    fn test_parse_callout_start() {
        assert_eq!(
            parse_callout_start("> [!note] Heads up"),
            Some(("note", "Heads up"))
        );
        assert_eq!(parse_callout_start(">[!tip]"), Some(("tip", "")));
        assert_eq!(
            parse_callout_start(">   [!my-kind]   spaced title  "),
            Some(("my-kind", "spaced title"))
        );
        assert_eq!(parse_callout_start("> plain quote"), None);
        assert_eq!(parse_callout_start("  > [!note] indented"), None);
        assert_eq!(parse_callout_start("> [!]"), None);
        assert_eq!(parse_callout_start("> [!note"), None);
        assert_eq!(parse_callout_start("no quote"), None);
    }

    #[test]
    fn test_kind_normalization() {
        let kinds = CalloutKinds::default();
        assert_eq!(kinds.normalize("NOTE"), ("note".to_string(), false));
        assert_eq!(kinds.normalize("warning"), ("warning".to_string(), false));
        assert_eq!(kinds.normalize("quote"), ("note".to_string(), true));
        assert_eq!(kinds.normalize("question"), ("tip".to_string(), true));
        assert_eq!(kinds.normalize("danger"), ("note".to_string(), true));
    }

    #[test]
    fn test_basic_callout() {
        let out = convert("> [!note] Heads up\n> Remember this\nNormal text");
        assert_eq!(
            out,
            "::: {.callout-note title=\"Heads up\"}\nRemember this\n:::\nNormal text"
        );
    }

    #[test]
    fn test_callout_without_title() {
        let out = convert("> [!warning]\n> careful");
        assert_eq!(out, "::: {.callout-warning}\ncareful\n:::");
    }

    #[test]
    fn test_unsupported_kind_falls_back() {
        let out = convert("> [!quote]\n> hi");
        assert_eq!(out, "::: {.callout-note}\nhi\n:::");
    }

    #[test]
    fn test_unknown_kind_defaults_to_note() {
        let out = convert("> [!danger] Boom\n> body");
        assert_eq!(out, "::: {.callout-note title=\"Boom\"}\nbody\n:::");
    }

    #[test]
    fn test_dangling_callout_closed_at_eof() {
        let out = convert("> [!tip]\n> open ended");
        assert!(out.ends_with(":::"));
    }

    #[test]
    fn test_back_to_back_callouts() {
        let out = convert("> [!note] one\n> [!tip] two\n> body");
        assert_eq!(
            out,
            "::: {.callout-note title=\"one\"}\n:::\n::: {.callout-tip title=\"two\"}\nbody\n:::"
        );
    }

    #[test]
    fn test_continuation_strips_single_marker_and_space() {
        let out = convert("> [!note]\n>no space\n>  two spaces\n> > nested");
        assert_eq!(
            out,
            "::: {.callout-note}\nno space\n two spaces\n> nested\n:::"
        );
    }

    #[test]
    fn test_nested_marker_opens_a_new_callout() {
        // A continuation line carrying its own [!kind] marker must not be
        // emitted as body text: the stripped line would parse as a callout
        // start on a rerun.
        let out = convert("> [!note] t\n>> [!tip] x");
        assert_eq!(
            out,
            "::: {.callout-note title=\"t\"}\n:::\n::: {.callout-tip title=\"x\"}\n:::"
        );
        assert_eq!(convert(&out), out);

        // Same with a space between the nested markers.
        let out = convert("> [!note] t\n> > [!tip] x\n> body");
        assert_eq!(
            out,
            "::: {.callout-note title=\"t\"}\n:::\n::: {.callout-tip title=\"x\"}\nbody\n:::"
        );
        assert_eq!(convert(&out), out);
    }

    #[test]
    fn test_open_close_counts_balance() {
        let inputs = [
            "> [!note] a\n> b",
            "> [!note] a\n> [!tip] b\ntext",
            "plain\n> [!quote]\n",
            "> [!note]\n> body\nafter\n> [!warning] w\n> tail",
        ];
        for input in inputs {
            let out = convert(input);
            let opens = out.lines().filter(|l| l.starts_with("::: {")).count();
            let closes = out.lines().filter(|l| *l == ":::").count();
            assert_eq!(opens, closes, "unbalanced markers for input {:?}", input);
        }
    }

    #[test]
    fn test_statistics() {
        let lines: Vec<String> = "> [!note] a\ntext\n> [!quote]\n> b"
            .lines()
            .map(|l| l.to_string())
            .collect();
        let kinds = CalloutKinds::default();
        let mut stats = ConversionStatistics::default();
        convert_callouts(&lines, &kinds, &mut stats);
        assert_eq!(stats.callout_counts.get("note"), Some(&2));
        assert_eq!(stats.callout_fallbacks, 1);
    }
}
