//! GFM to Quarto conversion pipeline
//!
//! This module rewrites GitHub-flavored markdown into Quarto markdown with a
//! fixed sequence of line-oriented passes:
//! - Callouts: `> [!note] ...` blockquotes become `::: {.callout-note}` divs
//! - Mermaid: ```` ```mermaid ```` fence openers become ```` ```{mermaid} ````
//! - Spacing: a blank line is inserted before headers and before the first
//!   item of a list run
//!
//! Every pass ignores the interior of fenced code blocks, and the pipeline as
//! a whole is idempotent: running it on its own output changes nothing.

mod callout;
mod fence;
mod mermaid;
mod options;
mod pipeline;
mod report;
mod spacing;

pub use callout::{CalloutKinds, CalloutState, CalloutTransformer};
pub use options::PipelineOptions;
pub use pipeline::Pipeline;
pub use report::{ConversionReport, ConversionStatistics};
