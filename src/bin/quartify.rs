//! quartify - Convert one GFM document to Quarto markdown
//!
//! Usage:
//!   quartify -f note.md -o note.qmd
//!   quartify -f note.md --report report.json
//!   cat note.md | quartify > note.qmd

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser as ClapParser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use quartify::convert::{ConversionReport, Pipeline, PipelineOptions};

#[derive(ValueEnum, Clone, Debug)]
enum ReportFormat {
    /// JSON format
    Json,
    /// Human-readable text
    Text,
}

#[derive(ClapParser)]
#[command(
    version,
    about = "Convert a GFM markdown document to Quarto markdown",
    long_about = "Rewrites GitHub-flavored markdown into Quarto markdown:\n\n\
                  - blockquote callouts become ::: div callouts\n\
                  - ```mermaid fences become executable ```{mermaid} fences\n\
                  - headers and lists get a separating blank line\n\n\
                  If no input file is specified, reads from stdin.\n\
                  If no output file is specified, writes to stdout."
)]
struct Cli {
    /// Input markdown file (reads from stdin if not specified)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output quarto file (writes to stdout if not specified)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Generate conversion report
    #[arg(long, value_name = "REPORT_FILE")]
    report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    report_format: ReportFormat,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.verbose.log_level_filter(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let (input_content, input_name) = match &args.file {
        Some(path) => (fs::read_to_string(path)?, path.display().to_string()),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, "stdin".to_string())
        }
    };

    let output_name = args
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    let pipeline = Pipeline::new(PipelineOptions::default());
    let (converted, report) = pipeline.convert_with_report(&input_content, &input_name, &output_name);

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(fs::File::create(path)?);
            writer.write_all(converted.as_bytes())?;
            writer.flush()?;
            log::info!(
                "converted {} -> {} ({} callouts, {} mermaid fences)",
                input_name,
                path.display(),
                report.statistics.callouts_converted(),
                report.statistics.mermaid_fences_rewritten
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            writer.write_all(converted.as_bytes())?;
            writer.flush()?;
        }
    }

    if let Some(report_path) = &args.report {
        write_report(&report, report_path, &args.report_format)?;
        log::info!("report written to {}", report_path.display());
    }

    Ok(())
}

fn write_report(report: &ConversionReport, path: &Path, format: &ReportFormat) -> Result<()> {
    let content = match format {
        ReportFormat::Json => report.to_json()?,
        ReportFormat::Text => report.to_text(),
    };
    fs::write(path, content)?;
    Ok(())
}
