//! quartify-batch - Convert a tree of GFM notes to Quarto markdown
//!
//! Usage:
//!   quartify-batch ./notes ./site
//!   quartify-batch ./notes ./site --dry-run
//!
//! Walks the source tree, converts every .md/.qmd/.rmd/.markdown file into a
//! mirrored .qmd file under the destination, skips files whose output is
//! already up to date, and copies an attachments/ directory verbatim.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser as ClapParser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use quartify::batch::BatchConverter;
use quartify::convert::{Pipeline, PipelineOptions};

#[derive(ClapParser)]
#[command(version, about = "Convert a directory of GFM notes to Quarto markdown")]
struct Cli {
    /// Source folder
    input_dir: PathBuf,

    /// Destination folder
    output_dir: PathBuf,

    /// Show what would be converted without writing
    #[arg(long)]
    dry_run: bool,

    /// Write the run summary as JSON to this file
    #[arg(long, value_name = "REPORT_FILE")]
    report: Option<PathBuf>,

    /// debug log file
    #[arg(short, long, value_name = "FILE")]
    debuglogfile: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn init_logger(filter_level: log::LevelFilter, logfile: Option<PathBuf>) -> Result<()> {
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];
    if let Some(filename) = logfile {
        loggers.push(simplelog::WriteLogger::new(
            filter_level,
            simplelog::Config::default(),
            File::create(filename)?,
        ));
    }
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose.log_level_filter(), args.debuglogfile.clone())?;

    anyhow::ensure!(
        args.input_dir.is_dir(),
        "input directory '{}' does not exist",
        args.input_dir.display()
    );

    log::info!(
        "starting conversion: {} -> {}",
        args.input_dir.display(),
        args.output_dir.display()
    );

    let pipeline = Pipeline::new(PipelineOptions::default());
    let converter = BatchConverter::new(pipeline).with_dry_run(args.dry_run);
    let summary = converter.run(&args.input_dir, &args.output_dir)?;

    eprintln!("\nBatch Conversion Summary");
    eprintln!("========================");
    eprintln!("Processed: {}", summary.processed);
    eprintln!("Unchanged: {}", summary.unchanged);
    eprintln!("Failed:    {}", summary.failed);
    eprintln!("Duration:  {}ms", summary.duration_ms);

    if args.dry_run {
        eprintln!("\n(Dry run - no files were written)");
    }

    if let Some(report_path) = &args.report {
        std::fs::write(report_path, serde_json::to_string_pretty(&summary)?)?;
        log::info!("report written to {}", report_path.display());
    }

    // Per-file failures are already reported; the exit status only reflects
    // whether the run itself completed.
    Ok(())
}
