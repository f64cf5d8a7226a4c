//! Batch conversion over a directory tree
//!
//! Walks a source tree, converts every markdown file through the pipeline,
//! and mirrors the result into a destination tree with the extension
//! normalized to `.qmd`. A destination file is only rewritten when its
//! content actually changed, so repeated runs over an unchanged source tree
//! touch nothing. An `attachments/` directory directly under the source root
//! is copied over verbatim.
//!
//! Per-file failures are logged and counted but never abort the walk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::convert::Pipeline;

/// Source extensions picked up by the walk, compared case-insensitively.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["md", "qmd", "rmd", "markdown"];

/// Every converted file is written with this extension.
pub const DEST_EXTENSION: &str = "qmd";

/// Name of the asset directory mirrored without conversion.
pub const ATTACHMENTS_DIR: &str = "attachments";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid walk pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// What happened to one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Destination was written (or would have been, under dry-run)
    Written,
    /// Destination already had identical content; nothing was written
    Unchanged,
}

/// Counts for one batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// True if the path carries one of the recognized markdown extensions.
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            SOURCE_EXTENSIONS.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

/// Maps a source file to its destination: the source prefix is swapped for
/// the destination prefix and the extension becomes `.qmd`.
pub fn destination_path(source_root: &Path, dest_root: &Path, file: &Path) -> PathBuf {
    let relative = file.strip_prefix(source_root).unwrap_or(file);
    dest_root.join(relative).with_extension(DEST_EXTENSION)
}

/// Drives the pipeline over a directory tree.
pub struct BatchConverter {
    pipeline: Pipeline,
    dry_run: bool,
}

impl BatchConverter {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    /// Report what would be written without touching the destination tree.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Converts every matching file under `source` into `dest`, then mirrors
    /// the attachments directory. Per-file errors are logged and counted in
    /// the summary; only a broken walk pattern aborts the run.
    pub fn run(&self, source: &Path, dest: &Path) -> Result<BatchSummary, BatchError> {
        let start = Instant::now();
        let mut summary = BatchSummary::default();

        // The source root is literal text, not a pattern; escape it so
        // directories containing `[`, `?` or `*` still walk correctly.
        let root = glob::Pattern::escape(&source.to_string_lossy());
        let pattern = format!("{}/**/*", root);
        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("skipping unreadable entry: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };
            if !path.is_file() || !has_source_extension(&path) {
                continue;
            }

            let dest_path = destination_path(source, dest, &path);
            match self.process_file(&path, &dest_path) {
                Ok(FileOutcome::Written) => {
                    log::info!("processed: {} -> {}", path.display(), dest_path.display());
                    summary.processed += 1;
                }
                Ok(FileOutcome::Unchanged) => {
                    log::info!("unchanged: {}", path.display());
                    summary.unchanged += 1;
                }
                Err(e) => {
                    log::error!("{}", e);
                    summary.failed += 1;
                }
            }
        }

        if let Err(e) = self.copy_attachments(source, dest) {
            log::error!("{}", e);
            summary.failed += 1;
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        Ok(summary)
    }

    /// Converts one file, skipping the write when the destination already
    /// holds identical bytes.
    pub fn process_file(&self, src: &Path, dst: &Path) -> Result<FileOutcome, BatchError> {
        let content = fs::read_to_string(src).map_err(|e| BatchError::Read {
            path: src.to_path_buf(),
            source: e,
        })?;

        let converted = self.pipeline.convert(&content);

        if let Ok(existing) = fs::read(dst) {
            if existing == converted.as_bytes() {
                return Ok(FileOutcome::Unchanged);
            }
        }

        if self.dry_run {
            return Ok(FileOutcome::Written);
        }

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|e| BatchError::Write {
                path: dst.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(dst, converted).map_err(|e| BatchError::Write {
            path: dst.to_path_buf(),
            source: e,
        })?;

        Ok(FileOutcome::Written)
    }

    /// Mirrors `attachments/` under the source root into the destination
    /// root, merging into any existing tree and overwriting files. Contents
    /// are copied verbatim, never converted.
    fn copy_attachments(&self, source: &Path, dest: &Path) -> Result<(), BatchError> {
        let src_attachments = source.join(ATTACHMENTS_DIR);
        if !src_attachments.is_dir() {
            return Ok(());
        }
        if self.dry_run {
            log::info!("would copy attachments from {}", src_attachments.display());
            return Ok(());
        }
        copy_dir_recursive(&src_attachments, &dest.join(ATTACHMENTS_DIR))
    }
}

fn copy_dir_recursive(from: &Path, to: &Path) -> Result<(), BatchError> {
    let copy_err = |e: std::io::Error| BatchError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    };
    fs::create_dir_all(to).map_err(copy_err)?;
    for entry in fs::read_dir(from).map_err(copy_err)? {
        let entry = entry.map_err(copy_err)?;
        let target = to.join(entry.file_name());
        if entry.file_type().map_err(copy_err)?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| BatchError::Copy {
                from: entry.path(),
                to: target.clone(),
                source: e,
            })?;
        }
    }
    Ok(())
}
