//! Input file discovery and batch classification.

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::Result;
use crate::inference::{Detector, SpeciesClassifier};
use crate::output::{OutputWriter, progress};
use crate::pipeline::process_file;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

/// Counts from one classification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Images classified successfully.
    pub processed: usize,
    /// Images resolved to a known species.
    pub identified: usize,
    /// Images that failed to decode or classify.
    pub errors: usize,
}

/// Classify `files` in order and write each record to `writer`.
///
/// Per-file failures are logged and counted. With `fail_fast` the first
/// failure finalizes the writer and is returned.
pub fn classify_batch<D: Detector>(
    files: &[PathBuf],
    classifier: &mut SpeciesClassifier<D>,
    writer: &mut dyn OutputWriter,
    fail_fast: bool,
    show_progress: bool,
) -> Result<RunSummary> {
    let start = Instant::now();
    let mut summary = RunSummary::default();

    writer.write_header()?;
    let file_progress = progress::create_image_progress(files.len(), show_progress);

    for file in files {
        match process_file(file, classifier) {
            Ok(record) => {
                summary.processed += 1;
                if record.class_index.is_some() {
                    summary.identified += 1;
                }
                writer.write_result(&record)?;
            }
            Err(e) => {
                error!("Failed to classify {}: {}", file.display(), e);
                summary.errors += 1;
                if fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    writer.finalize()?;
                    return Err(e);
                }
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");
    writer.finalize()?;

    info!(
        "Complete: {} classified ({} identified), {} errors in {:.2}s",
        summary.processed,
        summary.identified,
        summary.errors,
        start.elapsed().as_secs_f64()
    );
    if summary.errors > 0 {
        warn!("{} file(s) had errors", summary.errors);
    }

    Ok(summary)
}

/// Collect image files from paths (files and directories).
///
/// Directories are walked recursively and their files returned sorted;
/// explicitly named files keep their command-line order.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_image_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            let mut found = Vec::new();
            collect_image_files_recursive(path, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

/// Recursively collect image files from a directory.
fn collect_image_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_image_files_recursive(&path, files)?;
        } else if is_image_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file has a supported image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}
