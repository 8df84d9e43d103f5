//! Result output writers.

mod csv;
mod json;
pub mod progress;
mod text;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonResult, JsonResultFile, JsonResultWriter, JsonSummary};
pub use text::TextWriter;
pub use types::{ClassificationRecord, RunInfo};
pub use writer::OutputWriter;

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Create a writer for `format`, sending output to `path` or stdout.
pub fn create_writer(
    format: OutputFormat,
    path: Option<&Path>,
    run: RunInfo,
) -> Result<Box<dyn OutputWriter>> {
    let (sink, target): (Box<dyn Write>, String) = match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| Error::OutputWrite {
                target: path.display().to_string(),
                source: Box::new(e),
            })?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (
            Box::new(BufWriter::new(std::io::stdout())),
            "stdout".to_string(),
        ),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(TextWriter::new(sink)),
        OutputFormat::Csv => Box::new(CsvWriter::new(sink, target)),
        OutputFormat::Json => Box::new(JsonResultWriter::new(sink, target, run)),
    })
}
