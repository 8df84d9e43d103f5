//! Output writer trait definition.

use crate::error::Result;
use crate::output::ClassificationRecord;

/// Trait for writing classification results.
pub trait OutputWriter {
    /// Write the header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single result.
    fn write_result(&mut self, record: &ClassificationRecord) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
