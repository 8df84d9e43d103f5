//! Plain text output for terminals.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::Result;
use crate::output::{ClassificationRecord, OutputWriter};
use std::io::Write;

/// Writes one tab-separated line per image.
pub struct TextWriter {
    writer: Box<dyn Write>,
}

impl TextWriter {
    /// Create a text writer over any sink.
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl OutputWriter for TextWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_result(&mut self, record: &ClassificationRecord) -> Result<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{:.decimal$}",
            record.file_path.display(),
            record.species,
            record.confidence,
            decimal = DECIMAL_PLACES,
        )?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_text_writer_line_format() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = TextWriter::new(Box::new(File::create(file.path()).unwrap()));

        writer.write_header().unwrap();
        writer
            .write_result(&ClassificationRecord {
                file_path: PathBuf::from("photos/heron.jpg"),
                species: "Black-crowned Night Heron".to_string(),
                confidence: 0.8542,
                class_index: Some(3),
                duration_ms: 40.0,
            })
            .unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            contents,
            "photos/heron.jpg\tBlack-crowned Night Heron\t0.8542\n"
        );
    }
}
