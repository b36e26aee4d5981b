//! Text extraction capabilities keyed by file type

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::FileType;

/// A capability that turns a downloaded file into plain text
pub trait TextExtractor: Send + Sync {
    /// Extract plain text from the file at `path`
    fn extract(&self, path: &Path) -> Result<String>;

    /// Extractor name for logging
    fn name(&self) -> &str;
}

/// PDF text extractor backed by the `pdf-extract` crate
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let file_name = path.display().to_string();
        let text = pdf_extract::extract_text(path)
            .map_err(|e| Error::extraction(file_name, format!("PDF extraction failed: {}", e)))?;
        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

/// Plain text reader; also the fallback for unrecognized file types
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::extraction(path.display().to_string(), e.to_string()))?;
        // Tolerate invalid UTF-8 rather than refusing the file.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Extractor lookup keyed by detected file type
///
/// Extraction failures degrade to a bracketed diagnostic string instead
/// of aborting the document, so a document with an unreadable body still
/// flows through the pipeline (and typically yields zero useful chunks).
pub struct ExtractorRegistry {
    pdf: Box<dyn TextExtractor>,
    fallback: Box<dyn TextExtractor>,
}

impl ExtractorRegistry {
    /// Registry with the built-in PDF and plain-text extractors
    pub fn new() -> Self {
        Self {
            pdf: Box::new(PdfExtractor),
            fallback: Box::new(PlainTextExtractor),
        }
    }

    /// Select the extractor for a file type
    fn extractor_for(&self, file_type: FileType) -> &dyn TextExtractor {
        match file_type {
            FileType::Pdf => self.pdf.as_ref(),
            FileType::Text | FileType::Unknown => self.fallback.as_ref(),
        }
    }

    /// Extract text from a downloaded file, dispatching on the original
    /// file name's extension
    pub fn extract_text(&self, path: &Path, file_name: &str) -> String {
        let file_type = FileType::from_file_name(file_name);
        let extractor = self.extractor_for(file_type);
        tracing::debug!(file_name, extractor = extractor.name(), "extracting text");

        match extractor.extract(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(file_name, error = %e, "extraction degraded to diagnostic text");
                format!("[{}]", e)
            }
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_text_extraction() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello from a text file").unwrap();

        let registry = ExtractorRegistry::new();
        let text = registry.extract_text(file.path(), "notes.txt");
        assert_eq!(text, "hello from a text file");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_plain_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "raw bytes as text").unwrap();

        let registry = ExtractorRegistry::new();
        let text = registry.extract_text(file.path(), "blob.dat");
        assert_eq!(text, "raw bytes as text");
    }

    #[test]
    fn test_failed_extraction_degrades_to_diagnostic() {
        // A text file that is not a PDF: the PDF extractor fails and the
        // registry substitutes a bracketed diagnostic instead of erroring.
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is not a pdf").unwrap();

        let registry = ExtractorRegistry::new();
        let text = registry.extract_text(file.path(), "broken.pdf");
        assert!(text.starts_with('['));
        assert!(text.ends_with(']'));
    }

    #[test]
    fn test_missing_file_degrades_to_diagnostic() {
        let registry = ExtractorRegistry::new();
        let text = registry.extract_text(Path::new("/nonexistent/file.txt"), "file.txt");
        assert!(text.starts_with('['));
    }
}
