// src/pdf/mod.rs
//
// Text-extraction collaborator. Transcripts arrive as PDFs; everything
// downstream works on plain text. Failures here skip the document,
// never the batch.

use crate::utils::error::PdfError;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Cheap structural check before handing bytes to the extractor.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Reads a source document and extracts its text content.
///
/// Fails loudly on anything that is not a well-formed PDF, or on a
/// scanned/image-only document that yields no text.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let bytes = std::fs::read(path)?;

    if !is_pdf(&bytes) {
        return Err(PdfError::Invalid(format!(
            "{} has no PDF header",
            path.display()
        )));
    }

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| PdfError::Extract(format!("{}: {}", path.display(), e)))?;

    if text.trim().is_empty() {
        return Err(PdfError::Extract(format!(
            "{} produced no text (scanned or image-only?)",
            path.display()
        )));
    }

    tracing::debug!("Extracted {} chars of text from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_byte_check() {
        assert!(is_pdf(b"%PDF-1.7 rest of file"));
        assert!(!is_pdf(b"<html>not a pdf</html>"));
        assert!(!is_pdf(b""));
    }

    #[test]
    fn non_pdf_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.pdf");
        std::fs::write(&path, "plain text pretending to be a pdf").unwrap();

        match extract_text(&path) {
            Err(PdfError::Invalid(_)) => {}
            other => panic!("expected Invalid, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.pdf");
        match extract_text(&path) {
            Err(PdfError::Io(_)) => {}
            other => panic!("expected Io, got {:?}", other.map(|_| ())),
        }
    }
}
