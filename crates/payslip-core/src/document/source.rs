//! Documents that can supply ordered page text.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Page separator emitted by text converters such as `pdftotext`.
pub const PAGE_BREAK: char = '\x0c';

/// A document exposing the text of each of its pages.
pub trait PageSource {
    /// Identifier used in reports, usually the file name.
    fn name(&self) -> &str;

    /// Text of every page, in page order.
    fn pages(&self) -> Result<Vec<String>, PdfError>;
}

/// Pages that are already available as text.
#[derive(Debug, Clone)]
pub struct TextDocument {
    name: String,
    pages: Vec<String>,
}

impl TextDocument {
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    /// Build a document from text whose pages are separated by form feeds.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let pages = text.split(PAGE_BREAK).map(str::to_string).collect();
        Self::new(name, pages)
    }
}

impl PageSource for TextDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn pages(&self) -> Result<Vec<String>, PdfError> {
        Ok(self.pages.clone())
    }
}

/// A PDF held in memory.
pub struct PdfDocument {
    name: String,
    data: Vec<u8>,
    config: PdfConfig,
}

impl PdfDocument {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            config: PdfConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }
}

impl PageSource for PdfDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn pages(&self) -> Result<Vec<String>, PdfError> {
        pdf_pages(&self.data, &self.config)
    }
}

/// A file on disk, read lazily when its pages are requested.
///
/// `.pdf` files go through the PDF extractor; anything else is read as
/// UTF-8 text with form-feed page breaks.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    name: String,
    config: PdfConfig,
}

impl FileDocument {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            config: PdfConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_pdf(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    }
}

impl PageSource for FileDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn pages(&self) -> Result<Vec<String>, PdfError> {
        if self.is_pdf() {
            let data = std::fs::read(&self.path).map_err(|e| PdfError::Read(e.to_string()))?;
            pdf_pages(&data, &self.config)
        } else {
            let text =
                std::fs::read_to_string(&self.path).map_err(|e| PdfError::Read(e.to_string()))?;
            Ok(TextDocument::from_text(self.name.clone(), &text).pages)
        }
    }
}

fn pdf_pages(data: &[u8], config: &PdfConfig) -> Result<Vec<String>, PdfError> {
    let mut extractor = PdfExtractor::new().with_empty_password(config.decrypt_with_empty_password);
    extractor.load(data)?;

    let mut pages = extractor.extract_pages()?;
    if config.max_pages > 0 && pages.len() > config.max_pages {
        debug!("Limiting {} pages to {}", pages.len(), config.max_pages);
        pages.truncate(config.max_pages);
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_document_splits_on_form_feed() {
        let doc = TextDocument::from_text("slips.txt", "page one\x0cpage two");
        assert_eq!(doc.name(), "slips.txt");
        assert_eq!(doc.pages().unwrap(), vec!["page one", "page two"]);
    }

    #[test]
    fn test_file_document_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("march.txt");
        std::fs::write(&path, "SNO: 1 EMP No 5\x0cSNO: 2 EMP No 6").unwrap();

        let doc = FileDocument::new(&path);
        assert_eq!(doc.name(), "march.txt");
        assert_eq!(doc.pages().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let doc = FileDocument::new("/nonexistent/slips.txt");
        assert!(matches!(doc.pages(), Err(PdfError::Read(_))));
    }

    #[test]
    fn test_corrupt_pdf_is_parse_error() {
        let doc = PdfDocument::new("broken.pdf", b"%PDF-1.4 truncated".to_vec());
        assert!(doc.pages().is_err());
    }
}
