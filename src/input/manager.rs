//! Input manager for handling different file types

use crate::error::Result;
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Turns a document of any supported container kind into one text blob.
///
/// Extraction never fails past this type: a broken container falls back to
/// reading the bytes as text, and an unreadable source yields an empty
/// string. Callers treat an empty result as "no data extracted".
#[derive(Debug, Clone)]
pub struct InputManager {
    upload_dir: PathBuf,
    docx: DocxExtractor,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            upload_dir: std::env::temp_dir(),
            docx: DocxExtractor::new(),
        }
    }

    /// Directory used to spool uploads while they are extracted
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    pub fn extract_text(&self, path: &Path) -> String {
        let file_type = FileType::from_path(path);

        match self.extract_with(file_type, path) {
            Ok(text) => text,
            Err(e) if !file_type.has_text_fallback() => {
                warn!("Could not read {}: {}", path.display(), e);
                String::new()
            }
            Err(e) => {
                warn!(
                    "{:?} extraction failed for {}: {}; retrying as plain text",
                    file_type,
                    path.display(),
                    e
                );
                PlainTextExtractor.extract(path).unwrap_or_else(|e| {
                    warn!("Could not read {} as plain text: {}", path.display(), e);
                    String::new()
                })
            }
        }
    }

    /// Extract an uploaded document.
    ///
    /// The bytes are spooled to a temporary file that is removed before this
    /// returns, whatever the outcome.
    pub fn extract_upload(&self, file_name: &str, bytes: &[u8]) -> String {
        let suffix = format!(".{}", FileType::from_path(Path::new(file_name)).extension());

        let spooled = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(&self.upload_dir)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.flush()?;
                Ok(file)
            });

        match spooled {
            Ok(file) => {
                debug!("Spooled upload {} to {}", file_name, file.path().display());
                let text = self.extract_text(file.path());
                if let Err(e) = file.close() {
                    warn!("Could not remove spooled upload {}: {}", file_name, e);
                }
                text
            }
            Err(e) => {
                warn!("Could not spool upload {}: {}", file_name, e);
                String::new()
            }
        }
    }

    fn extract_with(&self, file_type: FileType, path: &Path) -> Result<String> {
        match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path)
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                self.docx.extract(path)
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path)
            }
        }
    }
}
