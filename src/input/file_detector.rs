//! File type detection

use std::path::Path;

/// Container kind of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
}

impl FileType {
    /// Anything that is not a PDF or DOCX is read as plain text
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            _ => FileType::Text,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Text)
    }

    /// Whether a failed container read is worth retrying as plain text.
    /// A plain text read that failed would only fail again.
    pub fn has_text_fallback(&self) -> bool {
        !matches!(self, FileType::Text)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Text => "txt",
        }
    }
}
