//! Resume parsing: document in, candidate record out

use crate::config::ExtractionConfig;
use crate::error::{CareerMatcherError, Result};
use crate::input::InputManager;
use crate::processing::candidate::CandidateRecord;
use crate::processing::field_extractor::FieldExtractor;
use log::info;
use std::path::Path;

pub struct ResumeParser {
    input: InputManager,
    fields: FieldExtractor,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl ResumeParser {
    pub fn new(limits: ExtractionConfig) -> Self {
        Self {
            input: InputManager::new(),
            fields: FieldExtractor::new(limits),
        }
    }

    pub fn with_input_manager(mut self, input: InputManager) -> Self {
        self.input = input;
        self
    }

    /// Parse a resume on disk.
    ///
    /// Only a document with no usable text is an error; missing fields are
    /// left empty (or `Unknown` for the name).
    pub fn parse(&self, path: &Path) -> Result<CandidateRecord> {
        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = self.input.extract_text(path);
        self.parse_text(&text, &source_file)
    }

    /// Parse an uploaded document held in memory
    pub fn parse_upload(&self, file_name: &str, bytes: &[u8]) -> Result<CandidateRecord> {
        let source_file = Path::new(file_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());

        let text = self.input.extract_upload(file_name, bytes);
        self.parse_text(&text, &source_file)
    }

    pub fn parse_text(&self, text: &str, source_file: &str) -> Result<CandidateRecord> {
        if text.trim().is_empty() {
            return Err(CareerMatcherError::EmptyInput(source_file.to_string()));
        }

        let record = self.fields.extract_record(text, source_file);
        info!(
            "Parsed resume {}: {} ({} skills)",
            source_file,
            record.name,
            record.skills.len()
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_text_resume() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("john.txt");
        std::fs::write(&path, "John Doe\n\nSKILLS: Python, SQL").unwrap();

        let record = ResumeParser::default().parse(&path).unwrap();

        assert_eq!(record.name, "John Doe");
        assert!(record.skills.contains(&"Python".to_string()));
        assert!(record.skills.contains(&"Sql".to_string()));
        assert_eq!(record.source_file, "john.txt");
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let result = ResumeParser::default().parse(&path);

        assert!(matches!(result, Err(CareerMatcherError::EmptyInput(_))));
    }

    #[test]
    fn test_whitespace_only_text_is_an_error() {
        let result = ResumeParser::default().parse_text(" \n\t\n ", "blank.txt");
        assert!(matches!(result, Err(CareerMatcherError::EmptyInput(_))));
    }

    #[test]
    fn test_upload_keeps_base_name() {
        let dir = TempDir::new().unwrap();
        let parser = ResumeParser::default()
            .with_input_manager(InputManager::new().with_upload_dir(dir.path()));

        let record = parser
            .parse_upload("../uploads/jane.txt", b"Jane Smith\nSoftware Engineer")
            .unwrap();

        assert_eq!(record.name, "Jane Smith");
        assert_eq!(record.source_file, "jane.txt");
    }
}
