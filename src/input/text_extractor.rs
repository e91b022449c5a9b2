//! Text extraction from various file formats

use crate::error::{CareerMatcherError, Result};
use regex::Regex;
use std::fs;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;

        // pdf-extract panics on some malformed content streams
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }))
        .map_err(|_| {
            CareerMatcherError::PdfExtraction(format!(
                "PDF parser aborted on '{}'",
                path.display()
            ))
        })?;

        extracted.map_err(|e| {
            CareerMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Reads the `word/document.xml` body of a DOCX container
#[derive(Debug, Clone)]
pub struct DocxExtractor {
    hidden_run_re: Regex,
    empty_paragraph_re: Regex,
    break_re: Regex,
    tab_re: Regex,
    tag_re: Regex,
    char_ref_re: Regex,
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            CareerMatcherError::DocxExtraction(format!(
                "'{}' is not a valid DOCX container: {}",
                path.display(),
                e
            ))
        })?;

        let mut document_xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                CareerMatcherError::DocxExtraction(format!(
                    "'{}' has no document body: {}",
                    path.display(),
                    e
                ))
            })?
            .read_to_string(&mut document_xml)?;

        Ok(self.xml_to_text(&document_xml))
    }
}

impl DocxExtractor {
    pub fn new() -> Self {
        Self {
            // field codes and tracked deletions are not visible text
            hidden_run_re: Regex::new(
                r"(?s)<w:instrText\b[^>]*>.*?</w:instrText>|<w:delText\b[^>]*>.*?</w:delText>",
            )
            .expect("Invalid hidden run regex"),
            empty_paragraph_re: Regex::new(r"<w:p\b[^>]*/>").expect("Invalid empty paragraph regex"),
            break_re: Regex::new(r"<w:(?:br|cr)\b[^>]*>").expect("Invalid break regex"),
            tab_re: Regex::new(r"<w:tab\b[^>]*/>").expect("Invalid tab regex"),
            tag_re: Regex::new(r"<[^>]*>").expect("Invalid tag regex"),
            char_ref_re: Regex::new(r"&#(?:[xX]([0-9A-Fa-f]+)|([0-9]+));")
                .expect("Invalid character reference regex"),
        }
    }

    /// One output line per `<w:p>` paragraph, empty paragraphs included
    fn xml_to_text(&self, xml: &str) -> String {
        let text = self.hidden_run_re.replace_all(xml, "");
        let text = self.empty_paragraph_re.replace_all(&text, "\n");
        let text = text.replace("</w:p>", "\n");
        let text = self.break_re.replace_all(&text, "\n");
        let text = self.tab_re.replace_all(&text, "\t");
        let text = self.tag_re.replace_all(&text, "");

        let text = text
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'");
        // `&amp;` last so an escaped reference like `&amp;#38;` stays literal
        let text = self.decode_char_refs(&text).replace("&amp;", "&");

        text.trim_end_matches('\n').to_string()
    }

    fn decode_char_refs(&self, text: &str) -> String {
        self.char_ref_re
            .replace_all(text, |caps: &regex::Captures| {
                let code = match (caps.get(1), caps.get(2)) {
                    (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                    (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                    (None, None) => None,
                };
                code.and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    /// Invalid UTF-8 sequences are replaced, never rejected
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
