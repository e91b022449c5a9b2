//! Text processing and normalization

use regex::Regex;

/// Marker appended to any value cut short by [`truncate_with_marker`]
pub const TRUNCATION_MARKER: &str = "...";

pub struct TextProcessor {
    whitespace_regex: Regex,
    disallowed_regex: Regex,
    horizontal_space_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        let disallowed_regex =
            Regex::new(r"[^\w\s@.\-+()]").expect("Invalid character whitelist regex");

        let horizontal_space_regex =
            Regex::new(r"[^\S\n]+").expect("Invalid horizontal whitespace regex");

        Self {
            whitespace_regex,
            disallowed_regex,
            horizontal_space_regex,
        }
    }

    /// Collapse whitespace and blank out everything outside the character
    /// whitelist (word characters, whitespace, `@ . - + ( )`).
    ///
    /// Every field pattern except section capture runs on this form.
    pub fn normalize(&self, text: &str) -> String {
        let collapsed = self.whitespace_regex.replace_all(text, " ");
        let stripped = self.disallowed_regex.replace_all(&collapsed, " ");
        self.whitespace_regex
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }

    /// Line-preserving cleanup used for section capture: unified line
    /// endings, one space between words, trimmed lines.
    pub fn light_clean(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");

        unified
            .lines()
            .map(|line| {
                self.horizontal_space_regex
                    .replace_all(line, " ")
                    .trim()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

/// Cut `text` to `max_chars` characters, appending the truncation marker
/// only when something was dropped.
pub fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}{}", kept, TRUNCATION_MARKER)
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
/// (`machine learning` -> `Machine Learning`, `c++` -> `C++`, `sql` -> `Sql`).
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}
