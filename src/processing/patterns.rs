//! Ordered "first pattern wins" matching

use regex::Regex;

/// One named extraction rule: a regex and the capture group holding the value
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub name: &'static str,
    regex: Regex,
    group: usize,
}

impl FieldPattern {
    /// Compile a rule. Only called with literal patterns or escaped labels.
    pub fn new(name: &'static str, pattern: &str, group: usize) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("Invalid {} pattern: {}", name, e));
        Self { name, regex, group }
    }

    /// Trimmed capture of the first match, if it is non-empty
    pub fn find(&self, text: &str) -> Option<String> {
        let captures = self.regex.captures(text)?;
        let value = captures.get(self.group)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Evaluate `patterns` in order and return the first non-empty capture
/// together with the rule that produced it.
pub fn first_match<'p>(patterns: &'p [FieldPattern], text: &str) -> Option<(&'p FieldPattern, String)> {
    patterns
        .iter()
        .find_map(|pattern| pattern.find(text).map(|value| (pattern, value)))
}
