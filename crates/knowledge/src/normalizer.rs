use regex::Regex;

/// Turns the model's free-text names into stable snake_case keys.
pub struct KeyNormalizer {
    separators: Regex,
    quotes: Regex,
}

impl KeyNormalizer {
    pub fn new() -> Self {
        Self {
            // Anything that is not a letter or digit separates words
            separators: Regex::new(r"[^\p{L}\p{N}]+").expect("valid separator pattern"),
            quotes: Regex::new(r#"['’"`]"#).expect("valid quote pattern"),
        }
    }

    /// "Eye Color" -> "eye_color", "father-of" -> "father_of"
    pub fn normalize_key(&self, name: &str) -> String {
        let lowered = name.trim().to_lowercase();
        let unquoted = self.quotes.replace_all(&lowered, "");
        let joined = self.separators.replace_all(&unquoted, "_");
        joined.trim_matches('_').to_string()
    }

    /// Trim and collapse inner whitespace; case is kept.
    pub fn normalize_text(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
