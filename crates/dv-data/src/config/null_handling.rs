//! Null value handling for data loading

/// Which raw cells count as absent before coercion
#[derive(Debug, Clone, PartialEq)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: ["", "-", "N/A", "null", "None", "NaN"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Only empty cells are null
    pub fn empty_only() -> Self {
        Self {
            patterns: vec![String::new()],
            ..Self::default()
        }
    }

    /// Check if a cell should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let value = if self.trim_whitespace { value.trim() } else { value };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                value == pattern
            } else {
                value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns() {
        let config = NullConfig::default();
        assert!(config.is_null(""));
        assert!(config.is_null("   "));
        assert!(config.is_null("n/a"));
        assert!(config.is_null("NULL"));
        assert!(!config.is_null("0"));
        assert!(!config.is_null("disk"));
    }

    #[test]
    fn test_case_sensitive_and_custom_patterns() {
        let config = NullConfig {
            case_sensitive: true,
            ..NullConfig::empty_only()
        }
        .with_pattern("?");
        assert!(config.is_null("?"));
        assert!(config.is_null(" "));
        assert!(!config.is_null("null"));
    }
}
