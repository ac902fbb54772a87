//! Turn arbitrary path text into a legal, readable variable name
//!
//! Output identifiers are lowercase, use only ASCII letters, digits and
//! single underscores, never start with a digit and never start or end with
//! an underscore.

use once_cell::sync::Lazy;
use regex::Regex;

/// Any run of characters that cannot appear in an identifier
static NON_IDENT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Prepended to names that would otherwise start with a digit
pub const DEFAULT_DIGIT_PREFIX: &str = "v_";

/// Returned by [`sanitize_identifier`] when the input has no usable characters
pub const FALLBACK_IDENTIFIER: &str = "v";

/// Identifier sanitizer with a configurable digit guard
#[derive(Debug, Clone)]
pub struct Sanitizer {
    digit_prefix: String,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Sanitizer {
            digit_prefix: DEFAULT_DIGIT_PREFIX.to_string(),
        }
    }
}

impl Sanitizer {
    /// Create a sanitizer using `digit_prefix` as the digit guard.
    ///
    /// The prefix is itself cleaned up; a prefix that is empty after
    /// cleanup or starts with a digit falls back to `v_`.
    pub fn new(digit_prefix: &str) -> Self {
        let cleaned = NON_IDENT_RUN.replace_all(digit_prefix, "_");
        let cleaned = cleaned.trim_start_matches('_');

        if cleaned.is_empty() || cleaned.starts_with(|c: char| c.is_ascii_digit()) {
            tracing::warn!(prefix = digit_prefix, "unusable digit prefix, using default");
            return Sanitizer::default();
        }

        Sanitizer {
            digit_prefix: cleaned.to_ascii_lowercase(),
        }
    }

    pub fn digit_prefix(&self) -> &str {
        &self.digit_prefix
    }

    /// Sanitize `raw` into an identifier.
    ///
    /// Returns `None` when `raw` contains no ASCII letter or digit at all,
    /// since no meaningful name can be derived from it.
    pub fn sanitize(&self, raw: &str) -> Option<String> {
        let replaced = NON_IDENT_RUN.replace_all(raw, "_");
        let trimmed = replaced.trim_matches('_');
        if trimmed.is_empty() {
            return None;
        }

        let mut ident = String::with_capacity(self.digit_prefix.len() + trimmed.len());
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            ident.push_str(&self.digit_prefix);
        }
        ident.push_str(trimmed);
        ident.make_ascii_lowercase();

        Some(ident)
    }
}

/// Sanitize a path string with default settings.
///
/// ```
/// use json_vars::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("user.Address[0]"), "user_address_0");
/// assert_eq!(sanitize_identifier("1st"), "v_1st");
/// ```
pub fn sanitize_identifier(raw: &str) -> String {
    Sanitizer::default()
        .sanitize(raw)
        .unwrap_or_else(|| FALLBACK_IDENTIFIER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_become_underscores() {
        assert_eq!(sanitize_identifier("a.b"), "a_b");
        assert_eq!(sanitize_identifier("b.c"), "b_c");
        assert_eq!(sanitize_identifier("items[0]"), "items_0");
        assert_eq!(sanitize_identifier("items[12].name"), "items_12_name");
    }

    #[test]
    fn test_digit_guard() {
        assert_eq!(sanitize_identifier("1a"), "v_1a");
        assert_eq!(sanitize_identifier("[0]"), "v_0");
        assert_eq!(sanitize_identifier("[0].id"), "v_0_id");
    }

    #[test]
    fn test_collapse_and_trim() {
        assert_eq!(sanitize_identifier("a--__--b"), "a_b");
        assert_eq!(sanitize_identifier("__private__"), "private");
        assert_eq!(sanitize_identifier("trailing!!!"), "trailing");
        assert_eq!(sanitize_identifier("  spaced  key "), "spaced_key");
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(sanitize_identifier("userName.HTTPStatus"), "username_httpstatus");
    }

    #[test]
    fn test_non_ascii_is_replaced() {
        assert_eq!(sanitize_identifier("café.naïve"), "caf_na_ve");
    }

    #[test]
    fn test_nothing_usable() {
        let sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.sanitize(""), None);
        assert_eq!(sanitizer.sanitize("!!!"), None);
        assert_eq!(sanitizer.sanitize("é"), None);
        assert_eq!(sanitize_identifier("[]"), FALLBACK_IDENTIFIER);
    }

    #[test]
    fn test_idempotent() {
        for raw in ["a.b", "1a", "[0].X", "weird--key!!", "v_1a"] {
            let once = sanitize_identifier(raw);
            assert_eq!(sanitize_identifier(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn test_custom_prefix() {
        let sanitizer = Sanitizer::new("Field_");
        assert_eq!(sanitizer.sanitize("9lives").as_deref(), Some("field_9lives"));
        assert_eq!(sanitizer.digit_prefix(), "field_");
    }

    #[test]
    fn test_unusable_prefix_falls_back() {
        assert_eq!(Sanitizer::new("").digit_prefix(), DEFAULT_DIGIT_PREFIX);
        assert_eq!(Sanitizer::new("9_").digit_prefix(), DEFAULT_DIGIT_PREFIX);
        assert_eq!(Sanitizer::new("--").digit_prefix(), DEFAULT_DIGIT_PREFIX);
        assert_eq!(Sanitizer::new("x-").digit_prefix(), "x_");
    }
}
