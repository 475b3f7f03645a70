//! [`LikePattern`] definition.

use derive_more::{Display, Into};

/// `ILIKE` pattern matching any text containing the input as a substring.
///
/// Wildcards of the input are escaped, so they match themselves.
#[derive(Clone, Debug, Display, Eq, Into, PartialEq)]
pub struct LikePattern(String);

impl LikePattern {
    /// Creates a new [`LikePattern`] out of the given `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::LikePattern;

    #[test]
    fn wraps_input_into_wildcards() {
        assert_eq!(LikePattern::new("jane").to_string(), "%jane%");
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(
            LikePattern::new(r"100%_a\b").to_string(),
            r"%100\%\_a\\b%",
        );
    }
}
