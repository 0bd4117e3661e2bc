use std::fmt;

use common::error::ValidationError;

/// Validated search text: trimmed, non-empty, at most [`Query::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub const MAX_LEN: usize = 100;

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Missing);
        }

        // Counted in characters, not bytes
        let length = trimmed.chars().count();
        if length > Self::MAX_LEN {
            return Err(ValidationError::TooLong {
                max: Self::MAX_LEN,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_valid_input() {
        let query = Query::parse("  cats  ").expect("valid query");
        assert_eq!(query.as_str(), "cats");
        assert_eq!(query.to_string(), "cats");
    }

    #[test]
    fn accepts_every_length_up_to_the_limit() {
        for len in 1..=Query::MAX_LEN {
            let raw = "a".repeat(len);
            let query = Query::parse(&raw).expect("within limit");
            assert_eq!(query.as_str(), raw);
        }
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(Query::parse(""), Err(ValidationError::Missing));
        assert_eq!(Query::parse(" \t\n "), Err(ValidationError::Missing));
    }

    #[test]
    fn rejects_input_over_the_limit() {
        for len in [101, 150, 1000] {
            let raw = "b".repeat(len);
            assert_eq!(
                Query::parse(&raw),
                Err(ValidationError::TooLong {
                    max: 100,
                    actual: len
                })
            );
        }
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let raw = format!("   {}   ", "c".repeat(100));
        assert!(Query::parse(&raw).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 100 two-byte characters stay within the limit
        let raw = "é".repeat(100);
        assert!(Query::parse(&raw).is_ok());

        let raw = "é".repeat(101);
        assert!(matches!(
            Query::parse(&raw),
            Err(ValidationError::TooLong { actual: 101, .. })
        ));
    }
}
