//! `ApiKey` - masked API credential.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of trailing characters left visible when the key is displayed.
const VISIBLE_SUFFIX: usize = 4;

/// Static API-Football key.
///
/// `Debug` and `Display` only ever show the last few characters, so the key
/// can be logged or embedded in a `Debug` struct without leaking it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for the request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the key is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the masked form, e.g. `****abcd`.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= VISIBLE_SUFFIX {
            return String::from("****");
        }
        let suffix: String = chars
            .iter()
            .skip(chars.len().saturating_sub(VISIBLE_SUFFIX))
            .collect();
        format!("****{suffix}")
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self(String::from(key))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_keeps_last_four() {
        // Arrange
        let key = ApiKey::new("0123456789abcdef");

        // Act
        let masked = key.masked();

        // Assert
        assert_eq!(masked, "****cdef");
    }

    #[test]
    fn test_masked_short_key_hides_everything() {
        // Arrange
        let key = ApiKey::new("abc");

        // Act & Assert
        assert_eq!(key.masked(), "****");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        // Arrange
        let key = ApiKey::new("super-secret-key-9876");

        // Act
        let debug = format!("{key:?}");
        let display = key.to_string();

        // Assert
        assert!(!debug.contains("super-secret"));
        assert!(!display.contains("super-secret"));
        assert!(debug.contains("9876"));
    }

    #[test]
    fn test_is_blank() {
        // Arrange & Act & Assert
        assert!(ApiKey::new("   ").is_blank());
        assert!(!ApiKey::new("k").is_blank());
    }
}
