use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Client pricing bucket (`A`, `B`, `C`, ...).
///
/// Input is case-insensitive: labels are trimmed and upper-cased on
/// construction, so `" b"` and `"B"` select the same spread row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ClientTier(String);

impl ClientTier {
    pub fn new(label: &str) -> Self {
        Self(label.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ClientTier {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for ClientTier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<ClientTier> for String {
    fn from(t: ClientTier) -> Self {
        t.0
    }
}

impl Borrow<str> for ClientTier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(ClientTier::new(" b ").as_str(), "B");
        assert_eq!(ClientTier::from("c"), ClientTier::from("C"));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let tier: ClientTier = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(tier.as_str(), "A");
    }
}
