//! Shared-secret check for mutating operations.

use std::fmt;

use crate::error::{PricingError, Result};

/// Header carrying the credential on `PUT /params`.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The single process-wide API key.
///
/// There is no session or token issuance: every mutating call re-presents the
/// key and is compared against this value.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// # Errors
    ///
    /// Returns `PricingError::Config` if the key is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(PricingError::Config("API key must not be empty".to_string()));
        }
        Ok(Self(secret))
    }

    /// Check a presented credential. A missing credential is rejected the same
    /// way as a wrong one.
    pub fn verify(&self, provided: Option<&str>) -> Result<()> {
        match provided {
            Some(p) if constant_time_eq(p.as_bytes(), self.0.as_bytes()) => Ok(()),
            _ => Err(PricingError::Unauthorized),
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}
