use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("pair not found: {0}")]
    PairNotFound(String),

    #[error("invalid client tier {tier} for pair {pair}")]
    InvalidTier { pair: String, tier: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid API key")]
    Unauthorized,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PricingError {
    /// Whether this error was caused by the caller's input rather than the
    /// service's own configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PricingError::PairNotFound(_)
                | PricingError::InvalidTier { .. }
                | PricingError::InvalidInput(_)
                | PricingError::InvalidValue(_)
                | PricingError::Unauthorized
        )
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
