use thiserror::Error;

#[derive(Debug, Error)]
pub enum KbError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Invalid {role} passed to the knowledge base: {reason}")]
    InvalidArgument { role: String, reason: String },

    #[error("The theorem hasn't been proven yet")]
    NotProven,
}

impl KbError {
    /// Returns `true` for the recoverable "no proof yet" condition.
    pub fn is_not_proven(&self) -> bool {
        matches!(self, KbError::NotProven)
    }

    /// Returns `true` if the error was caused by a rejected argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, KbError::InvalidArgument { .. })
    }
}

pub type KbResult<T> = Result<T, KbError>;
