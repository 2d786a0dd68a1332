//! Error types for the Slots of Choice page controller

use thiserror::Error;

/// Main error type for page controller operations.
///
/// None of these reach the page: behaviors log them and fall back to
/// being inactive.
#[derive(Error, Debug)]
pub enum ChoiceError {
    /// Configuration failed validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Error during JSON (de)serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document operation was rejected by the host
    #[error("DOM error: {0}")]
    Dom(String),

    /// A browser global (window, document, body) is unavailable
    #[error("Missing global: {0}")]
    MissingGlobal(&'static str),
}

/// Result type alias using ChoiceError
pub type ChoiceResult<T> = Result<T, ChoiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChoiceError::InvalidConfig("sentinel is empty".to_string());
        assert_eq!(format!("{}", err), "Invalid config: sentinel is empty");

        let err = ChoiceError::MissingGlobal("window");
        assert_eq!(err.to_string(), "Missing global: window");
    }

    #[test]
    fn test_error_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ChoiceError = json_err.into();
        assert!(matches!(err, ChoiceError::Serialization(_)));
    }
}
