use thiserror::Error;

/// Top-level error type for the Hanguk skill.
///
/// Covers the start-up concerns shared by every crate: reading configuration,
/// decoding resource files, and serializing payloads. The skill crate defines
/// its own per-request error types on top of this one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HangukError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Locale bundle error: {0}")]
    Locale(String),
}

impl From<toml::de::Error> for HangukError {
    fn from(err: toml::de::Error) -> Self {
        HangukError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for HangukError {
    fn from(err: toml::ser::Error) -> Self {
        HangukError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for HangukError {
    fn from(err: serde_json::Error) -> Self {
        HangukError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Hanguk operations.
pub type Result<T> = std::result::Result<T, HangukError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HangukError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = HangukError::Locale("es.toml: not a table".to_string());
        assert_eq!(err.to_string(), "Locale bundle error: es.toml: not a table");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HangukError = io_err.into();
        assert!(matches!(err, HangukError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let err: HangukError = toml_err.into();
        assert!(matches!(err, HangukError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: HangukError = json_err.into();
        assert!(matches!(err, HangukError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }
}
