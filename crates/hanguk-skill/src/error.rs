//! Error types for the skill pipeline.

use hanguk_core::error::HangukError;

/// Errors from message resolution.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Message key `{key}` missing for locale {locale} and its fallbacks")]
    MissingKey { locale: String, key: String },
    #[error("Message `{key}` is a list, expected text")]
    NotText { key: String },
    #[error("Message `{key}` is text, expected a list")]
    NotList { key: String },
    #[error("Fallback locale has no bundle: {0}")]
    UnknownFallback(String),
}

/// Errors from random fact selection.
#[derive(Debug, thiserror::Error)]
pub enum FactError {
    #[error("Fact list is empty")]
    Empty,
}

/// Errors from the session attribute store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session store lock poisoned: {0}")]
    Poisoned(String),
}

/// Errors from request and response interceptors.
#[derive(Debug, thiserror::Error)]
pub enum InterceptorError {
    #[error("Interceptor could not serialize payload: {0}")]
    Serialization(String),
    #[error("Interceptor {interceptor} failed: {reason}")]
    Failed {
        interceptor: &'static str,
        reason: String,
    },
}

impl From<serde_json::Error> for InterceptorError {
    fn from(err: serde_json::Error) -> Self {
        InterceptorError::Serialization(err.to_string())
    }
}

/// Errors surfaced by the skill pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),
    #[error("Fact selection error: {0}")]
    Fact(#[from] FactError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Interceptor error: {0}")]
    Interceptor(#[from] InterceptorError),
    #[error("No handler registered for {0}")]
    NoMatchingHandler(String),
    #[error("Handler {handler} failed: {reason}")]
    Handler {
        handler: &'static str,
        reason: String,
    },
    #[error("Fallback bundle lacks required message `{key}`")]
    MissingRequiredKey { key: String },
    #[error("Malformed envelope: {0}")]
    Envelope(String),
    #[error(transparent)]
    Core(#[from] HangukError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_error_display() {
        let err = TranslateError::MissingKey {
            locale: "fr-FR".to_string(),
            key: "WELCOME_MESSAGE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Message key `WELCOME_MESSAGE` missing for locale fr-FR and its fallbacks"
        );

        let err = TranslateError::NotText {
            key: "KOREA_FACTS".to_string(),
        };
        assert_eq!(err.to_string(), "Message `KOREA_FACTS` is a list, expected text");
    }

    #[test]
    fn test_skill_error_from_subsystems() {
        let err: SkillError = FactError::Empty.into();
        assert!(matches!(err, SkillError::Fact(FactError::Empty)));
        assert_eq!(err.to_string(), "Fact selection error: Fact list is empty");

        let err: SkillError = SessionError::Poisoned("boom".to_string()).into();
        assert!(matches!(err, SkillError::Session(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_handler_error_display() {
        let err = SkillError::Handler {
            handler: "KoreaFactsIntentHandler",
            reason: "exploded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Handler KoreaFactsIntentHandler failed: exploded"
        );
    }

    #[test]
    fn test_interceptor_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err: InterceptorError = json_err.into();
        assert!(matches!(err, InterceptorError::Serialization(_)));

        let skill_err: SkillError = err.into();
        assert!(skill_err.to_string().starts_with("Interceptor error: "));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: SkillError = HangukError::Config("bad".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
