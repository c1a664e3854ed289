//! Core types shared by the skill pipeline.
//!
//! Defines the request and response model, per-session attributes, and the
//! intent names and message keys the built-in handlers rely on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Constants
// =============================================================================

/// Intent names resolved by the upstream language model.
pub mod intents {
    pub const KOREA_FACTS: &str = "KoreaFactsIntent";
    pub const HELP: &str = "AMAZON.HelpIntent";
    pub const CANCEL: &str = "AMAZON.CancelIntent";
    pub const STOP: &str = "AMAZON.StopIntent";
    pub const FALLBACK: &str = "AMAZON.FallbackIntent";
}

/// Message keys looked up in the locale bundles.
pub mod keys {
    pub const WELCOME_MESSAGE: &str = "WELCOME_MESSAGE";
    pub const HELLO_MESSAGE: &str = "HELLO_MESSAGE";
    pub const HELP_MESSAGE: &str = "HELP_MESSAGE";
    pub const GOODBYE_MESSAGE: &str = "GOODBYE_MESSAGE";
    pub const REFLECTOR_MESSAGE: &str = "REFLECTOR_MESSAGE";
    pub const FALLBACK_MESSAGE: &str = "FALLBACK_MESSAGE";
    pub const ERROR_MESSAGE: &str = "ERROR_MESSAGE";
    pub const ANOTHER_FACT_PROMPT: &str = "ANOTHER_FACT_PROMPT";
    pub const KOREA_FACTS: &str = "KOREA_FACTS";

    /// Plain-text keys the built-in handlers resolve.
    pub const REQUIRED_TEXT: [&str; 7] = [
        WELCOME_MESSAGE,
        HELP_MESSAGE,
        GOODBYE_MESSAGE,
        REFLECTOR_MESSAGE,
        FALLBACK_MESSAGE,
        ERROR_MESSAGE,
        ANOTHER_FACT_PROMPT,
    ];
}

// =============================================================================
// Requests
// =============================================================================

/// The closed set of request shapes the skill understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestKind {
    /// The user opened the skill without an intent.
    Launch,
    /// An utterance already classified into a named intent.
    Intent { name: String },
    /// The conversation was closed by the platform.
    SessionEnded { reason: Option<String> },
    /// Any request type this skill has no specific model for.
    Other { request_type: String },
}

impl RequestKind {
    /// The intent name, if this is an intent request.
    pub fn intent_name(&self) -> Option<&str> {
        match self {
            RequestKind::Intent { name } => Some(name),
            _ => None,
        }
    }

    /// Whether this is an intent request for exactly `intent`.
    pub fn is_intent(&self, intent: &str) -> bool {
        self.intent_name() == Some(intent)
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Launch => write!(f, "LaunchRequest"),
            RequestKind::Intent { name } => write!(f, "IntentRequest({})", name),
            RequestKind::SessionEnded { .. } => write!(f, "SessionEndedRequest"),
            RequestKind::Other { request_type } => write!(f, "{}", request_type),
        }
    }
}

/// One incoming request. Immutable for the whole dispatch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub request_id: String,
    pub locale: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub kind: RequestKind,
}

impl Request {
    pub fn new(
        request_id: impl Into<String>,
        locale: impl Into<String>,
        kind: RequestKind,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            locale: locale.into(),
            timestamp: None,
            kind,
        }
    }

    pub fn launch(locale: impl Into<String>) -> Self {
        Self::new("", locale, RequestKind::Launch)
    }

    pub fn intent(locale: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new("", locale, RequestKind::Intent { name: name.into() })
    }

    pub fn session_ended(locale: impl Into<String>, reason: Option<String>) -> Self {
        Self::new("", locale, RequestKind::SessionEnded { reason })
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Spoken output of one dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub should_end_session: bool,
}

impl Response {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }
}

/// Chained construction of a [`Response`].
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn speak(mut self, speech: impl Into<String>) -> Self {
        self.response.speech = Some(speech.into());
        self
    }

    pub fn reprompt(mut self, reprompt: impl Into<String>) -> Self {
        self.response.reprompt = Some(reprompt.into());
        self
    }

    pub fn end_session(mut self) -> Self {
        self.response.should_end_session = true;
        self
    }

    pub fn build(self) -> Response {
        self.response
    }
}

// =============================================================================
// Session
// =============================================================================

/// Attributes persisted between the turns of one conversation.
///
/// Only `last_fact_index` is interpreted; anything else the transport hands
/// over is kept as-is and written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionAttributes {
    #[serde(
        rename = "lastKoreaFactIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_fact_index: Option<usize>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_display() {
        assert_eq!(RequestKind::Launch.to_string(), "LaunchRequest");
        assert_eq!(
            RequestKind::Intent {
                name: "KoreaFactsIntent".to_string()
            }
            .to_string(),
            "IntentRequest(KoreaFactsIntent)"
        );
        assert_eq!(
            RequestKind::SessionEnded { reason: None }.to_string(),
            "SessionEndedRequest"
        );
        assert_eq!(
            RequestKind::Other {
                request_type: "CanFulfillIntentRequest".to_string()
            }
            .to_string(),
            "CanFulfillIntentRequest"
        );
    }

    #[test]
    fn test_is_intent() {
        let kind = RequestKind::Intent {
            name: intents::HELP.to_string(),
        };
        assert!(kind.is_intent(intents::HELP));
        assert!(!kind.is_intent(intents::STOP));
        assert!(!RequestKind::Launch.is_intent(intents::HELP));
        assert_eq!(RequestKind::Launch.intent_name(), None);
    }

    #[test]
    fn test_request_constructors() {
        let req = Request::intent("es-ES", intents::KOREA_FACTS);
        assert_eq!(req.locale, "es-ES");
        assert!(req.kind.is_intent(intents::KOREA_FACTS));
        assert!(req.timestamp.is_none());

        let req = Request::session_ended("en", Some("USER_INITIATED".to_string()));
        assert_eq!(
            req.kind,
            RequestKind::SessionEnded {
                reason: Some("USER_INITIATED".to_string())
            }
        );
    }

    #[test]
    fn test_response_builder() {
        let resp = Response::builder().speak("Hi").reprompt("Hi?").build();
        assert_eq!(resp.speech.as_deref(), Some("Hi"));
        assert_eq!(resp.reprompt.as_deref(), Some("Hi?"));
        assert!(!resp.should_end_session);

        let resp = Response::builder().speak("Bye").end_session().build();
        assert!(resp.reprompt.is_none());
        assert!(resp.should_end_session);

        assert_eq!(Response::builder().build(), Response::default());
    }

    #[test]
    fn test_session_attributes_wire_name() {
        let attrs = SessionAttributes {
            last_fact_index: Some(4),
            ..SessionAttributes::default()
        };
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json, serde_json::json!({"lastKoreaFactIndex": 4}));
    }

    #[test]
    fn test_session_attributes_preserve_unknown_fields() {
        let attrs: SessionAttributes =
            serde_json::from_value(serde_json::json!({"visits": 3, "lastKoreaFactIndex": 1}))
                .unwrap();
        assert_eq!(attrs.last_fact_index, Some(1));
        assert_eq!(attrs.extra.get("visits"), Some(&serde_json::json!(3)));

        let back = serde_json::to_value(&attrs).unwrap();
        assert_eq!(back["visits"], 3);
        assert_eq!(back["lastKoreaFactIndex"], 1);
    }

    #[test]
    fn test_empty_session_attributes_serialize_to_empty_object() {
        let json = serde_json::to_value(SessionAttributes::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
