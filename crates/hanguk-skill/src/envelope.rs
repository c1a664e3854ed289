//! JSON envelope codec for the hosting voice platform.
//!
//! Decodes the platform's request envelope into a [`Request`] plus session
//! attributes, and encodes a [`Response`] back into the response envelope
//! with SSML speech.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hanguk_core::types::{Request, RequestKind, Response, SessionAttributes};

use crate::error::SkillError;

const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    #[serde(default)]
    session: Option<RawSession>,
    request: RawRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    session_id: String,
    #[serde(default)]
    new: bool,
    #[serde(default)]
    attributes: Option<SessionAttributes>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    #[serde(rename = "type")]
    request_type: String,
    #[serde(default)]
    request_id: String,
    locale: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    intent: Option<RawIntent>,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawIntent {
    name: Option<String>,
}

/// A decoded request envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingEnvelope {
    pub request: Request,
    pub session_id: Option<String>,
    pub new_session: bool,
    pub attributes: SessionAttributes,
}

/// Decode a request envelope.
///
/// A request without a locale is read as `default_locale`, usually the
/// translator's fallback.
pub fn decode_request(
    json: &str,
    default_locale: &str,
) -> Result<IncomingEnvelope, SkillError> {
    let raw: RawEnvelope =
        serde_json::from_str(json).map_err(|e| SkillError::Envelope(e.to_string()))?;

    let locale = match raw.request.locale.filter(|l| !l.trim().is_empty()) {
        Some(locale) => locale,
        None => {
            tracing::debug!(default_locale, "Envelope has no locale");
            default_locale.to_string()
        }
    };

    let kind = match raw.request.request_type.as_str() {
        "LaunchRequest" => RequestKind::Launch,
        "IntentRequest" => {
            let name = raw
                .request
                .intent
                .and_then(|i| i.name)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| {
                    SkillError::Envelope("IntentRequest without intent.name".to_string())
                })?;
            RequestKind::Intent { name }
        }
        "SessionEndedRequest" => RequestKind::SessionEnded {
            reason: raw.request.reason,
        },
        other => RequestKind::Other {
            request_type: other.to_string(),
        },
    };

    let request = Request {
        request_id: raw.request.request_id,
        locale,
        timestamp: raw.request.timestamp,
        kind,
    };

    let (session_id, new_session, attributes) = match raw.session {
        Some(s) => (Some(s.session_id), s.new, s.attributes.unwrap_or_default()),
        None => (None, false, SessionAttributes::default()),
    };

    Ok(IncomingEnvelope {
        request,
        session_id,
        new_session,
        attributes,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputSpeech {
    #[serde(rename = "type")]
    speech_type: &'static str,
    ssml: String,
}

impl OutputSpeech {
    fn ssml(text: &str) -> Self {
        Self {
            speech_type: "SSML",
            ssml: format!("<speak>{}</speak>", escape_ssml(text)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawReprompt {
    output_speech: OutputSpeech,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reprompt: Option<RawReprompt>,
    should_end_session: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawResponseEnvelope<'a> {
    version: &'static str,
    session_attributes: &'a SessionAttributes,
    user_agent: String,
    response: RawResponse,
}

/// Encode `response` and the updated session attributes.
pub fn encode_response(
    response: &Response,
    attributes: &SessionAttributes,
) -> Result<String, SkillError> {
    let envelope = RawResponseEnvelope {
        version: ENVELOPE_VERSION,
        session_attributes: attributes,
        user_agent: format!("hanguk/{}", env!("CARGO_PKG_VERSION")),
        response: RawResponse {
            output_speech: response.speech.as_deref().map(OutputSpeech::ssml),
            reprompt: response.reprompt.as_deref().map(|text| RawReprompt {
                output_speech: OutputSpeech::ssml(text),
            }),
            should_end_session: response.should_end_session,
        },
    };
    serde_json::to_string_pretty(&envelope).map_err(|e| SkillError::Envelope(e.to_string()))
}

fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
