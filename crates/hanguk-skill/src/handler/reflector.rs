//! Echoes the name of any intent without a dedicated handler.
//!
//! Accepts every intent request, so it must be registered after all
//! intent-specific handlers.

use hanguk_core::types::{keys, Request, Response};

use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};

pub struct IntentReflectorHandler;

impl RequestHandler for IntentReflectorHandler {
    fn name(&self) -> &'static str {
        "IntentReflectorHandler"
    }

    fn can_handle(&self, request: &Request) -> bool {
        request.kind.intent_name().is_some()
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        let intent_name = input.request.kind.intent_name().unwrap_or_default();
        let speech = input
            .localizer
            .t_args(keys::REFLECTOR_MESSAGE, &[intent_name])?;
        Ok(Response::builder()
            .speak(speech.clone())
            .reprompt(speech)
            .build())
    }
}
