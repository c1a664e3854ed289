//! Session start: greet the user.

use hanguk_core::types::{keys, Request, RequestKind, Response};

use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};

/// Speaks the welcome message and keeps the session open.
pub struct LaunchRequestHandler;

impl RequestHandler for LaunchRequestHandler {
    fn name(&self) -> &'static str {
        "LaunchRequestHandler"
    }

    fn can_handle(&self, request: &Request) -> bool {
        matches!(request.kind, RequestKind::Launch)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.localizer.t(keys::WELCOME_MESSAGE)?;
        Ok(Response::builder()
            .speak(speech.clone())
            .reprompt(speech)
            .build())
    }
}
