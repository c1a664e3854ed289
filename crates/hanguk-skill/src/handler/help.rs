//! Help intent.

use hanguk_core::types::{intents, keys, Request, Response};

use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};

pub struct HelpIntentHandler;

impl RequestHandler for HelpIntentHandler {
    fn name(&self) -> &'static str {
        "HelpIntentHandler"
    }

    fn can_handle(&self, request: &Request) -> bool {
        request.kind.is_intent(intents::HELP)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.localizer.t(keys::HELP_MESSAGE)?;
        Ok(Response::builder()
            .speak(speech.clone())
            .reprompt(speech)
            .build())
    }
}
