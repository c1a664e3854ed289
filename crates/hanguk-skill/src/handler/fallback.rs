//! Utterances the language model could not map to an intent.

use hanguk_core::types::{intents, keys, Request, Response};

use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};

pub struct FallbackIntentHandler;

impl RequestHandler for FallbackIntentHandler {
    fn name(&self) -> &'static str {
        "FallbackIntentHandler"
    }

    fn can_handle(&self, request: &Request) -> bool {
        request.kind.is_intent(intents::FALLBACK)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.localizer.t(keys::FALLBACK_MESSAGE)?;
        Ok(Response::builder()
            .speak(speech.clone())
            .reprompt(speech)
            .build())
    }
}
