//! Tell a random fact about Korea, never the same one twice in a row.

use hanguk_core::types::{intents, keys, Request, Response};

use crate::error::SkillError;
use crate::facts::pick_fact;
use crate::handler::{HandlerInput, RequestHandler};

pub struct KoreaFactsIntentHandler;

impl RequestHandler for KoreaFactsIntentHandler {
    fn name(&self) -> &'static str {
        "KoreaFactsIntentHandler"
    }

    fn can_handle(&self, request: &Request) -> bool {
        request.kind.is_intent(intents::KOREA_FACTS)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        let localizer = input.localizer;
        let facts = localizer.list(keys::KOREA_FACTS)?;
        let (fact, index) = pick_fact(facts, input.session.last_fact_index, &mut *input.rng)?;
        let reprompt = localizer.t(keys::ANOTHER_FACT_PROMPT)?;

        tracing::debug!(index, total = facts.len(), "Fact selected");
        input.session.last_fact_index = Some(index);

        Ok(Response::builder().speak(fact).reprompt(reprompt).build())
    }
}
