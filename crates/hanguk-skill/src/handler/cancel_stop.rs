//! Cancel and stop intents: say goodbye and close the session.

use hanguk_core::types::{intents, keys, Request, Response};

use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};

pub struct CancelAndStopIntentHandler;

impl RequestHandler for CancelAndStopIntentHandler {
    fn name(&self) -> &'static str {
        "CancelAndStopIntentHandler"
    }

    fn can_handle(&self, request: &Request) -> bool {
        request.kind.is_intent(intents::CANCEL) || request.kind.is_intent(intents::STOP)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        let speech = input.localizer.t(keys::GOODBYE_MESSAGE)?;
        Ok(Response::builder().speak(speech).end_session().build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_support::run;
    use hanguk_core::types::SessionAttributes;

    #[test]
    fn test_cancel_says_goodbye_and_ends() {
        let mut session = SessionAttributes::default();
        let req = Request::intent("en", intents::CANCEL);
        let resp = run(&CancelAndStopIntentHandler, &req, &mut session).unwrap();
        assert_eq!(resp.speech.as_deref(), Some("Goodbye!"));
        assert!(resp.reprompt.is_none());
        assert!(resp.should_end_session);
    }

    #[test]
    fn test_stop_in_spanish() {
        let mut session = SessionAttributes::default();
        let req = Request::intent("es-US", intents::STOP);
        let resp = run(&CancelAndStopIntentHandler, &req, &mut session).unwrap();
        assert_eq!(resp.speech.as_deref(), Some("¡Adiós!"));
        assert!(resp.should_end_session);
    }

    #[test]
    fn test_cancel_stop_predicate() {
        let h = CancelAndStopIntentHandler;
        assert!(h.can_handle(&Request::intent("en", intents::CANCEL)));
        assert!(h.can_handle(&Request::intent("en", intents::STOP)));
        assert!(!h.can_handle(&Request::intent("en", intents::HELP)));
    }
}
