//! Platform notification that the conversation closed.
//!
//! Sent when the user exits, stops responding, or an error ends the
//! session. No speech can be delivered at this point.

use hanguk_core::types::{Request, RequestKind, Response};

use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};
use crate::log_sink::LogRecord;

pub struct SessionEndedRequestHandler;

impl RequestHandler for SessionEndedRequestHandler {
    fn name(&self) -> &'static str {
        "SessionEndedRequestHandler"
    }

    fn can_handle(&self, request: &Request) -> bool {
        matches!(request.kind, RequestKind::SessionEnded { .. })
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
        let reason = match &input.request.kind {
            RequestKind::SessionEnded { reason } => reason.clone(),
            _ => None,
        };
        input.sink.record(LogRecord::SessionEnded {
            request_id: input.request.request_id.clone(),
            reason,
        });
        Ok(Response::builder().end_session().build())
    }
}
