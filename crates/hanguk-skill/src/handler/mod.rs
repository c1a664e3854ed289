//! Request handler registry and trait definition.
//!
//! Defines the `RequestHandler` trait and the ordered registry the
//! dispatcher walks. Registration order is evaluation order: the first
//! handler whose predicate accepts a request wins.

pub mod cancel_stop;
pub mod fallback;
pub mod help;
pub mod korea_facts;
pub mod launch;
pub mod reflector;
pub mod session_ended;

use rand::RngCore;

use hanguk_core::types::{Request, Response, SessionAttributes};

use crate::error::SkillError;
use crate::i18n::Localizer;
use crate::log_sink::LogSink;

pub use cancel_stop::CancelAndStopIntentHandler;
pub use fallback::FallbackIntentHandler;
pub use help::HelpIntentHandler;
pub use korea_facts::KoreaFactsIntentHandler;
pub use launch::LaunchRequestHandler;
pub use reflector::IntentReflectorHandler;
pub use session_ended::SessionEndedRequestHandler;

/// Everything a handler may read or change while serving one request.
pub struct HandlerInput<'a> {
    pub request: &'a Request,
    pub session: &'a mut SessionAttributes,
    pub localizer: &'a Localizer,
    pub rng: &'a mut dyn RngCore,
    pub sink: &'a dyn LogSink,
}

/// A (predicate, action) pair.
pub trait RequestHandler: Send + Sync {
    /// Name used in logs and fault records.
    fn name(&self) -> &'static str;

    /// Whether this handler serves `request`. Must be a pure function of it.
    fn can_handle(&self, request: &Request) -> bool;

    /// Produce the response.
    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError>;
}

/// Handlers in evaluation order.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler after every handler registered so far.
    pub fn register(&mut self, handler: impl RequestHandler + 'static) -> &mut Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Register the built-in handlers, specific ones first.
    pub fn register_defaults(&mut self) -> &mut Self {
        self.register(LaunchRequestHandler)
            .register(KoreaFactsIntentHandler)
            .register(HelpIntentHandler)
            .register(CancelAndStopIntentHandler)
            .register(FallbackIntentHandler)
            .register(SessionEndedRequestHandler)
            .register(IntentReflectorHandler)
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// First handler accepting `request`, in registration order.
    pub fn find(&self, request: &Request) -> Option<&dyn RequestHandler> {
        self.handlers
            .iter()
            .find(|h| h.can_handle(request))
            .map(|h| h.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
