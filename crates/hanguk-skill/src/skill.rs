//! The request pipeline: interceptors, dispatch, interceptors.

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use hanguk_core::config::SkillConfig;
use hanguk_core::types::{keys, Request, Response, SessionAttributes};

use crate::dispatcher::{Dispatcher, ErrorResponder};
use crate::error::{InterceptorError, SkillError};
use crate::handler::{HandlerRegistry, RequestHandler};
use crate::i18n::{Message, Translator};
use crate::interceptor::{
    LocalizationInterceptor, LoggingRequestInterceptor, LoggingResponseInterceptor,
    RequestContext, RequestInterceptor, ResponseInterceptor,
};
use crate::log_sink::{LogSink, TracingLogSink};
use crate::session::SessionStore;

/// A fully assembled skill. Immutable and shareable across threads.
pub struct Skill {
    translator: Arc<Translator>,
    dispatcher: Dispatcher,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    sink: Arc<dyn LogSink>,
}

impl Skill {
    /// An empty builder: no handlers, no interceptors.
    pub fn builder(translator: Arc<Translator>) -> SkillBuilder {
        SkillBuilder::new(translator)
    }

    /// The standard skill: built-in handlers, localization and logging.
    pub fn standard(translator: Arc<Translator>) -> SkillBuilder {
        SkillBuilder::new(translator)
            .with_default_handlers()
            .with_default_interceptors()
    }

    /// The standard skill over the bundles named by `config`.
    pub fn from_config(config: &SkillConfig) -> Result<Self, SkillError> {
        let translator = Arc::new(Translator::from_config(&config.localization)?);
        Self::standard(translator).build()
    }

    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.dispatcher.registry().names()
    }

    /// Serve one request against explicit session attributes.
    pub fn invoke(
        &self,
        request: &Request,
        session: &mut SessionAttributes,
    ) -> Result<Response, SkillError> {
        self.invoke_with_rng(request, session, &mut rand::rng())
    }

    /// Like [`Skill::invoke`], drawing randomness from `rng`.
    ///
    /// Errors only when an interceptor fails. Handler faults come back as
    /// the generic error response.
    pub fn invoke_with_rng(
        &self,
        request: &Request,
        session: &mut SessionAttributes,
        rng: &mut dyn RngCore,
    ) -> Result<Response, SkillError> {
        let mut context = RequestContext::default();
        for interceptor in &self.request_interceptors {
            interceptor
                .process(request, &mut context)
                .inspect_err(|e| {
                    tracing::error!(
                        interceptor = interceptor.name(),
                        error = %e,
                        "Request interceptor failed"
                    )
                })?;
        }

        let localizer = context
            .localizer
            .as_ref()
            .ok_or_else(|| InterceptorError::Failed {
                interceptor: "LocalizationInterceptor",
                reason: "no localizer bound to request".to_string(),
            })?;

        let response = self
            .dispatcher
            .dispatch(request, session, localizer, rng, self.sink.as_ref());

        for interceptor in &self.response_interceptors {
            interceptor
                .process(request, &context, &response)
                .inspect_err(|e| {
                    tracing::error!(
                        interceptor = interceptor.name(),
                        error = %e,
                        "Response interceptor failed"
                    )
                })?;
        }

        Ok(response)
    }

    /// Serve one request, reading and writing attributes through `store`.
    ///
    /// Nothing is written back when the pipeline fails.
    pub fn invoke_with_store(
        &self,
        request: &Request,
        session_id: &str,
        store: &dyn SessionStore,
    ) -> Result<Response, SkillError> {
        let mut attributes = store.get(session_id)?;
        let response = self.invoke(request, &mut attributes)?;
        store.set(session_id, attributes)?;
        Ok(response)
    }
}

impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill")
            .field("fallback_locale", &self.translator.fallback_locale())
            .field("handlers", &self.handler_names())
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

/// Assembles a [`Skill`]. Registration order is evaluation order.
pub struct SkillBuilder {
    translator: Arc<Translator>,
    registry: HandlerRegistry,
    default_handlers: bool,
    default_interceptors: bool,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    sink: Option<Arc<dyn LogSink>>,
}

impl SkillBuilder {
    fn new(translator: Arc<Translator>) -> Self {
        Self {
            translator,
            registry: HandlerRegistry::new(),
            default_handlers: false,
            default_interceptors: false,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            sink: None,
        }
    }

    /// Append the built-in handlers after any registered so far.
    pub fn with_default_handlers(mut self) -> Self {
        self.registry.register_defaults();
        self.default_handlers = true;
        self
    }

    /// Put localization and request logging at the head of the request
    /// chain, and response logging at the head of the response chain.
    pub fn with_default_interceptors(mut self) -> Self {
        self.default_interceptors = true;
        self
    }

    pub fn add_request_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.registry.register(handler);
        self
    }

    pub fn add_request_interceptor(
        mut self,
        interceptor: impl RequestInterceptor + 'static,
    ) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn add_response_interceptor(
        mut self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> Self {
        self.response_interceptors.push(Box::new(interceptor));
        self
    }

    /// Where diagnostic records go. Defaults to [`TracingLogSink`].
    pub fn log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the bundles and assemble the skill.
    pub fn build(self) -> Result<Skill, SkillError> {
        if self.default_handlers {
            validate_default_messages(&self.translator)?;
        }
        let errors = ErrorResponder::from_translator(&self.translator)?;
        let sink: Arc<dyn LogSink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(TracingLogSink),
        };

        let mut request_interceptors: Vec<Box<dyn RequestInterceptor>> = Vec::new();
        let mut response_interceptors: Vec<Box<dyn ResponseInterceptor>> = Vec::new();
        if self.default_interceptors {
            request_interceptors.push(Box::new(LocalizationInterceptor::new(Arc::clone(
                &self.translator,
            ))));
            request_interceptors.push(Box::new(LoggingRequestInterceptor::new(Arc::clone(&sink))));
            response_interceptors.push(Box::new(LoggingResponseInterceptor::new(Arc::clone(
                &sink,
            ))));
        }
        request_interceptors.extend(self.request_interceptors);
        response_interceptors.extend(self.response_interceptors);

        tracing::info!(
            handlers = ?self.registry.names(),
            request_interceptors = request_interceptors.len(),
            response_interceptors = response_interceptors.len(),
            "Skill assembled"
        );

        Ok(Skill {
            translator: self.translator,
            dispatcher: Dispatcher::new(self.registry, errors),
            request_interceptors,
            response_interceptors,
            sink,
        })
    }
}

/// The fallback bundle must carry every message the built-in handlers use.
fn validate_default_messages(translator: &Translator) -> Result<(), SkillError> {
    for key in keys::REQUIRED_TEXT {
        if !matches!(translator.fallback_message(key), Some(Message::Text(_))) {
            return Err(SkillError::MissingRequiredKey {
                key: key.to_string(),
            });
        }
    }
    match translator.fallback_message(keys::KOREA_FACTS) {
        Some(Message::List(facts)) if !facts.is_empty() => Ok(()),
        _ => Err(SkillError::MissingRequiredKey {
            key: keys::KOREA_FACTS.to_string(),
        }),
    }
}
