//! Dispatch of one request to the first matching handler.
//!
//! Handler faults stop here: they are recorded in the log sink and replaced
//! by the localized generic error response. Session changes made by a
//! failing handler are discarded.

use std::collections::HashMap;

use rand::RngCore;

use hanguk_core::types::{keys, Request, Response, SessionAttributes};

use crate::error::SkillError;
use crate::handler::{HandlerInput, HandlerRegistry};
use crate::i18n::bundle::locale_candidates;
use crate::i18n::{Localizer, Message, Translator};
use crate::log_sink::{LogRecord, LogSink};

/// Pre-resolved generic error messages, one per bundle locale.
///
/// Built once from the translator so the error path has nothing left
/// that can fail.
#[derive(Debug, Clone)]
pub struct ErrorResponder {
    by_locale: HashMap<String, String>,
    fallback: String,
}

impl ErrorResponder {
    pub fn from_translator(translator: &Translator) -> Result<Self, SkillError> {
        let fallback = match translator.fallback_message(keys::ERROR_MESSAGE) {
            Some(Message::Text(text)) => text.clone(),
            _ => {
                return Err(SkillError::MissingRequiredKey {
                    key: keys::ERROR_MESSAGE.to_string(),
                })
            }
        };
        let mut by_locale = HashMap::new();
        for locale in translator.locales() {
            let text = translator.text(locale, keys::ERROR_MESSAGE, &[])?;
            by_locale.insert(locale.to_string(), text);
        }
        Ok(Self {
            by_locale,
            fallback,
        })
    }

    /// The error message for `locale`, following the usual locale chain.
    pub fn message(&self, locale: &str) -> &str {
        locale_candidates(locale)
            .iter()
            .find_map(|loc| self.by_locale.get(loc))
            .unwrap_or(&self.fallback)
    }

    pub fn respond(&self, locale: &str) -> Response {
        let speech = self.message(locale);
        Response::builder().speak(speech).reprompt(speech).build()
    }
}

/// Walks the registry and owns the fault path.
pub struct Dispatcher {
    registry: HandlerRegistry,
    errors: ErrorResponder,
}

impl Dispatcher {
    pub fn new(registry: HandlerRegistry, errors: ErrorResponder) -> Self {
        Self { registry, errors }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Serve `request`. Always produces a response.
    ///
    /// `session` is overwritten only when the chosen handler succeeds.
    pub fn dispatch(
        &self,
        request: &Request,
        session: &mut SessionAttributes,
        localizer: &Localizer,
        rng: &mut dyn RngCore,
        sink: &dyn LogSink,
    ) -> Response {
        let Some(handler) = self.registry.find(request) else {
            let err = SkillError::NoMatchingHandler(request.kind.to_string());
            return self.fault(request, "<none>", &err, sink);
        };

        tracing::debug!(handler = handler.name(), kind = %request.kind, "Dispatching");

        let mut working = session.clone();
        let mut input = HandlerInput {
            request,
            session: &mut working,
            localizer,
            rng,
            sink,
        };

        match handler.handle(&mut input) {
            Ok(response) => {
                *session = working;
                response
            }
            Err(err) => self.fault(request, handler.name(), &err, sink),
        }
    }

    fn fault(
        &self,
        request: &Request,
        handler: &str,
        err: &SkillError,
        sink: &dyn LogSink,
    ) -> Response {
        sink.record(LogRecord::HandlerFault {
            request_id: request.request_id.clone(),
            handler: handler.to_string(),
            error: err.to_string(),
        });
        self.errors.respond(&request.locale)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::handler::RequestHandler;
    use crate::i18n::bundle::{builtin_bundles, LocaleBundle};
    use crate::log_sink::MemoryLogSink;
    use hanguk_core::types::{intents, RequestKind};

    struct Exploding;

    impl RequestHandler for Exploding {
        fn name(&self) -> &'static str {
            "Exploding"
        }
        fn can_handle(&self, _: &Request) -> bool {
            true
        }
        fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response, SkillError> {
            input.session.last_fact_index = Some(99);
            Err(SkillError::Handler {
                handler: "Exploding",
                reason: "kaboom".to_string(),
            })
        }
    }

    fn translator() -> Arc<Translator> {
        Arc::new(Translator::new(builtin_bundles().unwrap(), "en").unwrap())
    }

    fn run(
        dispatcher: &Dispatcher,
        request: &Request,
        session: &mut SessionAttributes,
        sink: &MemoryLogSink,
    ) -> Response {
        let t = translator();
        let localizer = t.bind(&request.locale);
        let mut rng = StdRng::seed_from_u64(9);
        dispatcher.dispatch(request, session, &localizer, &mut rng, sink)
    }

    #[test]
    fn test_error_responder_per_locale() {
        let errors = ErrorResponder::from_translator(&translator()).unwrap();
        assert_eq!(
            errors.message("es-ES"),
            "Lo siento, ha habido un problema. Por favor inténtalo otra vez."
        );
        assert_eq!(
            errors.message("de-DE"),
            "Sorry, there was an error. Please try again."
        );
        assert_eq!(
            errors.message("ES_mx"),
            "Lo siento, ha habido un problema. Por favor inténtalo otra vez."
        );
    }

    #[test]
    fn test_error_responder_requires_fallback_message() {
        let mut bundles = HashMap::new();
        bundles.insert("en".to_string(), LocaleBundle::default());
        let t = Translator::new(bundles, "en").unwrap();
        let err = ErrorResponder::from_translator(&t).unwrap_err();
        assert!(matches!(
            err,
            SkillError::MissingRequiredKey { ref key } if key == "ERROR_MESSAGE"
        ));
    }

    #[test]
    fn test_handler_fault_becomes_error_response() {
        let mut registry = HandlerRegistry::new();
        registry.register(Exploding);
        let dispatcher = Dispatcher::new(
            registry,
            ErrorResponder::from_translator(&translator()).unwrap(),
        );
        let sink = MemoryLogSink::new();
        let mut session = SessionAttributes::default();
        let request = Request::new("req-1", "en", RequestKind::Launch);

        let resp = run(&dispatcher, &request, &mut session, &sink);

        let msg = "Sorry, there was an error. Please try again.";
        assert_eq!(resp.speech.as_deref(), Some(msg));
        assert_eq!(resp.reprompt.as_deref(), Some(msg));
        assert!(!resp.should_end_session);
        assert_eq!(session.last_fact_index, None);

        let faults = sink.faults();
        assert_eq!(faults.len(), 1);
        match &faults[0] {
            LogRecord::HandlerFault {
                request_id,
                handler,
                error,
            } => {
                assert_eq!(request_id, "req-1");
                assert_eq!(handler, "Exploding");
                assert!(error.contains("kaboom"));
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_request_becomes_error_response() {
        let dispatcher = Dispatcher::new(
            HandlerRegistry::with_defaults(),
            ErrorResponder::from_translator(&translator()).unwrap(),
        );
        let sink = MemoryLogSink::new();
        let mut session = SessionAttributes::default();
        let request = Request::new(
            "req-2",
            "es",
            RequestKind::Other {
                request_type: "Display.ElementSelected".to_string(),
            },
        );

        let resp = run(&dispatcher, &request, &mut session, &sink);
        assert!(resp.speech.unwrap().starts_with("Lo siento, ha habido un problema"));
        assert_eq!(sink.faults().len(), 1);
    }

    #[test]
    fn test_success_commits_session() {
        let dispatcher = Dispatcher::new(
            HandlerRegistry::with_defaults(),
            ErrorResponder::from_translator(&translator()).unwrap(),
        );
        let sink = MemoryLogSink::new();
        let mut session = SessionAttributes::default();
        let request = Request::intent("en", intents::KOREA_FACTS);

        run(&dispatcher, &request, &mut session, &sink);
        assert!(session.last_fact_index.is_some());
        assert!(sink.faults().is_empty());
    }
}
