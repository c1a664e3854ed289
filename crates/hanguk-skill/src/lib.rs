//! Korean facts voice skill.
//!
//! Routes launch, intent and session-ended requests to localized handlers,
//! runs interceptors around dispatch, and turns handler faults into a
//! generic spoken error.

pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod facts;
pub mod handler;
pub mod i18n;
pub mod interceptor;
pub mod log_sink;
pub mod session;
pub mod skill;

pub use dispatcher::{Dispatcher, ErrorResponder};
pub use envelope::{decode_request, encode_response, IncomingEnvelope};
pub use error::{FactError, InterceptorError, SessionError, SkillError, TranslateError};
pub use facts::pick_fact;
pub use handler::{HandlerInput, HandlerRegistry, RequestHandler};
pub use i18n::{Localizer, Translator};
pub use interceptor::{RequestContext, RequestInterceptor, ResponseInterceptor};
pub use log_sink::{LogRecord, LogSink, MemoryLogSink, TracingLogSink};
pub use session::{InMemorySessionStore, SessionStore};
pub use skill::{Skill, SkillBuilder};
