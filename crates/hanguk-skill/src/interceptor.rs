//! Interceptors that run around dispatch.
//!
//! Request interceptors run in registration order before dispatch and may
//! attach derived context. Response interceptors run after dispatch and
//! only observe. Neither may alter the request or response. A failing
//! interceptor aborts the invocation.

use std::sync::Arc;

use hanguk_core::types::{Request, Response};

use crate::error::InterceptorError;
use crate::i18n::{Localizer, Translator};
use crate::log_sink::{LogRecord, LogSink};

/// Per-request state derived by request interceptors.
#[derive(Debug, Default)]
pub struct RequestContext {
    pub localizer: Option<Localizer>,
}

pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, request: &Request, context: &mut RequestContext)
        -> Result<(), InterceptorError>;
}

pub trait ResponseInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(
        &self,
        request: &Request,
        context: &RequestContext,
        response: &Response,
    ) -> Result<(), InterceptorError>;
}

/// Binds the shared translator to the request locale.
pub struct LocalizationInterceptor {
    translator: Arc<Translator>,
}

impl LocalizationInterceptor {
    pub fn new(translator: Arc<Translator>) -> Self {
        Self { translator }
    }
}

impl RequestInterceptor for LocalizationInterceptor {
    fn name(&self) -> &'static str {
        "LocalizationInterceptor"
    }

    fn process(
        &self,
        request: &Request,
        context: &mut RequestContext,
    ) -> Result<(), InterceptorError> {
        context.localizer = Some(self.translator.bind(&request.locale));
        Ok(())
    }
}

/// Records every incoming request.
pub struct LoggingRequestInterceptor {
    sink: Arc<dyn LogSink>,
}

impl LoggingRequestInterceptor {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl RequestInterceptor for LoggingRequestInterceptor {
    fn name(&self) -> &'static str {
        "LoggingRequestInterceptor"
    }

    fn process(
        &self,
        request: &Request,
        _context: &mut RequestContext,
    ) -> Result<(), InterceptorError> {
        let payload = serde_json::to_string(request)?;
        self.sink.record(LogRecord::IncomingRequest {
            request_id: request.request_id.clone(),
            payload,
        });
        Ok(())
    }
}

/// Records every outgoing response.
pub struct LoggingResponseInterceptor {
    sink: Arc<dyn LogSink>,
}

impl LoggingResponseInterceptor {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl ResponseInterceptor for LoggingResponseInterceptor {
    fn name(&self) -> &'static str {
        "LoggingResponseInterceptor"
    }

    fn process(
        &self,
        request: &Request,
        _context: &RequestContext,
        response: &Response,
    ) -> Result<(), InterceptorError> {
        let payload = serde_json::to_string(response)?;
        self.sink.record(LogRecord::OutgoingResponse {
            request_id: request.request_id.clone(),
            payload,
        });
        Ok(())
    }
}
