//! Diagnostic records emitted by the pipeline and where they go.

use std::sync::Mutex;

/// One diagnostic record. The payloads are pre-rendered JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    IncomingRequest {
        request_id: String,
        payload: String,
    },
    OutgoingResponse {
        request_id: String,
        payload: String,
    },
    HandlerFault {
        request_id: String,
        handler: String,
        error: String,
    },
    SessionEnded {
        request_id: String,
        reason: Option<String>,
    },
}

/// Destination for [`LogRecord`]s. Shared across concurrent invocations.
pub trait LogSink: Send + Sync {
    fn record(&self, record: LogRecord);
}

/// Forwards records to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn record(&self, record: LogRecord) {
        match record {
            LogRecord::IncomingRequest { request_id, payload } => {
                tracing::info!(%request_id, "Incoming request: {}", payload)
            }
            LogRecord::OutgoingResponse { request_id, payload } => {
                tracing::info!(%request_id, "Outgoing response: {}", payload)
            }
            LogRecord::HandlerFault {
                request_id,
                handler,
                error,
            } => tracing::error!(%request_id, %handler, "Error handled: {}", error),
            LogRecord::SessionEnded { request_id, reason } => {
                tracing::info!(%request_id, reason = ?reason, "Session ended")
            }
        }
    }
}

/// Keeps records in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn faults(&self) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| matches!(r, LogRecord::HandlerFault { .. }))
            .collect()
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, record: LogRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}
