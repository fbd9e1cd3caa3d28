//! Worker thread message types for cross-thread communication.
//!
//! Requests and responses exchanged between the plugin thread and the
//! background worker that owns the local catalog and the preference file.
//! Every request carries the sender's trace context so worker spans join the
//! plugin's trace.

use crate::repository::{RepoOutcome, RepoRequest, RequestId, ThemeMode};
use serde::{Deserialize, Serialize};

/// OpenTelemetry identifiers of the span that sent a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// 32 hex digits.
    pub trace_id: String,
    /// 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the current span, or `None` when no valid OpenTelemetry
    /// context is active (tracing disabled, or outside any span).
    ///
    /// ```no_run
    /// use tierdex::worker::TraceContext;
    ///
    /// if let Some(ctx) = TraceContext::from_current() {
    ///     assert_eq!(ctx.trace_id.len(), 32);
    /// }
    /// ```
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span = otel_context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates one constructor per `WorkerMessage` variant that fills in
/// `trace_context` from the current span.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` message tagged with the current span.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    open_catalog(OpenCatalog { catalog_file: String }),
    repository(Repository { request_id: RequestId, request: RepoRequest }),
    load_preferences(LoadPreferences {}),
    save_theme(SaveTheme { mode: ThemeMode }),
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Opens (or creates) the local catalog. Sent once before any
    /// repository request; without it the worker opens the default file.
    OpenCatalog {
        /// Catalog file name or path, resolved against the data directory.
        catalog_file: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Runs one repository operation against the local catalog.
    Repository {
        /// Echoed back in the response.
        request_id: RequestId,
        request: RepoRequest,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Reads the persisted theme mode.
    LoadPreferences {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persists the theme mode.
    SaveTheme {
        mode: ThemeMode,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::OpenCatalog { trace_context, .. }
            | Self::Repository { trace_context, .. }
            | Self::LoadPreferences { trace_context }
            | Self::SaveTheme { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog file is open and seeded.
    CatalogOpened,

    /// Answer to a [`WorkerMessage::Repository`]. Repository failures are
    /// reported inside the outcome, not as [`WorkerResponse::Error`].
    Repository {
        request_id: RequestId,
        outcome: RepoOutcome,
    },

    PreferencesLoaded {
        mode: ThemeMode,
    },

    ThemeSaved {
        mode: ThemeMode,
    },

    /// Catalog or preference I/O failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RequestTarget;

    #[test]
    fn messages_survive_the_thread_boundary() {
        let message = WorkerMessage::repository(
            RequestId::new(RequestTarget::Detail, 7),
            RepoRequest::GetCharacter { id: 3 },
        );
        let payload = serde_json::to_string(&message).unwrap();
        let decoded: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn missing_trace_context_is_omitted() {
        let message = WorkerMessage::LoadPreferences { trace_context: None };
        let payload = serde_json::to_string(&message).unwrap();
        assert!(!payload.contains("trace_context"));
        assert!(message.trace_context().is_none());
    }
}
