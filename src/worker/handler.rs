//! Worker thread owning the local catalog and the preference file.
//!
//! All file I/O happens here so the plugin's render loop never blocks. The
//! catalog is opened lazily on the first message that needs it.

use crate::domain::error::{Result, TierdexError};
use crate::infrastructure::paths::{self, DEFAULT_CATALOG_FILE, PREFERENCES_FILE};
use crate::repository::{self, CharacterRepository, JsonCatalog, PreferenceStore, RepoOutcome};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

#[derive(Serialize, Deserialize, Default)]
pub struct TierdexWorker {
    #[serde(skip)]
    catalog: Option<Box<dyn CharacterRepository>>,
    #[serde(skip)]
    catalog_path: Option<PathBuf>,
    #[serde(skip)]
    preferences_path: Option<PathBuf>,
}

impl TierdexWorker {
    /// Worker bound to explicit files instead of the sandbox data directory.
    ///
    /// ```no_run
    /// use tierdex::worker::{TierdexWorker, WorkerMessage};
    ///
    /// let mut worker = TierdexWorker::with_paths("/tmp/catalog.json".into(), "/tmp/prefs.json".into());
    /// let response = worker.handle_message(WorkerMessage::load_preferences());
    /// println!("{response:?}");
    /// ```
    #[must_use]
    pub fn with_paths(catalog_path: PathBuf, preferences_path: PathBuf) -> Self {
        Self {
            catalog: None,
            catalog_path: Some(catalog_path),
            preferences_path: Some(preferences_path),
        }
    }

    fn catalog_path(&self) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| paths::resolve_data_file(DEFAULT_CATALOG_FILE))
    }

    fn preference_store(&self) -> PreferenceStore {
        let path = self
            .preferences_path
            .clone()
            .unwrap_or_else(|| paths::get_data_dir().join(PREFERENCES_FILE));
        PreferenceStore::new(path)
    }

    /// The open catalog, opening it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be created or parsed.
    fn catalog(&mut self) -> Result<&mut Box<dyn CharacterRepository>> {
        if self.catalog.is_none() {
            let path = self.catalog_path();
            let catalog: Box<dyn CharacterRepository> = Box::new(JsonCatalog::new(path)?);
            self.catalog = Some(catalog);
        }
        self.catalog
            .as_mut()
            .ok_or_else(|| TierdexError::Worker("catalog not initialized".to_string()))
    }

    /// Logs the result of a file operation and maps it to a response.
    fn handle_io_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_open_catalog(&mut self, catalog_file: &str) -> WorkerResponse {
        let path = paths::resolve_data_file(catalog_file);
        if self.catalog_path.as_ref() != Some(&path) {
            tracing::debug!(path = ?path, "switching catalog file");
            self.catalog_path = Some(path);
            self.catalog = None;
        }
        Self::handle_io_result("open catalog", self.catalog().map(|_| ()), |()| {
            WorkerResponse::CatalogOpened
        })
    }

    fn handle_load_preferences(&self) -> WorkerResponse {
        Self::handle_io_result("load preferences", self.preference_store().load(), |mode| {
            WorkerResponse::PreferencesLoaded { mode }
        })
    }

    fn handle_save_theme(&self, mode: repository::ThemeMode) -> WorkerResponse {
        Self::handle_io_result("save theme", self.preference_store().save(mode), |()| {
            WorkerResponse::ThemeSaved { mode }
        })
    }

    /// Reconstructs the sender's span context so worker spans join its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::OpenCatalog { catalog_file, .. } => self.handle_open_catalog(&catalog_file),
            WorkerMessage::Repository {
                request_id,
                request,
                ..
            } => {
                let kind = request.kind();
                let outcome = match self.catalog() {
                    Ok(catalog) => repository::execute(catalog.as_mut(), request),
                    Err(e) => {
                        tracing::warn!(kind, error = %e, "catalog unavailable");
                        RepoOutcome::Failed {
                            message: e.to_string(),
                        }
                    }
                };
                WorkerResponse::Repository {
                    request_id,
                    outcome,
                }
            }
            WorkerMessage::LoadPreferences { .. } => self.handle_load_preferences(),
            WorkerMessage::SaveTheme { mode, .. } => self.handle_save_theme(mode),
        }
    }
}

fn init_worker_tracing() {
    crate::observability::init_tracing(&crate::Config::default());
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for TierdexWorker {
    /// Deserializes a [`WorkerMessage`], handles it and posts the
    /// [`WorkerResponse`] back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{RepoRequest, RequestId, RequestTarget, ThemeMode};
    use tempfile::TempDir;

    fn worker(dir: &TempDir) -> TierdexWorker {
        TierdexWorker::with_paths(dir.path().join("catalog.json"), dir.path().join("prefs.json"))
    }

    #[test]
    fn repository_requests_echo_their_id() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);
        let request_id = RequestId::new(RequestTarget::TierList, 4);

        let response = worker.handle_message(WorkerMessage::repository(request_id, RepoRequest::ListTiers));
        let WorkerResponse::Repository { request_id: echoed, outcome } = response else {
            panic!("expected a repository response");
        };
        assert_eq!(echoed, request_id);
        assert!(matches!(outcome, RepoOutcome::Tiers(tiers) if tiers.len() == 54));
    }

    #[test]
    fn theme_round_trips_through_preference_file() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);

        assert_eq!(
            worker.handle_message(WorkerMessage::load_preferences()),
            WorkerResponse::PreferencesLoaded { mode: ThemeMode::Light }
        );
        assert_eq!(
            worker.handle_message(WorkerMessage::save_theme(ThemeMode::Dark)),
            WorkerResponse::ThemeSaved { mode: ThemeMode::Dark }
        );
        assert_eq!(
            worker.handle_message(WorkerMessage::load_preferences()),
            WorkerResponse::PreferencesLoaded { mode: ThemeMode::Dark }
        );
    }

    #[test]
    fn corrupt_catalog_fails_inside_the_outcome() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("catalog.json"), "{ not json").unwrap();
        let mut worker = worker(&dir);

        let response = worker.handle_message(WorkerMessage::repository(
            RequestId::new(RequestTarget::Browser, 1),
            RepoRequest::GetCharacter { id: 1 },
        ));
        assert!(matches!(
            response,
            WorkerResponse::Repository { outcome: RepoOutcome::Failed { .. }, .. }
        ));
    }
}
