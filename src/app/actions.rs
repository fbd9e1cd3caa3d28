//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never touches the host. It
//! returns a list of [`Action`]s that the plugin shim carries out in order:
//! hiding the pane, posting to the worker, sending a repository request to
//! whichever backend is configured, or arming a host timer.

use crate::repository::{RepoRequest, RequestId};
use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message (catalog or preference work) to the background worker.
    PostToWorker(WorkerMessage),

    /// Sends a repository request to the configured backend.
    ///
    /// The answer must come back as
    /// [`Event::RepositoryResponse`](crate::app::Event::RepositoryResponse)
    /// carrying the same `request_id`.
    Dispatch {
        request_id: RequestId,
        request: RepoRequest,
    },

    /// Schedules one host timer. Its expiry is reported as
    /// [`Event::DebounceElapsed`](crate::app::Event::DebounceElapsed).
    ArmTimer { seconds: f64 },
}
