//! Background worker for catalog and preference I/O.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: the worker and its message dispatch

pub mod handler;
pub mod messages;

pub use handler::TierdexWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
