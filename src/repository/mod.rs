//! Repository layer: where characters and tiers live.
//!
//! # Modules
//!
//! - `backend`: the [`CharacterRepository`] contract and [`Page`]
//! - `requests`: serializable requests/outcomes exchanged with the worker
//! - `models`: lenient row records and write payloads
//! - `json`: local JSON catalog implementation
//! - `rest`: Supabase PostgREST request builder and response decoder
//! - `preferences`: persisted light/dark theme choice

pub mod backend;
pub mod json;
pub mod models;
pub mod preferences;
pub mod requests;
pub mod rest;

pub use backend::{execute, CharacterRepository, Page};
pub use json::JsonCatalog;
pub use preferences::{PreferenceStore, ThemeMode};
pub use requests::{RepoOutcome, RepoRequest, RequestId, RequestTarget};
pub use rest::RestClient;
