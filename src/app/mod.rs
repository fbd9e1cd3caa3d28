//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the repository and worker
//! layers.
//!
//! ```text
//! Keys / Timers → Events → handle_event → State Mutations → Actions → Host / Worker / HTTP
//!                              ↑                                          ↓
//!                              └──────── Repository / Worker Responses ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`browser`]: Debounced search and pagination state machine
//! - [`debounce`]: Cancellable timers over one-shot host timers
//! - [`handler`]: Event processing and screen transitions
//! - [`modes`]: Screen stack entries and input modes
//! - [`state`]: Application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use tierdex::app::{handle_event, AppState, Event};
//! use tierdex::repository::ThemeMode;
//! use tierdex::ui::theme::Palettes;
//!
//! let mut state = AppState::new(Palettes::default(), ThemeMode::Light);
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), tierdex::TierdexError>(())
//! ```

pub mod actions;
pub mod browser;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use browser::{BrowserScope, CharacterBrowser, PAGE_SIZE};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Screen};
pub use state::AppState;
