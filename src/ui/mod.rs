//! Terminal UI rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready snapshots of each screen
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: per-element renderers
//! - [`helpers`]: cursor, badge, highlighting and text fitting utilities
//! - [`theme`]: light and dark palettes, ANSI escape generation
//!
//! # Example
//!
//! ```rust,no_run
//! use tierdex::app::AppState;
//! use tierdex::repository::ThemeMode;
//! use tierdex::ui::{render, theme::Palettes};
//!
//! let state = AppState::new(Palettes::default(), ThemeMode::Dark);
//! render(&state, 24, 80);
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Palettes, Theme};
pub use viewmodel::{Body, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
