//! Tierdex: a Zellij plugin cataloguing anime characters by power tier.
//!
//! Tierdex keeps a catalog of characters, each classified into one of the
//! 54 power tiers (`11-C` up to `0`) derived from a 0–100 power level. It
//! provides:
//! - A searchable, paginated character browser with debounced queries
//! - Character detail, add and edit screens with live tier derivation
//! - A tier reference table and per-tier character listings
//! - Two interchangeable backends: a local JSON catalog or Supabase
//! - A light/dark theme toggle that survives restarts

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, timers, host HTTP
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← screen stack
//! │  - Event handling, browsers, debounce               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Repository    │   │ Worker Layer  │
//! │ (ui/)         │   │ (repository/) │   │ (worker/)     │
//! │ - Components  │   │ - JSON catalog│   │ - Catalog I/O │
//! │ - Palettes    │   │ - PostgREST   │   │ - Preferences │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │  ← pure rules
//! │  - Tier classifier, characters, form validation     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: screen stack, event handling and view models
//! - [`domain`]: tier classifier, character and tier types, errors
//! - [`infrastructure`]: data directory resolution
//! - [`repository`]: the repository contract and both backends
//! - [`worker`]: background worker owning the local catalog
//! - [`ui`]: terminal rendering and palettes
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/tierdex.wasm" {
//!         backend "supabase"
//!         supabase_url "https://project.supabase.co"
//!         supabase_key "anon-key"
//!         theme "dark"
//!         trace_level "tierdex=debug"
//!     }
//! }
//! ```
//!
//! With the default `local` backend every repository request is answered by
//! the worker from `catalog.json` in the plugin data directory. With
//! `supabase` the requests go out through the host's `web_request` and the
//! answers are decoded on the plugin thread.
//!
//! # Example
//!
//! ```rust
//! use tierdex::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(actions.iter().any(|a| matches!(a, Action::Dispatch { .. })));
//! # Ok::<(), tierdex::TierdexError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod repository;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen};
pub use domain::{Result, TierdexError};
pub use repository::ThemeMode;
pub use ui::Theme;

use std::collections::BTreeMap;

/// Where repository requests are answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Backend {
    /// JSON catalog owned by the worker.
    #[default]
    Local,
    /// Supabase PostgREST over the host's HTTP API.
    Supabase { url: String, key: String },
}

/// Plugin configuration parsed from the KDL plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,

    /// Catalog file for the local backend, relative to the data directory
    /// unless absolute or `~`-prefixed. Default: `catalog.json`
    pub catalog_file: String,

    /// Palette used until the stored preference is read.
    pub theme_mode: ThemeMode,

    /// TOML palette replacing the built-in light theme.
    pub light_theme_file: Option<String>,

    /// TOML palette replacing the built-in dark theme.
    pub dark_theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `info`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Local,
            catalog_file: infrastructure::DEFAULT_CATALOG_FILE.to_string(),
            theme_mode: ThemeMode::default(),
            light_theme_file: None,
            dark_theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Unknown keys are ignored and blank values count as absent. A
    /// `supabase` backend missing its url or key falls back to the local
    /// catalog with a warning.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tierdex::{Backend, Config, ThemeMode};
    ///
    /// let map = BTreeMap::from([
    ///     ("backend".to_string(), "supabase".to_string()),
    ///     ("supabase_url".to_string(), "https://x.supabase.co".to_string()),
    ///     ("supabase_key".to_string(), "anon".to_string()),
    ///     ("theme".to_string(), "dark".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert!(matches!(config.backend, Backend::Supabase { .. }));
    /// assert_eq!(config.theme_mode, ThemeMode::Dark);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let backend = match value("backend").as_deref() {
            Some(name) if name.eq_ignore_ascii_case("supabase") => {
                match (value("supabase_url"), value("supabase_key")) {
                    (Some(url), Some(key)) => Backend::Supabase { url, key },
                    _ => {
                        tracing::warn!("supabase backend needs supabase_url and supabase_key, using local catalog");
                        Backend::Local
                    }
                }
            }
            Some(name) if !name.eq_ignore_ascii_case("local") => {
                tracing::warn!(backend = %name, "unknown backend, using local catalog");
                Backend::Local
            }
            _ => Backend::Local,
        };

        Self {
            backend,
            catalog_file: value("catalog_file")
                .unwrap_or_else(|| infrastructure::DEFAULT_CATALOG_FILE.to_string()),
            theme_mode: value("theme").map_or_else(ThemeMode::default, |v| ThemeMode::from_config(&v)),
            light_theme_file: value("light_theme_file"),
            dark_theme_file: value("dark_theme_file"),
            trace_level: value("trace_level"),
        }
    }
}

/// Builds the initial application state: palettes loaded (custom files
/// falling back to the built-ins) and the configured theme mode selected.
/// Nothing is fetched until [`Event::Mount`] is handled.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(backend = ?config.backend, "initializing tierdex plugin");

    let palettes = ui::Palettes::load(
        config.light_theme_file.as_deref(),
        config.dark_theme_file.as_deref(),
    );
    AppState::new(palettes, config.theme_mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
        assert_eq!(Config::default().catalog_file, "catalog.json");
    }

    #[test]
    fn supabase_without_key_falls_back_to_local() {
        let config = Config::from_zellij(&map(&[
            ("backend", "supabase"),
            ("supabase_url", "https://x.supabase.co"),
        ]));
        assert_eq!(config.backend, Backend::Local);
    }

    #[test]
    fn supabase_with_credentials() {
        let config = Config::from_zellij(&map(&[
            ("backend", "Supabase"),
            ("supabase_url", " https://x.supabase.co "),
            ("supabase_key", "anon"),
        ]));
        assert_eq!(
            config.backend,
            Backend::Supabase {
                url: "https://x.supabase.co".into(),
                key: "anon".into()
            }
        );
    }

    #[test]
    fn blank_values_count_as_absent() {
        let config = Config::from_zellij(&map(&[("catalog_file", "  "), ("trace_level", "")]));
        assert_eq!(config.catalog_file, "catalog.json");
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn initial_theme_comes_from_config() {
        let config = Config::from_zellij(&map(&[("theme", "dark")]));
        let state = initialize(&config);
        assert_eq!(state.theme_mode, ThemeMode::Dark);
        assert_eq!(state.screen(), Screen::Browser);
    }
}
