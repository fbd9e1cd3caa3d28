//! Sandbox path helpers.
//!
//! Inside the Zellij plugin sandbox the host filesystem is mounted under
//! `/host`, which normally resolves to the directory Zellij was started from
//! (usually the user's home).

use std::path::PathBuf;

/// File holding the persisted theme preference.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Local catalog used when none is configured.
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Returns `/host/.local/share/zellij/tierdex`.
///
/// # Examples
///
/// ```
/// use tierdex::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/tierdex"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("tierdex")
}

/// Expands `~` to the sandbox home mount.
///
/// # Examples
///
/// ```
/// use tierdex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/anime/catalog.json"), "/host/anime/catalog.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/catalog.json"), "/tmp/catalog.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Resolves a configured file name: absolute and `~` paths are used as given,
/// bare names land in the data directory.
///
/// # Examples
///
/// ```
/// use tierdex::infrastructure::resolve_data_file;
///
/// assert_eq!(
///     resolve_data_file("catalog.json").to_str(),
///     Some("/host/.local/share/zellij/tierdex/catalog.json")
/// );
/// assert_eq!(resolve_data_file("~/c.json").to_str(), Some("/host/c.json"));
/// ```
#[must_use]
pub fn resolve_data_file(name: &str) -> PathBuf {
    let expanded = expand_tilde(name.trim());
    if expanded.starts_with('/') {
        PathBuf::from(expanded)
    } else {
        get_data_dir().join(expanded)
    }
}
