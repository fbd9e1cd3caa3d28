//! Filesystem locations in the Zellij plugin sandbox.

pub mod paths;

pub use paths::{
    expand_tilde, get_data_dir, resolve_data_file, DEFAULT_CATALOG_FILE, PREFERENCES_FILE,
};
