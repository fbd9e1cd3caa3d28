//! Domain layer for the Tierdex plugin.
//!
//! Pure types and rules with no Zellij or storage dependencies: the tier
//! classifier, the character and tier models, the add/edit form and the
//! crate-wide error type.
//!
//! # Organization
//!
//! - [`classifier`]: power level to tier code, tier colors and fallback names
//! - [`character`]: character records, statistics and form drafts
//! - [`tier`]: tier reference records
//! - [`form`]: add/edit form state and validation
//! - [`error`]: error types and result aliases
//!
//! # Examples
//!
//! ```
//! use tierdex::domain::classifier::{color_for_tier, derive_tier_code};
//!
//! let code = derive_tier_code(33);
//! assert_eq!(code, "5-A");
//! assert_eq!(color_for_tier(code), "#f1c40f");
//! ```

pub mod character;
pub mod classifier;
pub mod error;
pub mod form;
pub mod tier;

pub use character::{Character, CharacterDraft, Statistics, PLACEHOLDER_IMAGE};
pub use error::{Result, TierdexError};
pub use form::{CharacterForm, FormField, FormMode, ValidationError};
pub use tier::Tier;
