//! Core building blocks for the Doorway sign-in flow.
//!
//! Everything here is UI-agnostic: credential validation, locale strings,
//! the auth provider contract and its HTTP implementation, the on-disk
//! session store, navigation and configuration.

pub mod auth;
pub mod config;
pub mod locale;
pub mod navigation;
pub mod validation;

pub use auth::{AuthError, AuthProvider, SessionSnapshot};
pub use locale::{Locale, Strings};
pub use navigation::{HistoryNavigator, NavigateOptions, Navigator};
pub use validation::{Field, FieldErrors, ValidationError, validate};
