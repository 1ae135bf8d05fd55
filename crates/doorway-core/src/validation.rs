//! Client-side credential validation.
//!
//! `validate` is a pure function of the input pair. It never short-circuits:
//! every rule runs, so a short all-digit password reports both the length
//! and the composition problem.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::locale::Strings;

/// Minimum accepted password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A form field that can carry validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single failed validation rule.
///
/// The `Display` text is the English message; use [`ValidationError::message`]
/// to render it in another locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter a valid email format")]
    InvalidEmail,
    #[error("password must be at least 8 characters")]
    PasswordTooShort,
    #[error("password must contain letters and digits")]
    PasswordComposition,
}

impl ValidationError {
    /// The field this rule belongs to.
    pub fn field(self) -> Field {
        match self {
            ValidationError::InvalidEmail => Field::Email,
            ValidationError::PasswordTooShort | ValidationError::PasswordComposition => {
                Field::Password
            }
        }
    }

    /// Localized message for this rule.
    pub fn message(self, strings: &Strings) -> &'static str {
        match self {
            ValidationError::InvalidEmail => strings.invalid_email,
            ValidationError::PasswordTooShort => strings.password_too_short,
            ValidationError::PasswordComposition => strings.password_composition,
        }
    }
}

/// Validation result: failing fields mapped to the rules they broke.
///
/// An empty value means the credentials may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, Vec<ValidationError>>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.entry(error.field()).or_default().push(error);
    }

    /// Rules broken by `field`, in the order they were checked.
    pub fn get(&self, field: Field) -> &[ValidationError] {
        self.errors.get(&field).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, error: ValidationError) -> bool {
        self.get(error.field()).contains(&error)
    }

    /// Drops every message attached to `field`.
    pub fn clear_field(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Names of the failing fields, for logging.
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.keys().map(|field| field.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.errors.values().flatten().copied()
    }
}

/// Returns true if `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Runs every rule against the pair and collects the failures.
pub fn validate(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if !is_valid_email(email) {
        errors.push(ValidationError::InvalidEmail);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(ValidationError::PasswordTooShort);
    }

    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        errors.push(ValidationError::PasswordComposition);
    }

    errors
}
