//! Login screen state.
//!
//! ```text
//! AppState
//! ├── form: LoginForm      (inputs, errors, focus, phase)
//! ├── login: LatestOnly    (in-flight login request)
//! ├── mounted              (false once the screen is gone)
//! └── should_quit
//! ```

use doorway_core::{Field, FieldErrors, Locale, Strings};

use crate::common::{LatestOnly, RequestId};

/// Control holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Email,
    Password,
    Submit,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Submit,
            Focus::Submit => Focus::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Email => Focus::Submit,
            Focus::Password => Focus::Email,
            Focus::Submit => Focus::Password,
        }
    }

    /// The editable field behind this control, if any.
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Email => Some(Field::Email),
            Focus::Password => Some(Field::Password),
            Focus::Submit => None,
        }
    }
}

/// Where the current submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting(RequestId),
    /// Terminal: the screen has handed off to another location.
    NavigatedAway,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field_errors: FieldErrors,
    pub submit_error: Option<String>,
    /// Captured at mount and kept for the lifetime of the screen.
    pub expired_notice: Option<String>,
    pub focus: Focus,
    pub phase: Phase,
}

impl LoginForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting(_))
    }
}

#[derive(Debug)]
pub struct AppState {
    pub form: LoginForm,
    pub locale: Locale,
    pub landing_path: String,
    pub login: LatestOnly,
    pub mounted: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(locale: Locale, landing_path: impl Into<String>) -> Self {
        Self {
            form: LoginForm::default(),
            locale,
            landing_path: landing_path.into(),
            login: LatestOnly::default(),
            mounted: false,
            should_quit: false,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        self.locale.strings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut focus = Focus::Email;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Email);
        assert_eq!(Focus::Email.prev(), Focus::Submit);
        assert_eq!(Focus::Submit.field(), None);
    }
}
