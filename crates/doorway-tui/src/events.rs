//! UI event types consumed by the reducer.

use crossterm::event::Event;
use doorway_core::{AuthError, Field, SessionSnapshot};

use crate::common::RequestId;

#[derive(Debug)]
pub enum UiEvent {
    /// The screen became visible; carries the provider's session signal.
    Mounted(SessionSnapshot),
    /// The provider's authenticated flag changed after mount.
    SessionChanged { authenticated: bool },
    Terminal(Event),
    /// Replaces a field's whole value (paste, headless input).
    EditField { field: Field, value: String },
    Submit,
    LoginFinished {
        request: RequestId,
        result: Result<(), AuthError>,
    },
    Unmounted,
}
