//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer decides; the runtime performs the I/O, spawns the login task
//! and calls `cancel()` on tokens it is handed.

use tokio_util::sync::CancellationToken;

use crate::common::RequestId;

#[derive(Debug)]
pub enum UiEffect {
    /// Leave the screen without navigating.
    Quit,

    /// Call the auth provider. The result comes back as
    /// `UiEvent::LoginFinished` with the same `request`.
    Login {
        request: RequestId,
        cancel: CancellationToken,
        email: String,
        password: String,
    },

    /// Abandon an in-flight login.
    CancelLogin { token: CancellationToken },

    Navigate { path: String, replace: bool },

    /// Acknowledge the provider's session-expired message.
    ClearExpiredMessage,
}
