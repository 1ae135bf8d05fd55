//! Terminal login screen.
//!
//! Elm-style split: `update` is a pure reducer over `AppState`, `render`
//! draws it, and the runtime executes the effects the reducer returns.

mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
mod terminal;
#[cfg(test)]
mod test_support;
pub mod update;

pub use common::RequestId;
pub use runtime::{
    HeadlessOutcome, LoginOutcome, LoginPage, PageOptions, TuiRuntime, run_headless,
};
