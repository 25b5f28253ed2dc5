//! Session ownership: turn gating, move application, and status flow
//!
//! [`SessionController`] is the single owner of live game state. Everything
//! else collaborates with it explicitly; there is no ambient shared state.

pub mod controller;
pub mod phase;
pub mod view;

pub use controller::SessionController;
pub use phase::{SessionPhase, TerminalReason};
pub use view::SessionView;
