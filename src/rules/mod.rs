//! Rules Engine boundary
//!
//! The session does not know chess rules. Everything rule-shaped (legality,
//! check and checkmate detection, draw conditions, position serialization)
//! is delegated to the `shakmaty` rules library through [`BoardEngine`],
//! which adds the one thing the session needs on top: an explicit
//! apply/undo stack so exploratory moves can be reverted.

mod board;

pub use board::BoardEngine;
