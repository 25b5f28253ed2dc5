//! chess-session: turn/session coordination for human-vs-engine chess
//!
//! Coordinates one game session between a human and a remote
//! move-recommendation service: turn gating, move application, candidate
//! enumeration for lookahead requests, a single-in-flight engine client
//! with random-move fallback, and history replay.

pub mod ai;
pub mod config;
pub mod error;
pub mod lookahead;
pub mod replay;
pub mod rules;
pub mod session;
pub mod types;

pub use ai::{EngineClient, HttpRecommender, MoveSource, Recommendation};
pub use config::EngineConfig;
pub use error::{SessionError, SessionResult};
pub use lookahead::PositionEnumerator;
pub use replay::HistoryReplayer;
pub use rules::BoardEngine;
pub use session::{SessionController, SessionPhase, SessionView};
