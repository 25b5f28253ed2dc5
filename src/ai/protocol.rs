//! Wire types for the recommendation service's JSON contract
//!
//! Request: `{ "positions": [ { "move": "e2e4", "fen": "..." }, ... ], "depth": 3 }`
//! posted to `POST {base}/api/get-move`.
//!
//! Success reply: `{ "move": "e2e4", "score": 35, "nodes": 1234 }`.
//! A reply lacking `move` (or a non-2xx status at the transport layer) is a
//! failure and routes to the client's fallback path.

use serde::{Deserialize, Serialize};

use crate::types::Candidate;

/// One candidate on the wire: a coordinate-notation move and the FEN it leads to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePayload {
    #[serde(rename = "move")]
    pub mv: String,
    pub fen: String,
}

/// Request body for `POST /api/get-move`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub positions: Vec<CandidatePayload>,
    pub depth: u32,
}

impl MoveRequest {
    /// Build the wire request from enumerated candidates
    ///
    /// A depth-0 base-case candidate (no move) serializes with an empty move
    /// string; in practice requests are built from depth >= 1 enumerations.
    pub fn from_candidates(candidates: &[Candidate], depth: u32) -> Self {
        MoveRequest {
            positions: candidates
                .iter()
                .map(|c| CandidatePayload {
                    mv: c.mv.map(|m| m.uci()).unwrap_or_default(),
                    fen: c.position.fen().to_string(),
                })
                .collect(),
            depth,
        }
    }
}

/// Reply body from `POST /api/get-move`
///
/// `mv` is optional so a body lacking `move` deserializes cleanly and can be
/// routed to the fallback path instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoveReply {
    #[serde(rename = "move")]
    pub mv: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub nodes: i64,
}

/// Request body for `POST /api/evaluate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub fen: String,
}

/// Reply body from `POST /api/evaluate`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluateReply {
    pub score: f64,
    pub fen: String,
}
