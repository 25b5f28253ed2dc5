//! Engine client: single-in-flight recommendation requests with fallback
//!
//! The client never fails outwardly. Transport errors, malformed replies,
//! and recommendations that are not legal in the current position all
//! collapse into the fallback path: a uniformly random legal move. Callers
//! can still tell the two outcomes apart through [`MoveSource`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::seq::IndexedRandom;
use tracing::{info, warn};

use crate::ai::protocol::{EvaluateRequest, MoveRequest, MoveReply};
use crate::ai::transport::RecommendationTransport;
use crate::error::{SessionError, SessionResult};
use crate::types::{Candidate, Move, Position};

/// How a resolved move was chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveSource {
    /// The recommendation service answered with a valid move
    Engine { score: f64, nodes: i64 },
    /// The service failed or answered nonsense; a random legal move stands in
    Fallback,
}

/// A resolved opponent move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub mv: Move,
    pub source: MoveSource,
}

/// Client for the external move-recommendation service
///
/// At most one request is outstanding at a time: a second call while one is
/// in flight returns `None` immediately, with no new dispatch. The
/// `thinking` flag is observable by presentation code for the duration of a
/// call and is cleared on every exit path.
pub struct EngineClient<T: RecommendationTransport> {
    transport: T,
    depth: u32,
    in_flight: Arc<AtomicBool>,
    thinking: Arc<AtomicBool>,
}

impl<T: RecommendationTransport> EngineClient<T> {
    pub fn new(transport: T, depth: u32) -> Self {
        EngineClient {
            transport,
            depth,
            in_flight: Arc::new(AtomicBool::new(false)),
            thinking: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Search depth forwarded with each request
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Access the underlying transport (handy for instrumented test doubles)
    pub fn transport_ref(&self) -> &T {
        &self.transport
    }

    /// Shared handle to the "thinking" indicator
    pub fn thinking_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.thinking)
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.load(Ordering::SeqCst)
    }

    /// Request a move for the current position
    ///
    /// `candidates` is the enumerated move/position set handed to the
    /// service; `legal` is the legal-move set of the *current* live
    /// position, used both to validate the reply and to draw a fallback.
    ///
    /// Returns `None` without dispatching when a request is already in
    /// flight, and `None` when `legal` is empty (the caller must already be
    /// terminal in that case; this is a consistency check, not a retry
    /// trigger).
    pub async fn request_move(
        &self,
        candidates: &[Candidate],
        legal: &[Move],
    ) -> Option<Recommendation> {
        // Compare-and-set reentrancy guard: at most one outstanding request
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!("[ENGINE] request already in flight, ignoring duplicate trigger");
            return None;
        }
        let _busy = BusyGuard {
            in_flight: Arc::clone(&self.in_flight),
            thinking: Arc::clone(&self.thinking),
        };

        if legal.is_empty() {
            warn!("[ENGINE] no legal moves to recommend; resolving to no move");
            return None;
        }

        self.thinking.store(true, Ordering::SeqCst);

        let request = MoveRequest::from_candidates(candidates, self.depth);
        let recommendation = match self.transport.best_move(&request).await {
            Ok(reply) => match self.validate(reply, legal) {
                Ok(recommendation) => recommendation,
                Err(e) => {
                    warn!("[ENGINE] rejected recommendation: {e}");
                    self.fallback(legal)
                }
            },
            Err(e) => {
                warn!("[ENGINE] request failed: {e}");
                self.fallback(legal)
            }
        };

        Some(recommendation)
    }

    /// Advisory single-position evaluation (`/api/evaluate`)
    ///
    /// No fallback here: the score is informational, so failures surface.
    pub async fn evaluate(&self, position: &Position) -> SessionResult<f64> {
        let request = EvaluateRequest {
            fen: position.fen().to_string(),
        };
        let reply = self.transport.evaluate(&request).await?;
        Ok(reply.score)
    }

    /// Accept the service's move only if it is legal right now
    fn validate(&self, reply: MoveReply, legal: &[Move]) -> SessionResult<Recommendation> {
        let text = reply.mv.ok_or_else(|| SessionError::EngineRequest {
            message: "response body lacked a move".to_string(),
        })?;
        let mv: Move = text.parse()?;

        if !legal.contains(&mv) {
            return Err(SessionError::EngineRequest {
                message: format!("recommended move {mv} is not legal in the current position"),
            });
        }

        info!(
            "[ENGINE] recommendation accepted: {mv} (score {}, {} nodes)",
            reply.score, reply.nodes
        );
        Ok(Recommendation {
            mv,
            source: MoveSource::Engine {
                score: reply.score,
                nodes: reply.nodes,
            },
        })
    }

    /// Uniformly random legal move; `legal` is checked non-empty by the caller
    fn fallback(&self, legal: &[Move]) -> Recommendation {
        let mv = *legal
            .choose(&mut rand::rng())
            .expect("fallback requires a non-empty legal-move set");
        info!("[ENGINE] falling back to random legal move {mv}");
        Recommendation {
            mv,
            source: MoveSource::Fallback,
        }
    }
}

/// Clears the in-flight and thinking flags on every exit path,
/// including cancellation of the request future
struct BusyGuard {
    in_flight: Arc<AtomicBool>,
    thinking: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.thinking.store(false, Ordering::SeqCst);
        self.in_flight.store(false, Ordering::SeqCst);
    }
}
