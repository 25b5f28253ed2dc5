//! Engine Client: the remote move-recommendation pipeline
//!
//! Talks to the external recommendation service over HTTP, guarded so that
//! at most one request is ever outstanding, and backed by a deterministic
//! local fallback (uniform random legal move) so the session never stalls
//! on a failed or nonsensical recommendation.
//!
//! Split the way the concerns split:
//! - [`protocol`]: serde wire types for the service's JSON contract
//! - [`transport`]: the HTTP boundary behind a trait, mockable in tests
//! - [`client`]: the in-flight guard, validation, and fallback policy

pub mod client;
pub mod protocol;
pub mod transport;

pub use client::{EngineClient, MoveSource, Recommendation};
pub use transport::{HttpRecommender, RecommendationTransport};
