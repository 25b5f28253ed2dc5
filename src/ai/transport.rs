//! HTTP boundary to the recommendation service
//!
//! [`RecommendationTransport`] is the seam: the client logic depends on the
//! trait, production wires in [`HttpRecommender`], tests wire in mocks.

use async_trait::async_trait;
use tracing::debug;

use crate::ai::protocol::{EvaluateReply, EvaluateRequest, MoveRequest, MoveReply};
use crate::config::EngineConfig;
use crate::error::{SessionError, SessionResult};

/// Transport for recommendation-service calls
///
/// Implementations report any transport or decode problem as
/// [`SessionError::EngineRequest`]; the client absorbs those into its
/// fallback path.
#[async_trait]
pub trait RecommendationTransport: Send + Sync {
    /// `POST /api/get-move`
    async fn best_move(&self, request: &MoveRequest) -> SessionResult<MoveReply>;

    /// `POST /api/evaluate`
    async fn evaluate(&self, request: &EvaluateRequest) -> SessionResult<EvaluateReply>;
}

/// Production transport over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpRecommender {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRecommender {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpRecommender {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<Req, Reply>(&self, path: &str, request: &Req) -> SessionResult<Reply>
    where
        Req: serde::Serialize + Sync,
        Reply: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(target: "transport", "[ENGINE] POST {url}");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SessionError::EngineRequest {
                message: format!("transport error calling {url}: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::EngineRequest {
                message: format!("service returned {status} for {url}"),
            });
        }

        response
            .json::<Reply>()
            .await
            .map_err(|e| SessionError::EngineRequest {
                message: format!("malformed response from {url}: {e}"),
            })
    }
}

#[async_trait]
impl RecommendationTransport for HttpRecommender {
    async fn best_move(&self, request: &MoveRequest) -> SessionResult<MoveReply> {
        self.post_json("api/get-move", request).await
    }

    async fn evaluate(&self, request: &EvaluateRequest) -> SessionResult<EvaluateReply> {
        self.post_json("api/evaluate", request).await
    }
}
