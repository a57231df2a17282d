//! Oracle backend interface.
//!
//! The Oracle chat talks to a remote language model through two call shapes:
//! - **grounded query** (standard mode): full history plus the new message,
//!   optionally returning grounding sources
//! - **deep analysis** (strategic mode): the new scenario only, never sources
//!
//! [`OracleBackend`] is the seam between the conversation orchestrator and the
//! network. [`GeminiClient`] is the production implementation; tests supply
//! their own stubs.

mod dispatcher;
mod gemini;
mod request;

pub use dispatcher::{Dispatcher, InFlight};
pub use gemini::GeminiClient;
pub use request::{
    DeepAnalysis, DeepReply, GroundedQuery, GroundedReply, OracleReply, OracleRequest, Turn,
};

use async_trait::async_trait;

use crate::config::OracleConfig;
use crate::error::Result;

/// Remote assistant service with one method per chat mode.
///
/// Implementations raise [`crate::Error::Config`] when credentials are missing
/// (before touching the network) and [`crate::Error::Service`] for any other
/// failure. A call either fully succeeds with text or fails.
#[async_trait]
pub trait OracleBackend: Send + Sync {
    /// Standard mode: answer `query.message` in the context of `query.history`.
    async fn grounded_query(&self, query: &GroundedQuery) -> Result<GroundedReply>;

    /// Strategic mode: analyze a single scenario.
    async fn deep_analysis(&self, request: &DeepAnalysis) -> Result<DeepReply>;
}

/// Create the default HTTP-backed Oracle backend.
pub fn create_backend(config: &OracleConfig) -> Result<std::sync::Arc<dyn OracleBackend>> {
    Ok(std::sync::Arc::new(GeminiClient::new(config.clone())?))
}
