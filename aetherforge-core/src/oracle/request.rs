use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{ChatMessage, ChatMode, GroundingSource, Role};

use super::OracleBackend;

/// One prior transcript entry, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl From<&ChatMessage> for Turn {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            text: msg.content.clone(),
        }
    }
}

/// Standard-mode request: the new message plus every prior turn, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedQuery {
    pub message: String,
    pub history: Vec<Turn>,
}

/// Strategic-mode request: the scenario text alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepAnalysis {
    pub scenario: String,
}

/// Standard-mode response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundedReply {
    pub text: String,
    /// `None` when the backend attached no grounding metadata at all
    pub sources: Option<Vec<GroundingSource>>,
}

/// Strategic-mode response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepReply {
    pub text: String,
}

/// Either request shape, tagged by the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleRequest {
    Grounded(GroundedQuery),
    DeepAnalysis(DeepAnalysis),
}

/// Mode-independent view of a successful reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OracleReply {
    pub text: String,
    pub sources: Option<Vec<GroundingSource>>,
}

impl From<GroundedReply> for OracleReply {
    fn from(reply: GroundedReply) -> Self {
        Self {
            text: reply.text,
            sources: reply.sources,
        }
    }
}

impl From<DeepReply> for OracleReply {
    fn from(reply: DeepReply) -> Self {
        Self {
            text: reply.text,
            sources: None,
        }
    }
}

impl OracleRequest {
    /// The mode this request was built for.
    pub fn mode(&self) -> ChatMode {
        match self {
            OracleRequest::Grounded(_) => ChatMode::Standard,
            OracleRequest::DeepAnalysis(_) => ChatMode::Strategic,
        }
    }

    /// The user text being answered.
    pub fn text(&self) -> &str {
        match self {
            OracleRequest::Grounded(query) => &query.message,
            OracleRequest::DeepAnalysis(analysis) => &analysis.scenario,
        }
    }

    /// Call the backend method matching this request's mode.
    pub async fn send(&self, backend: &dyn OracleBackend) -> Result<OracleReply> {
        match self {
            OracleRequest::Grounded(query) => backend.grounded_query(query).await.map(Into::into),
            OracleRequest::DeepAnalysis(analysis) => {
                backend.deep_analysis(analysis).await.map(Into::into)
            }
        }
    }
}
