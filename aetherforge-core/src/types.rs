//! Core domain types for aetherforge
//!
//! Two families of types live here:
//! - The **codex** records: a fixed, compile-time description of the five growth
//!   stages (see [`crate::codex`] for the data itself).
//! - The **chat** records: messages exchanged with the Oracle backend.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Stage** | One step in the fixed five-step progression (Seed → Empire) |
//! | **Phase** | The descriptive record shown for a Stage |
//! | **Standard mode** | Grounded Q&A with full history and optional cited sources |
//! | **Strategic mode** | Single-shot deep analysis, no history, no sources |
//! | **Grounding source** | A URI/title pair returned alongside a standard answer |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// Stages
// ============================================

/// One of the five growth stages, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    #[default]
    Seed,
    Sapling,
    Tree,
    Forest,
    Empire,
}

impl Stage {
    /// All stages in display order.
    pub const ALL: [Stage; 5] = [
        Stage::Seed,
        Stage::Sapling,
        Stage::Tree,
        Stage::Forest,
        Stage::Empire,
    ];

    /// Position in [`Stage::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stage at a display position, if any.
    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Seed => "Seed",
            Stage::Sapling => "Sapling",
            Stage::Tree => "Tree",
            Stage::Forest => "Forest",
            Stage::Empire => "Empire",
        }
    }

    /// The following stage, staying on the last one.
    pub fn next(self) -> Stage {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// The preceding stage, staying on the first one.
    pub fn previous(self) -> Stage {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(self)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown stage: {}", s))
    }
}

// ============================================
// Phase records
// ============================================

/// Infrastructure summary for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechStack {
    pub compute: &'static str,
    pub database: &'static str,
    pub ai: &'static str,
    pub orchestration: &'static str,
    pub cost: &'static str,
}

/// A label/value badge shown next to a module title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
}

/// One "active module" of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRecord {
    pub title: &'static str,
    pub description: &'static str,
    /// Illustrative code excerpt, display-only
    pub code_snippet: Option<&'static str>,
    pub metrics: &'static [Metric],
}

/// Descriptive record for a single [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRecord {
    pub stage: Stage,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Duration label, e.g. "Weeks 1-3"
    pub duration: &'static str,
    /// Throughput label, e.g. "100 - 1,000"
    pub orders_per_day: &'static str,
    pub tech_stack: TechStack,
    pub modules: &'static [ModuleRecord],
    pub risks: &'static [&'static str],
}

// ============================================
// Chat
// ============================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Interaction mode of the Oracle chat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Grounded Q&A over the full transcript
    #[default]
    Standard,
    /// Deep-analysis simulation of a single scenario
    Strategic,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Standard => "standard",
            ChatMode::Strategic => "strategic",
        }
    }

    /// The other mode.
    pub fn toggle(self) -> ChatMode {
        match self {
            ChatMode::Standard => ChatMode::Strategic,
            ChatMode::Strategic => ChatMode::Standard,
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ChatMode::Standard),
            "strategic" => Ok(ChatMode::Strategic),
            _ => Err(format!("unknown chat mode: {}", s)),
        }
    }
}

/// Reference material cited by a standard-mode answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

impl GroundingSource {
    /// Title for display; untitled sources show as "Source".
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Source"
        } else {
            &self.title
        }
    }
}

/// A single transcript entry. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique within a session
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// `Some(true)` for strategic replies, `Some(false)` for standard replies,
    /// `None` for user messages, the welcome message, and failure notices
    pub strategic: Option<bool>,
    /// Grounding sources, exactly as returned by the backend
    pub sources: Option<Vec<GroundingSource>>,
}

impl ChatMessage {
    /// A user message stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            strategic: None,
            sources: None,
        }
    }

    /// An assistant message stamped now.
    pub fn assistant(
        content: impl Into<String>,
        strategic: Option<bool>,
        sources: Option<Vec<GroundingSource>>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            strategic,
            sources,
        }
    }

    pub fn is_strategic(&self) -> bool {
        self.strategic.unwrap_or(false)
    }

    /// Sources to display (empty when none were returned).
    pub fn sources(&self) -> &[GroundingSource] {
        self.sources.as_deref().unwrap_or_default()
    }
}
