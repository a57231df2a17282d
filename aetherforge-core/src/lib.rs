//! # aetherforge-core
//!
//! Core library for the AetherForge Codex: a workflow guide over five fixed
//! growth stages and the Oracle, a chat assistant backed by a hosted language
//! model.
//!
//! This library provides:
//! - Domain types for stages, phase records and chat messages
//! - The compiled-in workflow codex and system prompts
//! - The Oracle backend interface, its Gemini client and a background dispatcher
//! - The conversation orchestrator
//! - Configuration management and logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use aetherforge_core::oracle::{create_backend, Dispatcher};
//! use aetherforge_core::{Config, Conversation};
//!
//! let config = Config::load().expect("failed to load config");
//! let backend = create_backend(&config.oracle).expect("failed to create backend");
//! let dispatcher = Dispatcher::new(backend).expect("failed to start dispatcher");
//!
//! let mut conversation = Conversation::new();
//! if let Some(request) = conversation.begin_submit("What's the cost in Seed phase?") {
//!     let mut in_flight = dispatcher.spawn(request);
//!     // ...poll from the UI loop...
//!     if let Some(outcome) = in_flight.poll() {
//!         conversation.settle(in_flight.request(), outcome);
//!     }
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use conversation::Conversation;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod codex;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod prompts;
pub mod types;
