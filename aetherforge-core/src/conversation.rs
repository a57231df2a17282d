//! Oracle chat orchestration.
//!
//! [`Conversation`] owns the transcript, the mode selector, the draft input and
//! the pending flag. Submission is split in two so the single-flight check runs
//! synchronously, before any asynchronous work exists:
//!
//! 1. [`Conversation::begin_submit`] validates, appends the user message, flips
//!    the flag to pending and returns the request to send.
//! 2. [`Conversation::settle`] appends exactly one assistant message for that
//!    request's outcome and flips the flag back to idle.
//!
//! [`Conversation::submit`] chains both around an awaited backend call.

use crate::error::Result;
use crate::oracle::{DeepAnalysis, GroundedQuery, OracleBackend, OracleReply, OracleRequest, Turn};
use crate::prompts::{EMPTY_STANDARD_REPLY, EMPTY_STRATEGIC_REPLY, FAILURE_NOTICE, WELCOME_MESSAGE};
use crate::types::{ChatMessage, ChatMode};

/// Id of the synthetic welcome message.
pub const WELCOME_MESSAGE_ID: &str = "init";

/// Conversation state for one chat session.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    mode: ChatMode,
    pending: bool,
    draft: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A fresh session seeded with the welcome message, in standard mode.
    pub fn new() -> Self {
        let mut welcome = ChatMessage::assistant(WELCOME_MESSAGE, None, None);
        welcome.id = WELCOME_MESSAGE_ID.to_string();

        Self {
            messages: vec![welcome],
            mode: ChatMode::default(),
            pending: false,
            draft: String::new(),
        }
    }

    /// Transcript in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    /// Switch mode. Allowed while pending; only the next submission is affected.
    pub fn set_mode(&mut self, mode: ChatMode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "Oracle mode changed");
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggle());
    }

    /// True between `begin_submit` and `settle`.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft. Ignored while pending (the input is disabled).
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if !self.pending {
            self.draft = text.into();
        }
    }

    /// Type one character into the draft. Ignored while pending.
    pub fn push_draft(&mut self, c: char) {
        if !self.pending {
            self.draft.push(c);
        }
    }

    /// Delete the last draft character. Ignored while pending.
    pub fn pop_draft(&mut self) {
        if !self.pending {
            self.draft.pop();
        }
    }

    /// Submit the current draft; see [`Conversation::begin_submit`].
    pub fn submit_draft(&mut self) -> Option<OracleRequest> {
        let text = self.draft.clone();
        self.begin_submit(&text)
    }

    /// Accept `text` for dispatch.
    ///
    /// Returns `None` without touching any state when a request is already
    /// pending or `text` is blank. Otherwise appends the user message (text kept
    /// verbatim), clears the draft, marks the session pending and returns the
    /// request for the current mode.
    pub fn begin_submit(&mut self, text: &str) -> Option<OracleRequest> {
        if self.pending || text.trim().is_empty() {
            return None;
        }

        // Standard mode sends everything that precedes the new message
        let request = match self.mode {
            ChatMode::Standard => OracleRequest::Grounded(GroundedQuery {
                message: text.to_string(),
                history: self.messages.iter().map(Turn::from).collect(),
            }),
            ChatMode::Strategic => OracleRequest::DeepAnalysis(DeepAnalysis {
                scenario: text.to_string(),
            }),
        };

        self.messages.push(ChatMessage::user(text));
        self.draft.clear();
        self.pending = true;

        Some(request)
    }

    /// Record the outcome of `request` and return the appended assistant message.
    ///
    /// The reply is shaped by the mode the request was built for, not the
    /// current mode. Errors become the fixed failure notice; details go to the
    /// log only. Returns `None` and leaves the transcript untouched when no
    /// request is pending.
    pub fn settle(
        &mut self,
        request: &OracleRequest,
        outcome: Result<OracleReply>,
    ) -> Option<&ChatMessage> {
        if !self.pending {
            tracing::warn!(mode = %request.mode(), "Ignoring outcome with no request pending");
            return None;
        }

        let message = match outcome {
            Ok(reply) => match request.mode() {
                ChatMode::Standard => ChatMessage::assistant(
                    non_empty_or(reply.text, EMPTY_STANDARD_REPLY),
                    Some(false),
                    reply.sources,
                ),
                ChatMode::Strategic => ChatMessage::assistant(
                    non_empty_or(reply.text, EMPTY_STRATEGIC_REPLY),
                    Some(true),
                    None,
                ),
            },
            Err(e) => {
                tracing::error!(mode = %request.mode(), error = %e, "Oracle request failed");
                ChatMessage::assistant(FAILURE_NOTICE, None, None)
            }
        };

        self.messages.push(message);
        self.pending = false;

        self.messages.last()
    }

    /// Submit `text` and wait for the backend.
    ///
    /// Returns the assistant message, or `None` if the submission was rejected.
    pub async fn submit(
        &mut self,
        text: &str,
        backend: &dyn OracleBackend,
    ) -> Option<&ChatMessage> {
        let request = self.begin_submit(text)?;
        let outcome = request.send(backend).await;
        self.settle(&request, outcome)
    }

}

fn non_empty_or(text: String, placeholder: &str) -> String {
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{GroundingSource, Role};

    #[test]
    fn new_conversation_is_seeded() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);

        let welcome = &conversation.messages()[0];
        assert_eq!(welcome.id, WELCOME_MESSAGE_ID);
        assert_eq!(welcome.role, Role::Assistant);
        assert_eq!(welcome.content, WELCOME_MESSAGE);
        assert_eq!(conversation.mode(), ChatMode::Standard);
        assert!(!conversation.is_pending());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin_submit("").is_none());
        assert!(conversation.begin_submit("   \n\t").is_none());
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_pending());
    }

    #[test]
    fn begin_submit_keeps_text_verbatim_and_clears_draft() {
        let mut conversation = Conversation::new();
        conversation.set_draft("  padded question ");

        let request = conversation.submit_draft().expect("draft should be accepted");

        assert_eq!(request.text(), "  padded question ");
        assert_eq!(conversation.messages()[1].content, "  padded question ");
        assert_eq!(conversation.draft(), "");
        assert!(conversation.is_pending());
    }

    #[test]
    fn draft_is_frozen_while_pending() {
        let mut conversation = Conversation::new();
        conversation.begin_submit("first").unwrap();

        conversation.push_draft('x');
        conversation.set_draft("typed while waiting");
        assert_eq!(conversation.draft(), "");
    }

    #[test]
    fn standard_history_excludes_new_message() {
        let mut conversation = Conversation::new();
        let request = conversation.begin_submit("hello").unwrap();

        match request {
            OracleRequest::Grounded(query) => {
                assert_eq!(query.message, "hello");
                assert_eq!(query.history.len(), 1);
                assert_eq!(query.history[0].role, Role::Assistant);
                assert_eq!(query.history[0].text, WELCOME_MESSAGE);
            }
            other => panic!("expected grounded request, got {:?}", other),
        }
    }

    #[test]
    fn empty_reply_uses_mode_placeholder() {
        let mut conversation = Conversation::new();
        let request = conversation.begin_submit("q").unwrap();
        let msg = conversation.settle(&request, Ok(OracleReply::default())).unwrap();
        assert_eq!(msg.content, EMPTY_STANDARD_REPLY);

        conversation.set_mode(ChatMode::Strategic);
        let request = conversation.begin_submit("scenario").unwrap();
        let msg = conversation.settle(&request, Ok(OracleReply::default())).unwrap();
        assert_eq!(msg.content, EMPTY_STRATEGIC_REPLY);
    }

    #[test]
    fn strategic_reply_drops_sources() {
        let mut conversation = Conversation::new();
        conversation.set_mode(ChatMode::Strategic);
        let request = conversation.begin_submit("scenario").unwrap();

        let reply = OracleReply {
            text: "analysis".to_string(),
            sources: Some(vec![GroundingSource {
                uri: "https://example.com".to_string(),
                title: "stray".to_string(),
            }]),
        };
        let msg = conversation.settle(&request, Ok(reply)).unwrap();

        assert_eq!(msg.strategic, Some(true));
        assert_eq!(msg.sources, None);
    }

    #[test]
    fn failure_appends_notice_and_returns_to_idle() {
        let mut conversation = Conversation::new();
        let request = conversation.begin_submit("q").unwrap();

        let msg = conversation
            .settle(&request, Err(Error::Config("API key missing".to_string())))
            .unwrap();
        assert_eq!(msg.content, FAILURE_NOTICE);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.strategic, None);
        assert_eq!(msg.sources, None);

        assert!(!conversation.is_pending());
        assert!(conversation.begin_submit("retry").is_some());
    }

    #[test]
    fn toggle_mode_leaves_transcript_alone() {
        let mut conversation = Conversation::new();
        conversation.toggle_mode();
        assert_eq!(conversation.mode(), ChatMode::Strategic);
        conversation.toggle_mode();
        assert_eq!(conversation.mode(), ChatMode::Standard);
        assert_eq!(conversation.messages().len(), 1);
    }

    #[test]
    fn settle_without_pending_request_is_ignored() {
        let mut conversation = Conversation::new();
        let request = conversation.begin_submit("q").unwrap();
        conversation.settle(&request, Ok(OracleReply::default())).unwrap();
        assert_eq!(conversation.messages().len(), 3);

        // A second outcome for the same request must not grow the transcript
        let stale = conversation.settle(&request, Ok(OracleReply::default()));
        assert!(stale.is_none());
        assert_eq!(conversation.messages().len(), 3);
        assert!(!conversation.is_pending());
    }
}
