//! Integration tests for the Oracle conversation orchestrator
//!
//! These tests drive [`Conversation`] against stub backends that record every
//! call, covering both the awaited `submit` path and the dispatcher path used
//! by the terminal UI.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use aetherforge_core::oracle::{
    DeepAnalysis, DeepReply, Dispatcher, GroundedQuery, GroundedReply, InFlight, OracleBackend,
    OracleReply, OracleRequest, Turn,
};
use aetherforge_core::prompts::FAILURE_NOTICE;
use aetherforge_core::{ChatMode, Conversation, Error, GroundingSource, Result, Role};
use async_trait::async_trait;

/// Records every call and answers from a fixed script.
#[derive(Default)]
struct RecordingBackend {
    grounded_calls: Mutex<Vec<GroundedQuery>>,
    deep_calls: Mutex<Vec<DeepAnalysis>>,
    sources: Option<Vec<GroundingSource>>,
    fail: bool,
}

impl RecordingBackend {
    fn with_sources(sources: Option<Vec<GroundingSource>>) -> Self {
        Self {
            sources,
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn grounded_calls(&self) -> Vec<GroundedQuery> {
        self.grounded_calls.lock().unwrap().clone()
    }

    fn deep_calls(&self) -> Vec<DeepAnalysis> {
        self.deep_calls.lock().unwrap().clone()
    }

    fn total_calls(&self) -> usize {
        self.grounded_calls.lock().unwrap().len() + self.deep_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OracleBackend for RecordingBackend {
    async fn grounded_query(&self, query: &GroundedQuery) -> Result<GroundedReply> {
        self.grounded_calls.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(Error::Service("backend unavailable".to_string()));
        }
        Ok(GroundedReply {
            text: format!("answer to {}", query.message),
            sources: self.sources.clone(),
        })
    }

    async fn deep_analysis(&self, request: &DeepAnalysis) -> Result<DeepReply> {
        self.deep_calls.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(Error::Config("API key missing".to_string()));
        }
        Ok(DeepReply {
            text: format!("analysis of {}", request.scenario),
        })
    }
}

/// Holds every call until released, counting how many were started.
struct GatedBackend {
    started: AtomicUsize,
    gate: tokio::sync::Semaphore,
}

impl GatedBackend {
    fn new() -> Self {
        Self {
            started: AtomicUsize::new(0),
            gate: tokio::sync::Semaphore::new(0),
        }
    }

    fn release_one(&self) {
        self.gate.add_permits(1);
    }

    async fn wait_for_gate(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
        let permit = self.gate.acquire().await.expect("gate closed");
        permit.forget();
    }
}

#[async_trait]
impl OracleBackend for GatedBackend {
    async fn grounded_query(&self, query: &GroundedQuery) -> Result<GroundedReply> {
        self.wait_for_gate().await;
        Ok(GroundedReply {
            text: format!("grounded: {}", query.message),
            sources: None,
        })
    }

    async fn deep_analysis(&self, request: &DeepAnalysis) -> Result<DeepReply> {
        self.wait_for_gate().await;
        Ok(DeepReply {
            text: format!("deep: {}", request.scenario),
        })
    }
}

fn wait_for(in_flight: &mut InFlight) -> Result<OracleReply> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(outcome) = in_flight.poll() {
            return outcome;
        }
        assert!(Instant::now() < deadline, "request never settled");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn source(uri: &str, title: &str) -> GroundingSource {
    GroundingSource {
        uri: uri.to_string(),
        title: title.to_string(),
    }
}

// ============================================
// Transcript shape
// ============================================

#[tokio::test]
async fn test_seed_phase_question_example() {
    let backend = RecordingBackend::default();
    let mut conversation = Conversation::new();
    assert_eq!(conversation.messages().len(), 1);

    conversation
        .submit("What's the cost in Seed phase?", &backend)
        .await
        .expect("submission should be accepted");

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, "What's the cost in Seed phase?");
    assert_eq!(messages[2].role, Role::Assistant);
}

#[tokio::test]
async fn test_n_submissions_yield_seed_plus_pairs() {
    let backend = RecordingBackend::default();
    let mut conversation = Conversation::new();

    for i in 0..4 {
        if i == 2 {
            conversation.set_mode(ChatMode::Strategic);
        }
        conversation
            .submit(&format!("question {}", i), &backend)
            .await
            .expect("submission should be accepted");
    }

    let messages = conversation.messages();
    assert_eq!(messages.len(), 1 + 2 * 4);
    for (i, pair) in messages[1..].chunks(2).enumerate() {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[0].content, format!("question {}", i));
        assert_eq!(pair[1].role, Role::Assistant);
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_blank_submissions_never_reach_backend() {
    let backend = RecordingBackend::default();
    let mut conversation = Conversation::new();

    assert!(conversation.submit("", &backend).await.is_none());
    assert!(conversation.submit("   ", &backend).await.is_none());

    assert_eq!(conversation.messages().len(), 1);
    assert_eq!(backend.total_calls(), 0);
}

// ============================================
// Request shapes
// ============================================

#[tokio::test]
async fn test_standard_request_carries_full_history() {
    let backend = RecordingBackend::default();
    let mut conversation = Conversation::new();

    conversation.submit("first", &backend).await.unwrap();
    let before: Vec<Turn> = conversation.messages().iter().map(Turn::from).collect();
    conversation.submit("second", &backend).await.unwrap();

    let calls = backend.grounded_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].message, "second");
    assert_eq!(calls[1].history, before);
    assert_eq!(
        calls[1]
            .history
            .iter()
            .map(|t| t.role)
            .collect::<Vec<_>>(),
        vec![Role::Assistant, Role::User, Role::Assistant]
    );
}

#[tokio::test]
async fn test_strategic_request_carries_only_new_text() {
    let backend = RecordingBackend::default();
    let mut conversation = Conversation::new();

    conversation.submit("secret earlier context", &backend).await.unwrap();
    conversation.set_mode(ChatMode::Strategic);
    conversation.submit("What if AWS bans us?", &backend).await.unwrap();

    let calls = backend.deep_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].scenario, "What if AWS bans us?");
    assert!(!calls[0].scenario.contains("secret earlier context"));
    assert_eq!(backend.grounded_calls().len(), 1);
}

// ============================================
// Reply shapes
// ============================================

#[tokio::test]
async fn test_strategic_flag_follows_mode() {
    let backend = RecordingBackend::default();
    let mut conversation = Conversation::new();

    let standard = conversation.submit("q", &backend).await.unwrap().clone();
    assert_eq!(standard.strategic, Some(false));
    assert_eq!(standard.content, "answer to q");

    conversation.set_mode(ChatMode::Strategic);
    let strategic = conversation.submit("s", &backend).await.unwrap().clone();
    assert_eq!(strategic.strategic, Some(true));
    assert_eq!(strategic.content, "analysis of s");
    assert_eq!(strategic.sources, None);
}

#[tokio::test]
async fn test_sources_attached_verbatim() {
    let sources = vec![
        source("https://ollama.com", "Ollama"),
        source("https://hetzner.com", ""),
        source("https://ollama.com", "Ollama"),
    ];
    let backend = RecordingBackend::with_sources(Some(sources.clone()));
    let mut conversation = Conversation::new();

    let reply = conversation.submit("pricing?", &backend).await.unwrap();
    assert_eq!(reply.sources.as_ref(), Some(&sources));
}

#[tokio::test]
async fn test_absent_or_empty_sources_stay_absent_or_empty() {
    let backend = RecordingBackend::with_sources(None);
    let mut conversation = Conversation::new();
    let reply = conversation.submit("q", &backend).await.unwrap();
    assert_eq!(reply.sources, None);

    let backend = RecordingBackend::with_sources(Some(Vec::new()));
    let mut conversation = Conversation::new();
    let reply = conversation.submit("q", &backend).await.unwrap();
    assert!(reply.sources().is_empty());
}

#[tokio::test]
async fn test_failure_appends_single_notice() {
    let backend = RecordingBackend::failing();
    let mut conversation = Conversation::new();

    conversation.submit("q", &backend).await.unwrap();
    assert_eq!(conversation.messages().len(), 3);
    let notice = &conversation.messages()[2];
    assert_eq!(notice.role, Role::Assistant);
    assert_eq!(notice.content, FAILURE_NOTICE);
    assert_eq!(notice.strategic, None);
    assert!(!conversation.is_pending());

    // Next submission is accepted immediately, in either mode
    conversation.set_mode(ChatMode::Strategic);
    conversation.submit("again", &backend).await.unwrap();
    assert_eq!(conversation.messages().len(), 5);
    assert_eq!(conversation.messages()[4].content, FAILURE_NOTICE);
}

// ============================================
// Single flight (dispatcher path)
// ============================================

#[test]
fn test_submission_while_pending_is_a_no_op() {
    let backend = Arc::new(GatedBackend::new());
    let dispatcher = Dispatcher::new(backend.clone()).unwrap();
    let mut conversation = Conversation::new();

    let request = conversation.begin_submit("first").unwrap();
    let mut in_flight = dispatcher.spawn(request);

    // Rejected synchronously: no transcript entry, no second call
    assert!(conversation.begin_submit("second").is_none());
    assert!(conversation.begin_submit("third").is_none());
    assert_eq!(conversation.messages().len(), 2);

    backend.release_one();
    let outcome = wait_for(&mut in_flight);
    conversation.settle(in_flight.request(), outcome);

    assert_eq!(backend.started.load(Ordering::SeqCst), 1);
    assert_eq!(conversation.messages().len(), 3);
    assert_eq!(conversation.messages()[2].content, "grounded: first");
    assert!(!conversation.is_pending());
}

#[test]
fn test_mode_switch_mid_flight_only_affects_next_submission() {
    let backend = Arc::new(GatedBackend::new());
    let dispatcher = Dispatcher::new(backend.clone()).unwrap();
    let mut conversation = Conversation::new();

    let request = conversation.begin_submit("standard question").unwrap();
    let mut in_flight = dispatcher.spawn(request);

    conversation.set_mode(ChatMode::Strategic);
    assert_eq!(in_flight.request().mode(), ChatMode::Standard);

    backend.release_one();
    let outcome = wait_for(&mut in_flight);
    let reply = conversation
        .settle(in_flight.request(), outcome)
        .expect("request was pending");
    assert_eq!(reply.content, "grounded: standard question");
    assert_eq!(reply.strategic, Some(false));

    let next = conversation.begin_submit("scenario").unwrap();
    assert!(matches!(next, OracleRequest::DeepAnalysis(_)));
}
