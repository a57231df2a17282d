//! Application state for the TUI.

use aetherforge_core::codex;
use aetherforge_core::oracle::{Dispatcher, InFlight};
use aetherforge_core::{ChatMode, Conversation, PhaseRecord, Stage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod guide;
mod oracle;

/// Top-level view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// Stage browser
    #[default]
    Guide,
    /// Oracle chat
    Oracle,
}

impl View {
    /// The other view (Tab cycles between the two).
    pub fn toggle(self) -> View {
        match self {
            View::Guide => View::Oracle,
            View::Oracle => View::Guide,
        }
    }
}

/// Main application state.
pub struct App {
    /// Visible top-level view
    pub view: View,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current tick count (incremented each render)
    pub tick_count: u32,

    // ========== Guide State ==========
    /// Stage shown in the guide
    pub selected_stage: Stage,
    /// Scroll offset of the phase panel
    pub guide_scroll: u16,
    /// Largest useful `guide_scroll`, recorded at render time
    pub guide_max_scroll: u16,

    // ========== Oracle State ==========
    /// Transcript, mode and pending flag
    pub conversation: Conversation,
    /// Lines scrolled back from the newest message (0 = follow newest)
    pub chat_scroll_back: usize,
    /// Largest useful `chat_scroll_back`, recorded at render time
    pub chat_max_scroll_back: usize,
    /// Runs backend calls off the UI thread
    dispatcher: Dispatcher,
    /// The outstanding request, if any
    in_flight: Option<InFlight>,
}

impl App {
    /// Create a new App that sends Oracle requests through `dispatcher`.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            view: View::default(),
            should_quit: false,
            tick_count: 0,
            selected_stage: Stage::default(),
            guide_scroll: 0,
            guide_max_scroll: 0,
            conversation: Conversation::new(),
            chat_scroll_back: 0,
            chat_max_scroll_back: 0,
            dispatcher,
            in_flight: None,
        }
    }

    /// Builder-style startup options from the command line.
    pub fn with_start(mut self, view: View, stage: Stage, mode: ChatMode) -> Self {
        self.view = view;
        self.selected_stage = stage;
        self.conversation.set_mode(mode);
        self
    }

    /// Phase record for the selected stage.
    pub fn current_phase(&self) -> &'static PhaseRecord {
        codex::phase(self.selected_stage)
    }

    /// Advance per-frame counters and collect any settled Oracle reply.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.poll_oracle();
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global bindings
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Tab {
            self.view = self.view.toggle();
            return;
        }

        match self.view {
            View::Guide => self.handle_guide_key(key),
            View::Oracle => self.handle_oracle_key(key),
        }
    }

    /// Seconds since the outstanding request was dispatched.
    pub fn pending_secs(&self) -> Option<u64> {
        self.in_flight
            .as_ref()
            .map(|in_flight| in_flight.elapsed().as_secs())
    }
}
