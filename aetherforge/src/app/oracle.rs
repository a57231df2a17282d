use super::*;

/// Lines moved by PageUp/PageDown in the transcript.
const PAGE_LINES: usize = 10;

impl App {
    // ========== Oracle Methods ==========

    /// Handle keyboard input in the Oracle chat.
    ///
    /// Printable keys edit the draft, so quitting here is Ctrl-C only.
    pub(super) fn handle_oracle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('t') => self.conversation.toggle_mode(),
                KeyCode::Char('u') => self.conversation.set_draft(String::new()),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.view = View::Guide;
            }
            KeyCode::Enter => {
                self.submit_draft();
            }
            KeyCode::Backspace => {
                self.conversation.pop_draft();
            }
            KeyCode::Char(c) => {
                self.conversation.push_draft(c);
            }
            KeyCode::Up => {
                self.chat_scroll_back = self
                    .chat_scroll_back
                    .saturating_add(1)
                    .min(self.chat_max_scroll_back);
            }
            KeyCode::Down => {
                self.chat_scroll_back = self.chat_scroll_back.saturating_sub(1);
            }
            KeyCode::PageUp => {
                self.chat_scroll_back = self
                    .chat_scroll_back
                    .saturating_add(PAGE_LINES)
                    .min(self.chat_max_scroll_back);
            }
            KeyCode::PageDown => {
                self.chat_scroll_back = self.chat_scroll_back.saturating_sub(PAGE_LINES);
            }
            KeyCode::End => {
                self.chat_scroll_back = 0;
            }
            _ => {}
        }
    }

    /// Send the draft if the conversation accepts it.
    fn submit_draft(&mut self) {
        // begin_submit refuses while pending, so at most one request is ever in flight
        let Some(request) = self.conversation.submit_draft() else {
            return;
        };
        self.chat_scroll_back = 0;
        self.in_flight = Some(self.dispatcher.spawn(request));
    }

    /// Apply the outcome of the outstanding request once it has settled.
    pub(super) fn poll_oracle(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };
        let Some(outcome) = in_flight.poll() else {
            return;
        };

        let elapsed_ms = in_flight.elapsed().as_millis() as u64;
        if let Some(reply) = self.conversation.settle(in_flight.request(), outcome) {
            tracing::info!(
                elapsed_ms,
                strategic = reply.is_strategic(),
                sources = reply.sources().len(),
                "Oracle reply appended"
            );
        }

        self.in_flight = None;
        self.chat_scroll_back = 0;
    }
}
