use super::*;

/// Lines moved by PageUp/PageDown in the phase panel.
const PAGE_LINES: u16 = 10;

impl App {
    // ========== Guide Methods ==========

    /// Handle keyboard input in the stage browser.
    pub(super) fn handle_guide_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_stage(self.selected_stage.next());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_stage(self.selected_stage.previous());
            }
            // Number keys 1-5 jump straight to a stage
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(stage) = Stage::from_index(idx) {
                    self.select_stage(stage);
                }
            }
            KeyCode::PageDown | KeyCode::Char('d') | KeyCode::Char(' ') => {
                self.guide_scroll = self
                    .guide_scroll
                    .saturating_add(PAGE_LINES)
                    .min(self.guide_max_scroll);
            }
            KeyCode::PageUp | KeyCode::Char('u') => {
                self.guide_scroll = self.guide_scroll.saturating_sub(PAGE_LINES);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.guide_scroll = 0;
            }
            _ => {}
        }
    }

    /// Show `stage`, starting at the top of its panel.
    pub fn select_stage(&mut self, stage: Stage) {
        if stage != self.selected_stage {
            self.selected_stage = stage;
            self.guide_scroll = 0;
        }
    }
}
