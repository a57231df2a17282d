//! UI rendering for the TUI.

use aetherforge_core::{ChatMode, ModuleRecord, PhaseRecord, Stage};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Wrap,
    },
    Frame,
};

use crate::app::{App, View};
use crate::message_format::transcript_lines;

mod guide;
mod oracle;

// ========== Palette ==========

/// Primary accent (active stage, standard mode)
const NEON_GREEN: Color = Color::Rgb(0, 255, 157);
/// Strategic mode accent
const NEON_PURPLE: Color = Color::Rgb(188, 19, 254);
/// Tech stack labels and metric badges
const NEON_BLUE: Color = Color::Rgb(0, 200, 255);
/// Risk panel
const RISK_RED: Color = Color::Rgb(248, 113, 113);
/// Code excerpt text
const CODE_GREEN: Color = Color::Rgb(74, 222, 128);
/// Borders and separators
const BORDER_DIM: Color = Color::Rgb(60, 70, 85);
/// Secondary text
const TEXT_DIM: Color = Color::Rgb(128, 128, 128);

/// Render the application UI.
///
/// Also records the scroll limits of the visible panel into `app`.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: tab header, body, footer
    let chunks = Layout::vertical([
        Constraint::Length(2), // Tab header
        Constraint::Min(5),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_tab_header(frame, app.view, chunks[0]);

    match app.view {
        View::Guide => {
            guide::render_guide_view(frame, app, chunks[1]);
            render_guide_footer(frame, chunks[2]);
        }
        View::Oracle => {
            oracle::render_oracle_view(frame, app, chunks[1]);
            render_oracle_footer(frame, app.conversation.mode(), chunks[2]);
        }
    }
}

/// Render the tab bar header with the Workflow Guide and Oracle AI tabs.
fn render_tab_header(frame: &mut Frame, active: View, area: Rect) {
    // Layout: app name on left, tabs on the right
    let chunks = Layout::horizontal([
        Constraint::Length(24), // App name
        Constraint::Min(1),     // Tabs
    ])
    .split(area);

    let app_name = Paragraph::new(Line::from(vec![
        Span::styled(" AetherForge", Style::default().fg(Color::White).bold()),
        Span::styled(" Codex", Style::default().fg(TEXT_DIM)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(app_name, chunks[0]);

    let inactive_style = Style::default().fg(Color::DarkGray);
    let guide_style = if active == View::Guide {
        Style::default()
            .fg(Color::White)
            .bold()
            .add_modifier(Modifier::UNDERLINED)
    } else {
        inactive_style
    };
    let oracle_style = if active == View::Oracle {
        Style::default()
            .fg(NEON_PURPLE)
            .bold()
            .add_modifier(Modifier::UNDERLINED)
    } else {
        inactive_style
    };

    let tabs = Line::from(vec![
        Span::styled(" Workflow Guide ", guide_style),
        Span::styled("  ", Style::default()),
        Span::styled(" Oracle AI ", oracle_style),
    ]);

    let tabs_para = Paragraph::new(tabs).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs_para, chunks[1]);
}

/// Key hint spans separated by a dim bar.
fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default().fg(NEON_GREEN).bold();
    let label_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}", label), label_style));
    }
    Line::from(spans)
}

fn render_guide_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(key_hints(&[
        ("[j/k]", "Stage"),
        ("[1-5]", "Jump"),
        ("[u/d]", "Scroll"),
        ("[Tab]", "Oracle"),
        ("[q]", "Quit"),
    ]));
    frame.render_widget(footer, area);
}

fn render_oracle_footer(frame: &mut Frame, mode: ChatMode, area: Rect) {
    let toggle_label = match mode {
        ChatMode::Standard => "Strategic mode",
        ChatMode::Strategic => "Standard mode",
    };
    let footer = Paragraph::new(key_hints(&[
        ("[Enter]", "Send"),
        ("[Ctrl-T]", toggle_label),
        ("[↑/↓]", "Scroll"),
        ("[End]", "Newest"),
        ("[Tab]", "Guide"),
        ("[Ctrl-C]", "Quit"),
    ]));
    frame.render_widget(footer, area);
}

/// Rounded panel block with a colored border and title.
fn panel(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(color).bold())
}

/// Rows `lines` occupy once wrapped to `width` columns.
fn wrapped_rows(lines: &[Line<'static>], width: u16) -> usize {
    Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width)
}

/// Vertical scrollbar along the right border of `area`.
fn render_scrollbar(frame: &mut Frame, content_len: usize, position: usize, area: Rect) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));

    let mut scrollbar_state = ScrollbarState::new(content_len).position(position);

    frame.render_stateful_widget(
        scrollbar,
        area.inner(ratatui::layout::Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}
