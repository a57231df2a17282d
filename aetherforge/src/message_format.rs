//! Transcript formatting helpers for the Oracle view.

use aetherforge_core::{ChatMessage, Role};
use chrono::{DateTime, Local, Utc};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Tint for strategic replies
const STRATEGIC_TEXT: Color = Color::Rgb(220, 200, 255);
/// Link color for grounding sources
const SOURCE_LINK: Color = Color::Rgb(80, 170, 255);

/// Indent applied to message bodies under their header line.
const BODY_INDENT: &str = "  ";

/// Role label and style for a transcript header.
pub fn role_label(msg: &ChatMessage) -> (&'static str, Style) {
    match msg.role {
        Role::User => ("[you]", Style::default().fg(Color::Green)),
        Role::Assistant if msg.is_strategic() => ("[strategist]", Style::default().fg(Color::Magenta)),
        Role::Assistant => ("[oracle]", Style::default().fg(Color::Cyan)),
    }
}

/// Body style: strategic replies are tinted, everything else is plain.
fn body_style(msg: &ChatMessage) -> Style {
    match msg.role {
        Role::User => Style::default().fg(Color::White),
        Role::Assistant if msg.is_strategic() => Style::default().fg(STRATEGIC_TEXT),
        Role::Assistant => Style::default().fg(Color::Gray),
    }
}

/// Local wall-clock time for a message header.
pub fn format_message_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// Render one message as display lines.
///
/// Layout: header (`[role] HH:MM`), indented body, optional sources block,
/// then a blank separator. Long lines are left for the paragraph to wrap.
pub fn message_lines(msg: &ChatMessage) -> Vec<Line<'static>> {
    let (label, label_style) = role_label(msg);
    let mut lines = vec![Line::from(vec![
        Span::styled(label, label_style.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            format_message_time(msg.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    let style = body_style(msg);
    let mut body = msg.content.lines().peekable();
    if body.peek().is_none() {
        lines.push(Line::from(Span::styled(BODY_INDENT, style)));
    }
    for text in body {
        lines.push(Line::from(Span::styled(
            format!("{}{}", BODY_INDENT, text),
            style,
        )));
    }

    let sources = msg.sources();
    if !sources.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{}Grounding Sources:", BODY_INDENT),
            Style::default().fg(Color::DarkGray),
        )));
        for source in sources {
            lines.push(Line::from(vec![
                Span::raw(format!("{}  ↗ ", BODY_INDENT)),
                Span::styled(
                    source.display_title().to_string(),
                    Style::default()
                        .fg(SOURCE_LINK)
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled(
                    format!(" {}", source.uri),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    lines.push(Line::default());
    lines
}

/// All transcript lines, oldest first.
pub fn transcript_lines(messages: &[ChatMessage]) -> Vec<Line<'static>> {
    messages.iter().flat_map(message_lines).collect()
}
