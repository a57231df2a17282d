use super::*;

/// Braille spinner frames shown while a reply is pending.
const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Render the Oracle chat: mode header, transcript, input line.
pub(super) fn render_oracle_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Mode header
        Constraint::Min(3),    // Transcript
        Constraint::Length(3), // Input
    ])
    .split(area);

    let mode = app.conversation.mode();
    render_mode_header(frame, mode, chunks[0]);
    render_transcript(frame, app, chunks[1]);
    render_input(frame, app, chunks[2]);
}

fn mode_color(mode: ChatMode) -> Color {
    match mode {
        ChatMode::Standard => NEON_GREEN,
        ChatMode::Strategic => NEON_PURPLE,
    }
}

fn render_mode_header(frame: &mut Frame, mode: ChatMode, area: Rect) {
    let (active, inactive) = (
        Style::default().fg(Color::Black).bg(mode_color(mode)).bold(),
        Style::default().fg(TEXT_DIM),
    );
    let (standard_style, strategic_style) = match mode {
        ChatMode::Standard => (active, inactive),
        ChatMode::Strategic => (inactive, active),
    };

    let description = match mode {
        ChatMode::Standard => "Grounded answers with web sources",
        ChatMode::Strategic => "Deep reasoning for complex scenarios",
    };

    let line = Line::from(vec![
        Span::styled(" Standard ", standard_style),
        Span::raw(" "),
        Span::styled(" Strategic ", strategic_style),
        Span::styled(format!("   {}", description), Style::default().fg(TEXT_DIM)),
    ]);

    let header = Paragraph::new(line).block(panel("AetherForge Oracle", mode_color(mode)));
    frame.render_widget(header, area);
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let lines = transcript_lines(app.conversation.messages());

    // Offsets count wrapped rows, not transcript lines
    let rows = wrapped_rows(&lines, area.width.saturating_sub(2));
    let visible = area.height.saturating_sub(2) as usize;
    let max_offset = rows.saturating_sub(visible);
    app.chat_max_scroll_back = max_offset;
    app.chat_scroll_back = app.chat_scroll_back.min(max_offset);
    let offset = max_offset - app.chat_scroll_back;

    let title = if app.chat_scroll_back > 0 {
        format!("Transcript (↑{})", app.chat_scroll_back)
    } else {
        "Transcript".to_string()
    };

    let paragraph = Paragraph::new(lines)
        .block(panel(&title, BORDER_DIM))
        .wrap(Wrap { trim: false })
        .scroll((offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);

    render_scrollbar(frame, rows, offset, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let mode = app.conversation.mode();
    let draft = app.conversation.draft();

    let line = if let Some(secs) = app.pending_secs() {
        let frame_idx = (app.tick_count as usize) % SPINNER_FRAMES.len();
        let waiting = match mode {
            ChatMode::Standard => "Consulting the Oracle",
            ChatMode::Strategic => "Running simulation",
        };
        Line::from(vec![
            Span::styled(SPINNER_FRAMES[frame_idx], Style::default().fg(mode_color(mode))),
            Span::styled(
                format!(" {}... {}s", waiting, secs),
                Style::default().fg(TEXT_DIM),
            ),
        ])
    } else if draft.is_empty() {
        Line::from(Span::styled(
            input_placeholder(mode),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled(draft.to_string(), Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(mode_color(mode))),
        ])
    };

    let input = Paragraph::new(line).block(panel("Message", mode_color(mode)));
    frame.render_widget(input, area);
}

/// Placeholder shown in the empty input line.
pub(super) fn input_placeholder(mode: ChatMode) -> &'static str {
    match mode {
        ChatMode::Standard => "Ask about the workflow...",
        ChatMode::Strategic => "Describe a complex scenario for simulation...",
    }
}
