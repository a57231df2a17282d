use super::*;

/// Render the Workflow Guide: stage timeline on the left, phase detail on the right.
pub(super) fn render_guide_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Length(30), // Timeline + status
        Constraint::Min(20),    // Phase detail
    ])
    .split(area);

    let sidebar = Layout::vertical([
        Constraint::Min(7),    // Timeline
        Constraint::Length(4), // System status
    ])
    .split(chunks[0]);

    render_timeline(frame, app.selected_stage, sidebar[0]);
    render_system_status(frame, sidebar[1]);
    render_phase_panel(frame, app, chunks[1]);
}

/// Evolution timeline listing every stage, selected one highlighted.
fn render_timeline(frame: &mut Frame, selected: Stage, area: Rect) {
    let mut lines = Vec::with_capacity(Stage::ALL.len() * 2);

    for stage in Stage::ALL {
        let phase = aetherforge_core::codex::phase(stage);
        let is_selected = stage == selected;

        let (marker, label_style) = if is_selected {
            ("▶ ", Style::default().fg(NEON_GREEN).bold())
        } else {
            ("  ", Style::default().fg(TEXT_DIM))
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(NEON_GREEN)),
            Span::styled(format!("{}. ", stage.index() + 1), Style::default().fg(TEXT_DIM)),
            Span::styled(stage.label(), label_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", phase.duration),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let timeline = Paragraph::new(lines).block(panel("Evolution Timeline", BORDER_DIM));
    frame.render_widget(timeline, area);
}

fn render_system_status(frame: &mut Frame, area: Rect) {
    let label = Style::default().fg(TEXT_DIM);
    let lines = vec![
        Line::from(vec![
            Span::styled("Autopoiesis    ", label),
            Span::styled("Active", Style::default().fg(NEON_GREEN).bold()),
        ]),
        Line::from(vec![
            Span::styled("Evolution Rate ", label),
            Span::styled("Exponential", Style::default().fg(NEON_PURPLE).bold()),
        ]),
    ];

    let status = Paragraph::new(lines).block(panel("System Status", BORDER_DIM));
    frame.render_widget(status, area);
}

/// Render the selected phase as one scrollable panel.
fn render_phase_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let phase = app.current_phase();
    let lines = phase_lines(phase);

    // Clamp against wrapped rows so the last row stays reachable
    let rows = wrapped_rows(&lines, area.width.saturating_sub(2));
    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = rows.saturating_sub(visible).min(u16::MAX as usize) as u16;
    app.guide_max_scroll = max_scroll;
    app.guide_scroll = app.guide_scroll.min(max_scroll);

    let title = format!("{} · {}", phase.stage.label(), phase.title);
    let paragraph = Paragraph::new(lines)
        .block(panel(&title, NEON_GREEN))
        .wrap(Wrap { trim: false })
        .scroll((app.guide_scroll, 0));
    frame.render_widget(paragraph, area);

    render_scrollbar(frame, rows, app.guide_scroll as usize, area);
}

/// Display lines for a phase: header, tech stack, modules, risks.
pub(super) fn phase_lines(phase: &PhaseRecord) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(phase.title, Style::default().fg(Color::White).bold()),
            Span::styled(
                format!("  {} Orders/Day", phase.orders_per_day),
                Style::default().fg(NEON_GREEN).bold(),
            ),
        ]),
        Line::from(Span::styled(phase.subtitle, Style::default().fg(TEXT_DIM))),
        Line::from(Span::styled(
            format!("Timeline: {}", phase.duration),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];

    // Tech stack
    lines.push(section_heading("Tech Stack", NEON_BLUE));
    let stack = &phase.tech_stack;
    for (label, value) in [
        ("Compute", stack.compute),
        ("Database", stack.database),
        ("Orchestration", stack.orchestration),
        ("AI Engine", stack.ai),
        ("Est. Cost", stack.cost),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", label), Style::default().fg(NEON_BLUE)),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::default());

    lines.push(section_heading("Active Modules", NEON_GREEN));
    for module in phase.modules {
        lines.extend(module_lines(module));
    }

    lines.push(section_heading("Critical Risks", RISK_RED));
    for risk in phase.risks {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(RISK_RED)),
            Span::styled(*risk, Style::default().fg(Color::Gray)),
        ]));
    }

    lines
}

fn module_lines(module: &ModuleRecord) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("  ◆ {}", module.title),
        Style::default().fg(Color::White).bold(),
    ))];

    if !module.metrics.is_empty() {
        let mut badges = vec![Span::raw("    ")];
        for metric in module.metrics {
            badges.push(Span::styled(
                format!("[{}: ", metric.label),
                Style::default().fg(TEXT_DIM),
            ));
            badges.push(Span::styled(metric.value, Style::default().fg(NEON_BLUE).bold()));
            badges.push(Span::styled("] ", Style::default().fg(TEXT_DIM)));
        }
        lines.push(Line::from(badges));
    }

    lines.push(Line::from(Span::styled(
        format!("    {}", module.description),
        Style::default().fg(Color::Gray),
    )));

    if let Some(snippet) = module.code_snippet {
        for code_line in snippet.lines() {
            lines.push(Line::from(vec![
                Span::styled("    │ ", Style::default().fg(BORDER_DIM)),
                Span::styled(code_line.to_string(), Style::default().fg(CODE_GREEN)),
            ]));
        }
    }

    lines.push(Line::default());
    lines
}

fn section_heading(title: &'static str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        title.to_uppercase(),
        Style::default().fg(color).bold(),
    ))
}
