use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use studio_deadlines::{
    app::AppState,
    calendar::{text::DEFAULT_WORD_LIMIT, truncate_words, CalendarEvent, EventsForDate},
    ui::theme::hex_color,
};

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let title = format!("Deadlines on {}", app.selected_date.format("%B %d, %Y"));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if app.selection.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("None", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        let mut index = 0;
        match &app.selection {
            EventsForDate::Merged(events) => {
                for event in events {
                    lines.push(event_line(app, event, index));
                    index += 1;
                }
            }
            EventsForDate::ByKind(groups) => {
                for (kind, events) in groups {
                    lines.push(Line::from(vec![
                        Span::styled(kind.heading(), Style::default().fg(app.theme.kind_color(*kind)).add_modifier(Modifier::UNDERLINED)),
                    ]));
                    for event in events {
                        lines.push(event_line(app, event, index));
                        index += 1;
                    }
                    lines.push(Line::from(""));
                }
            }
        }
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}

fn event_line<'a>(app: &AppState, event: &'a CalendarEvent, index: usize) -> Line<'a> {
    let is_selected = index == app.selected_event_index;
    let color = hex_color(&event.color).unwrap_or_else(|| app.theme.kind_color(event.kind));

    let title_style = if is_selected {
        Style::default().bg(app.theme.selected_bg).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(if is_selected { ">" } else { " " }, Style::default().fg(app.theme.selected_bg)),
        Span::styled(format!("{} ", event.kind.marker()), Style::default().fg(color)),
        Span::styled(truncate_words(&event.title, DEFAULT_WORD_LIMIT), title_style),
    ];

    if let Some(stage) = event.stage {
        let stage_color = hex_color(stage.color()).unwrap_or(Color::Gray);
        spans.push(Span::styled(format!(" [{}]", stage.label()), Style::default().fg(stage_color)));
    }

    Line::from(spans)
}
