use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::{Datelike, Local, NaiveDate};
use studio_deadlines::{app::AppState, ui::month_view};

const WEEKDAYS: [&str; 7] = [" Mon ", " Tue ", " Wed ", " Thu ", " Fri ", " Sat ", " Sun "];

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let today = Local::now().date_naive();
    let layout = month_view::calculate_layout(&app.calendar, app.selected_date, today);

    let month_name = NaiveDate::from_ymd_opt(layout.year, layout.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", layout.year, layout.month));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(month_name, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(
            WEEKDAYS.iter()
                .map(|day| Span::styled(*day, Style::default().fg(app.theme.weekday_header)))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &layout.weeks {
        let day_spans: Vec<Span> = week.days.iter()
            .map(|cell| {
                let marker = if cell.has_deadlines() { "•" } else { " " };
                let text = format!(" {:>2}{} ", cell.date.day(), marker);

                let mut style = Style::default();
                if !cell.is_current_month {
                    style = style.fg(app.theme.inactive_day);
                } else if cell.is_selected {
                    style = style.bg(app.theme.selected_bg).fg(Color::White).add_modifier(Modifier::BOLD);
                } else if cell.is_today {
                    style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
                } else if cell.has_deadlines() {
                    style = style.fg(app.theme.deadline_day);
                }

                Span::styled(text, style)
            })
            .collect();

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" = Navigate | "),
        Span::styled("r", Style::default().fg(Color::Green)),
        Span::raw(" = Reload | "),
        Span::styled("m", Style::default().fg(Color::Magenta)),
        Span::raw(" = Request meeting"),
    ]));

    if let Some(message) = &app.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::raw(message.as_str())));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
