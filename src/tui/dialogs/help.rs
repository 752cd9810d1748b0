use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use studio_deadlines::app::AppState;

const HELP_WIDTH: u16 = 58;
const HELP_HEIGHT: u16 = 20;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_area = Rect {
        x: area.width.saturating_sub(HELP_WIDTH) / 2,
        y: area.height.saturating_sub(HELP_HEIGHT) / 2,
        width: HELP_WIDTH.min(area.width),
        height: HELP_HEIGHT.min(area.height),
    };

    f.render_widget(Clear, help_area);

    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().fg(app.theme.help_section))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            format!("{} Help", app.title),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Move in deadline list (or week if empty)"),
        Line::from("  J/K      - Next/previous week"),
        Line::from("  t        - Jump to today"),
        Line::from("  g/G      - First/last day of month"),
        Line::from("  { / }    - Previous/next month"),
        Line::from(""),
        section("Deadlines:"),
        Line::from("  r        - Reload projects, tasks and meetings"),
        Line::from("  m        - Check the selected day for a meeting"),
        Line::from(""),
        section("Commands:"),
        Line::from("  :q       - Quit"),
        Line::from("  :refresh - Reload deadlines"),
        Line::from("  :goto    - Jump to date (:goto 2025-12-25)"),
        Line::from("  :meet    - Request meeting (:meet Album review)"),
        Line::from("  :theme   - Change theme (:theme nord)"),
        Line::from("  :help    - Show this help"),
    ];

    let visible_lines = help_area.height.saturating_sub(2) as usize;
    let total_lines = help_text.len();
    let scroll = app.help_scroll.min(total_lines.saturating_sub(visible_lines));

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Help (j/k to scroll, q to close) ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
