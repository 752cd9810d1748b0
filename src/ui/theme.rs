use ratatui::style::Color;

use crate::calendar::EventKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub today: Color,
    pub weekday_header: Color,
    pub inactive_day: Color,
    pub deadline_day: Color,
    pub status_bar: Color,
    pub command_mode: Color,
    pub help_section: Color,
    pub project: Color,
    pub task: Color,
    pub meeting: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            selected_bg: Color::Blue,
            today: Color::Green,
            weekday_header: Color::Yellow,
            inactive_day: Color::DarkGray,
            deadline_day: Color::Magenta,
            status_bar: Color::White,
            command_mode: Color::White,
            help_section: Color::Yellow,
            project: Color::Rgb(63, 125, 215),
            task: Color::Rgb(255, 193, 7),
            meeting: Color::Rgb(40, 167, 69),
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            selected_bg: Color::Rgb(60, 56, 54),
            today: Color::Rgb(184, 187, 38),
            weekday_header: Color::Rgb(254, 128, 25),
            inactive_day: Color::Rgb(146, 131, 116),
            deadline_day: Color::Rgb(211, 134, 155),
            status_bar: Color::Rgb(235, 219, 178),
            command_mode: Color::Rgb(235, 219, 178),
            help_section: Color::Rgb(254, 128, 25),
            project: Color::Rgb(131, 165, 152),
            task: Color::Rgb(250, 189, 47),
            meeting: Color::Rgb(142, 192, 124),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            selected_bg: Color::Rgb(59, 66, 82),
            today: Color::Rgb(163, 190, 140),
            weekday_header: Color::Rgb(235, 203, 139),
            inactive_day: Color::Rgb(76, 86, 106),
            deadline_day: Color::Rgb(180, 142, 173),
            status_bar: Color::Rgb(216, 222, 233),
            command_mode: Color::Rgb(216, 222, 233),
            help_section: Color::Rgb(235, 203, 139),
            project: Color::Rgb(129, 161, 193),
            task: Color::Rgb(235, 203, 139),
            meeting: Color::Rgb(163, 190, 140),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }

    pub fn kind_color(&self, kind: EventKind) -> Color {
        match kind {
            EventKind::Project => self.project,
            EventKind::Task => self.task,
            EventKind::Meeting => self.meeting,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

/// Reads a `#rrggbb` display hint.
pub fn hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
