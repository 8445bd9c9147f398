use ratatui::style::{Color, Modifier, Style};

/// Styles shared by the UI panes
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub cursor: Style,
    pub selected: Style,
    pub label: Style,
    pub placeholder: Style,
    pub hint: Style,
    pub error: Style,
    pub info: Style,
}

impl Theme {
    /// Default dark theme
    pub fn dark() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            cursor: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            hint: Style::default().fg(Color::DarkGray),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            info: Style::default().fg(Color::Green),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
