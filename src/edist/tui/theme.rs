use ratatui::style::{Color, Modifier, Style};

/// Styles for the browser. Built once at startup and passed to every draw
/// call; nothing reads styles from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub count: Style,
    pub item_title: Style,
    pub item_description: Style,
    pub selected_title: Style,
    pub selected_description: Style,
    pub selection_marker: Style,
    pub filter_prompt: Style,
    pub filter_text: Style,
    pub status_notice: Style,
    pub status_error: Style,
    pub help: Style,
    pub empty: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let accent = Color::Indexed(170);
        let muted = Color::Indexed(243);
        Self {
            title: Style::new()
                .fg(Color::Indexed(230))
                .bg(Color::Indexed(62))
                .add_modifier(Modifier::BOLD),
            count: Style::new().fg(muted),
            item_title: Style::new(),
            item_description: Style::new().fg(muted),
            selected_title: Style::new().fg(accent).add_modifier(Modifier::BOLD),
            selected_description: Style::new().fg(Color::Indexed(139)),
            selection_marker: Style::new().fg(accent),
            filter_prompt: Style::new().fg(Color::Indexed(205)),
            filter_text: Style::new(),
            status_notice: Style::new().fg(Color::Indexed(42)),
            // Same magenta in light and dark terminals
            status_error: Style::new().fg(Color::Indexed(201)),
            help: Style::new().fg(Color::Indexed(241)),
            empty: Style::new().fg(muted).add_modifier(Modifier::ITALIC),
        }
    }
}
