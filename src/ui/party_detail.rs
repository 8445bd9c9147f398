use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::Party;
use crate::state::AppState;
use crate::theme::Theme;

/// Read-only detail pane for the selected party
pub struct PartyDetail;

impl PartyDetail {
    pub fn new() -> Self {
        Self
    }

    /// Long-form date shown in the detail view, e.g.
    /// `Monday, December 1, 2025`
    pub fn format_date(party: &Party) -> String {
        party.date.format("%A, %B %-d, %Y").to_string()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme, focused: bool) {
        let border_style = if focused { theme.border_focused } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Party Details");

        let Some(party) = state.selected_party() else {
            let placeholder = Paragraph::new("Please select a party to learn details.")
                .style(theme.placeholder)
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} (ID: {})", party.name, party.id),
                theme.title,
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Date: ", theme.label),
                Span::raw(Self::format_date(party)),
            ]),
            Line::from(vec![
                Span::styled("Location: ", theme.label),
                Span::raw(party.location.clone()),
            ]),
            Line::from(""),
            Line::from(party.description.clone()),
            Line::from(""),
            Line::from(Span::styled("Guests RSVP'd:", theme.label)),
        ];

        let guest_refs = state.guest_refs_for(party.id);
        if guest_refs.is_empty() {
            lines.push(Line::from(Span::styled(
                "No guests have RSVP'd yet.",
                theme.placeholder,
            )));
        } else {
            for guest_ref in &guest_refs {
                lines.push(Line::from(format!("  • {}", guest_ref.display_name())));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("d: delete this party", theme.hint)));

        let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
        frame.render_widget(detail, area);
    }
}

impl Default for PartyDetail {
    fn default() -> Self {
        Self::new()
    }
}
