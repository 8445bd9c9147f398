use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::Party;
use crate::state::AppState;
use crate::theme::Theme;

/// Selectable list of upcoming parties
pub struct PartyList {
    list_state: ListState,
}

impl PartyList {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    /// Index of the cursor row, if the list is non-empty
    pub fn cursor(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// The party under the cursor
    pub fn party_under_cursor<'a>(&self, state: &'a AppState) -> Option<&'a Party> {
        self.cursor().and_then(|i| state.parties().get(i))
    }

    pub fn move_down(&mut self, state: &AppState) {
        let len = state.parties().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn move_up(&mut self, state: &AppState) {
        if state.parties().is_empty() {
            self.list_state.select(None);
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(prev));
    }

    /// Keep the cursor valid after the party collection was replaced
    pub fn clamp_cursor(&mut self, state: &AppState) {
        let len = state.parties().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme, focused: bool) {
        let selected_id = state.selected_party().map(|p| p.id);

        let items: Vec<ListItem> = state
            .parties()
            .iter()
            .map(|party| {
                let marker = if selected_id == Some(party.id) { "● " } else { "  " };
                let item = ListItem::new(format!("{}{}", marker, party.name));
                if selected_id == Some(party.id) {
                    item.style(theme.selected)
                } else {
                    item
                }
            })
            .collect();

        let border_style = if focused { theme.border_focused } else { theme.border };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title("Upcoming Parties"),
            )
            .highlight_style(theme.cursor);

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for PartyList {
    fn default() -> Self {
        Self::new()
    }
}
