pub mod party_detail;
pub mod party_form;
pub mod party_list;
pub mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::AppState;
use crate::theme::Theme;

use self::{
    party_detail::PartyDetail, party_form::PartyForm, party_list::PartyList, status_bar::StatusBar,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    PartyList,
    PartyDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UIMode {
    Browse,
    CreateForm,
    ConfirmDelete,
}

/// The whole view surface. Every draw rebuilds the frame from the
/// current state; nothing here mutates the state store.
pub struct UI {
    mode: UIMode,
    focused_pane: FocusedPane,
    party_list: PartyList,
    party_detail: PartyDetail,
    party_form: PartyForm,
    status_bar: StatusBar,
    theme: Theme,
}

impl UI {
    pub fn new() -> Self {
        Self {
            mode: UIMode::Browse,
            focused_pane: FocusedPane::PartyList,
            party_list: PartyList::new(),
            party_detail: PartyDetail::new(),
            party_form: PartyForm::new(),
            status_bar: StatusBar::new(),
            theme: Theme::dark(),
        }
    }

    pub fn mode(&self) -> &UIMode {
        &self.mode
    }

    pub fn focused_pane(&self) -> FocusedPane {
        self.focused_pane
    }

    pub fn toggle_focus(&mut self) {
        self.focused_pane = match self.focused_pane {
            FocusedPane::PartyList => FocusedPane::PartyDetail,
            FocusedPane::PartyDetail => FocusedPane::PartyList,
        };
    }

    pub fn party_list(&self) -> &PartyList {
        &self.party_list
    }

    pub fn party_list_mut(&mut self) -> &mut PartyList {
        &mut self.party_list
    }

    pub fn party_form(&self) -> &PartyForm {
        &self.party_form
    }

    pub fn party_form_mut(&mut self) -> &mut PartyForm {
        &mut self.party_form
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn status_bar_mut(&mut self) -> &mut StatusBar {
        &mut self.status_bar
    }

    pub fn open_form(&mut self) {
        self.party_form.reset();
        self.mode = UIMode::CreateForm;
    }

    pub fn close_form(&mut self) {
        self.mode = UIMode::Browse;
    }

    pub fn open_delete_confirmation(&mut self) {
        self.mode = UIMode::ConfirmDelete;
    }

    pub fn close_delete_confirmation(&mut self) {
        self.mode = UIMode::Browse;
    }

    /// Per-tick housekeeping before a draw
    pub fn tick(&mut self, state: &AppState) {
        self.status_bar.clear_expired();
        self.party_list.clamp_cursor(state);
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let size = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(size);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[0]);

        self.party_list.render(
            frame,
            panes[0],
            state,
            &self.theme,
            self.focused_pane == FocusedPane::PartyList && self.mode == UIMode::Browse,
        );
        self.party_detail.render(
            frame,
            panes[1],
            state,
            &self.theme,
            self.focused_pane == FocusedPane::PartyDetail && self.mode == UIMode::Browse,
        );
        self.status_bar
            .render(frame, chunks[1], state, &self.mode, &self.theme);

        match self.mode {
            UIMode::CreateForm => {
                let area = centered_rect(60, 12, size);
                self.party_form.render(frame, area, &self.theme);
            }
            UIMode::ConfirmDelete => {
                self.render_delete_confirmation(frame, state, size);
            }
            UIMode::Browse => {}
        }
    }

    fn render_delete_confirmation(&self, frame: &mut Frame, state: &AppState, size: Rect) {
        let name = state
            .selected_party()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "this party".to_string());

        let area = centered_rect(50, 5, size);
        frame.render_widget(Clear, area);

        let prompt = Paragraph::new(vec![
            Line::from(format!("Delete \"{}\"?", name)),
            Line::from(""),
            Line::from("y: delete    n/Esc: keep it"),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.error)
                .title("Confirm Delete"),
        );
        frame.render_widget(prompt, area);
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-height popup rectangle centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    // Widened multiply: u16 math overflows on very wide terminals
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(area.height),
    }
}
