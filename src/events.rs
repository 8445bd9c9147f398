use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::NewParty;
use crate::state::AppState;
use crate::ui::{UIMode, UI};

/// What the controller should do after a key event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Continue,
    Quit,
    /// Fetch the party with this id and select it
    SelectParty(i64),
    /// Create a party from a validated form draft
    SubmitParty(NewParty),
    /// Delete the selected party (confirmation already given)
    DeleteSelected,
    /// Re-fetch all collections
    Refresh,
}

/// Translates key events into actions, per UI mode. No I/O happens
/// here; the controller in `app` owns all service calls.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&mut self, key: KeyEvent, ui: &mut UI, state: &AppState) -> Action {
        // Ctrl+C quits from any mode
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match ui.mode() {
            UIMode::Browse => self.handle_browse_key(key, ui, state),
            UIMode::CreateForm => self.handle_form_key(key, ui),
            UIMode::ConfirmDelete => self.handle_confirm_key(key, ui),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent, ui: &mut UI, state: &AppState) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab => {
                ui.toggle_focus();
                Action::Continue
            }
            KeyCode::Char('j') | KeyCode::Down => {
                ui.party_list_mut().move_down(state);
                Action::Continue
            }
            KeyCode::Char('k') | KeyCode::Up => {
                ui.party_list_mut().move_up(state);
                Action::Continue
            }
            KeyCode::Enter => match ui.party_list().party_under_cursor(state) {
                Some(party) => Action::SelectParty(party.id),
                None => Action::Continue,
            },
            KeyCode::Char('n') => {
                ui.open_form();
                Action::Continue
            }
            KeyCode::Char('d') => {
                if state.selected_party().is_some() {
                    ui.open_delete_confirmation();
                }
                Action::Continue
            }
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::Continue,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, ui: &mut UI) -> Action {
        match key.code {
            KeyCode::Esc => {
                ui.close_form();
                Action::Continue
            }
            KeyCode::Tab | KeyCode::Down => {
                ui.party_form_mut().next_field();
                Action::Continue
            }
            KeyCode::BackTab | KeyCode::Up => {
                ui.party_form_mut().previous_field();
                Action::Continue
            }
            KeyCode::Enter => self.submit_form(ui),
            KeyCode::Backspace => {
                ui.party_form_mut().backspace();
                Action::Continue
            }
            KeyCode::Char(c) => {
                ui.party_form_mut().insert_char(c);
                Action::Continue
            }
            _ => Action::Continue,
        }
    }

    /// Validate and, if clean, hand the draft to the controller. The
    /// fields are reset at submission time, not when the refresh lands.
    /// An invalid form blocks with a banner and sends nothing.
    fn submit_form(&mut self, ui: &mut UI) -> Action {
        match ui.party_form().validate() {
            Ok(draft) => {
                ui.party_form_mut().reset();
                ui.close_form();
                Action::SubmitParty(draft)
            }
            Err(error) => {
                ui.party_form_mut().set_error(error);
                Action::Continue
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, ui: &mut UI) -> Action {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                ui.close_delete_confirmation();
                Action::DeleteSelected
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                ui.close_delete_confirmation();
                Action::Continue
            }
            _ => Action::Continue,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Party;
    use chrono::{TimeZone, Utc};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with_party() -> AppState {
        let mut state = AppState::new();
        state.replace_parties(vec![Party {
            id: 42,
            name: "Gala".to_string(),
            date: Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap(),
            description: "Annual".to_string(),
            location: "Hall A".to_string(),
        }]);
        state
    }

    fn type_into_form(handler: &mut EventHandler, ui: &mut UI, state: &AppState, text: &str) {
        for c in text.chars() {
            handler.handle_key(key(KeyCode::Char(c)), ui, state);
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut handler = EventHandler::new();
        let mut ui = UI::new();
        let state = AppState::new();

        assert_eq!(
            handler.handle_key(key(KeyCode::Char('q')), &mut ui, &state),
            Action::Quit
        );
        assert_eq!(
            handler.handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &mut ui,
                &state
            ),
            Action::Quit
        );
    }

    #[test]
    fn test_enter_selects_party_under_cursor() {
        let mut handler = EventHandler::new();
        let mut ui = UI::new();
        let state = state_with_party();

        // No cursor yet: nothing to select
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut ui, &state),
            Action::Continue
        );

        handler.handle_key(key(KeyCode::Char('j')), &mut ui, &state);
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut ui, &state),
            Action::SelectParty(42)
        );
    }

    #[test]
    fn test_delete_requires_a_selection() {
        let mut handler = EventHandler::new();
        let mut ui = UI::new();
        let state = AppState::new();

        handler.handle_key(key(KeyCode::Char('d')), &mut ui, &state);
        assert_eq!(ui.mode(), &UIMode::Browse);
    }

    #[test]
    fn test_delete_confirm_and_cancel() {
        let mut handler = EventHandler::new();
        let mut ui = UI::new();
        let mut state = state_with_party();
        let seq = state.begin_selection();
        state.apply_selection(seq, state.parties()[0].clone());

        handler.handle_key(key(KeyCode::Char('d')), &mut ui, &state);
        assert_eq!(ui.mode(), &UIMode::ConfirmDelete);

        // Cancel leaves everything alone and triggers no action
        assert_eq!(
            handler.handle_key(key(KeyCode::Esc), &mut ui, &state),
            Action::Continue
        );
        assert_eq!(ui.mode(), &UIMode::Browse);

        handler.handle_key(key(KeyCode::Char('d')), &mut ui, &state);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('y')), &mut ui, &state),
            Action::DeleteSelected
        );
        assert_eq!(ui.mode(), &UIMode::Browse);
    }

    #[test]
    fn test_invalid_form_submission_blocks_without_action() {
        let mut handler = EventHandler::new();
        let mut ui = UI::new();
        let state = AppState::new();

        handler.handle_key(key(KeyCode::Char('n')), &mut ui, &state);
        assert_eq!(ui.mode(), &UIMode::CreateForm);

        type_into_form(&mut handler, &mut ui, &state, "Gala");
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut ui, &state),
            Action::Continue
        );
        assert!(ui.party_form().error().is_some());
        assert_eq!(ui.mode(), &UIMode::CreateForm);
    }

    #[test]
    fn test_valid_form_submission_emits_draft_and_resets() {
        let mut handler = EventHandler::new();
        let mut ui = UI::new();
        let state = AppState::new();

        handler.handle_key(key(KeyCode::Char('n')), &mut ui, &state);
        type_into_form(&mut handler, &mut ui, &state, "Gala");
        handler.handle_key(key(KeyCode::Tab), &mut ui, &state);
        type_into_form(&mut handler, &mut ui, &state, "Annual");
        handler.handle_key(key(KeyCode::Tab), &mut ui, &state);
        type_into_form(&mut handler, &mut ui, &state, "2025-12-01");
        handler.handle_key(key(KeyCode::Tab), &mut ui, &state);
        type_into_form(&mut handler, &mut ui, &state, "Hall A");

        let action = handler.handle_key(key(KeyCode::Enter), &mut ui, &state);
        match action {
            Action::SubmitParty(draft) => {
                assert_eq!(draft.name, "Gala");
                assert_eq!(draft.date.to_rfc3339(), "2025-12-01T00:00:00+00:00");
            }
            other => panic!("expected SubmitParty, got {:?}", other),
        }

        // Fields reset at submission time, mode back to browse
        assert_eq!(ui.mode(), &UIMode::Browse);
        assert!(ui.party_form().validate().is_err());
    }
}
