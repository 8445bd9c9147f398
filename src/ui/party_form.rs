use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use thiserror::Error;

use crate::models::NewParty;
use crate::theme::Theme;

/// Form validation failures, surfaced to the user as a blocking banner.
/// Nothing is sent to the service while one of these is outstanding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Date must be in YYYY-MM-DD form")]
    InvalidDate,
}

/// Fields of the add-party form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Date,
    Location,
}

impl FormField {
    const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Description,
        FormField::Date,
        FormField::Location,
    ];

    fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Description => "Description",
            FormField::Date => "Date (YYYY-MM-DD)",
            FormField::Location => "Location",
        }
    }
}

/// Add-party form: four required text fields with focus cycling
pub struct PartyForm {
    name_input: String,
    description_input: String,
    date_input: String,
    location_input: String,
    current_field: FormField,
    error: Option<FormError>,
}

impl PartyForm {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            description_input: String::new(),
            date_input: String::new(),
            location_input: String::new(),
            current_field: FormField::Name,
            error: None,
        }
    }

    pub fn current_field(&self) -> FormField {
        self.current_field
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name_input,
            FormField::Description => &self.description_input,
            FormField::Date => &self.date_input,
            FormField::Location => &self.location_input,
        }
    }

    fn current_input_mut(&mut self) -> &mut String {
        match self.current_field {
            FormField::Name => &mut self.name_input,
            FormField::Description => &mut self.description_input,
            FormField::Date => &mut self.date_input,
            FormField::Location => &mut self.location_input,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        // Typing clears a previous validation banner
        self.error = None;
        self.current_input_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.error = None;
        self.current_input_mut().pop();
    }

    pub fn next_field(&mut self) {
        let index = FormField::ALL
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = FormField::ALL[(index + 1) % FormField::ALL.len()];
    }

    pub fn previous_field(&mut self) {
        let index = FormField::ALL
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = FormField::ALL[(index + FormField::ALL.len() - 1) % FormField::ALL.len()];
    }

    /// Normalize a `YYYY-MM-DD` field value to a UTC midnight timestamp
    pub fn normalize_date(input: &str) -> Result<DateTime<Utc>, FormError> {
        let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;
        let midnight = date.and_hms_opt(0, 0, 0).ok_or(FormError::InvalidDate)?;
        Ok(Utc.from_utc_datetime(&midnight))
    }

    /// Validate all four fields and build the create payload.
    /// All fields must be non-empty and the date parseable.
    pub fn validate(&self) -> Result<NewParty, FormError> {
        if self.name_input.trim().is_empty() {
            return Err(FormError::MissingField("Name"));
        }
        if self.description_input.trim().is_empty() {
            return Err(FormError::MissingField("Description"));
        }
        if self.date_input.trim().is_empty() {
            return Err(FormError::MissingField("Date"));
        }
        if self.location_input.trim().is_empty() {
            return Err(FormError::MissingField("Location"));
        }

        Ok(NewParty {
            name: self.name_input.trim().to_string(),
            description: self.description_input.trim().to_string(),
            date: Self::normalize_date(&self.date_input)?,
            location: self.location_input.trim().to_string(),
        })
    }

    pub fn set_error(&mut self, error: FormError) {
        self.error = Some(error);
    }

    /// Clear all fields and return focus to the first one
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_focused)
            .title("Add a Party");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Name
                Constraint::Length(1), // Description
                Constraint::Length(1), // Date
                Constraint::Length(1), // Location
                Constraint::Length(1), // spacer
                Constraint::Length(1), // error banner
                Constraint::Min(1),    // hints
            ])
            .split(inner);

        for (i, field) in FormField::ALL.iter().enumerate() {
            let focused = *field == self.current_field;
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused { theme.cursor } else { ratatui::style::Style::default() };
            let line = Line::from(vec![
                Span::styled(format!("{}{:<20}", marker, field.label()), theme.label),
                Span::styled(self.field_value(*field).to_string(), value_style),
            ]);
            frame.render_widget(Paragraph::new(line), chunks[i]);
        }

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(format!("✗ {}", error)).style(theme.error),
                chunks[5],
            );
        }

        frame.render_widget(
            Paragraph::new("Tab/↓ next field · Shift+Tab/↑ previous · Enter submit · Esc cancel")
                .style(theme.hint),
            chunks[6],
        );
    }
}

impl Default for PartyForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> PartyForm {
        let mut form = PartyForm::new();
        form.name_input = "Gala".to_string();
        form.description_input = "Annual".to_string();
        form.date_input = "2025-12-01".to_string();
        form.location_input = "Hall A".to_string();
        form
    }

    #[test]
    fn test_validate_builds_payload_with_normalized_date() {
        let party = filled_form().validate().expect("form should validate");
        assert_eq!(party.name, "Gala");
        assert_eq!(party.date.to_rfc3339(), "2025-12-01T00:00:00+00:00");
    }

    #[test]
    fn test_every_field_is_required() {
        for field in FormField::ALL {
            let mut form = filled_form();
            match field {
                FormField::Name => form.name_input.clear(),
                FormField::Description => form.description_input.clear(),
                FormField::Date => form.date_input.clear(),
                FormField::Location => form.location_input.clear(),
            }
            assert!(form.validate().is_err(), "{:?} should be required", field);
        }
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut form = filled_form();
        form.location_input = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingField("Location")));
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        let mut form = filled_form();
        form.date_input = "next friday".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidDate));
    }

    #[test]
    fn test_field_cycling() {
        let mut form = PartyForm::new();
        assert_eq!(form.current_field(), FormField::Name);
        form.next_field();
        assert_eq!(form.current_field(), FormField::Description);
        form.previous_field();
        assert_eq!(form.current_field(), FormField::Name);
        form.previous_field();
        assert_eq!(form.current_field(), FormField::Location);
    }

    #[test]
    fn test_reset_clears_fields_and_error() {
        let mut form = filled_form();
        form.set_error(FormError::InvalidDate);
        form.reset();
        assert!(form.validate().is_err());
        assert!(form.error().is_none());
        assert_eq!(form.current_field(), FormField::Name);
    }

    #[test]
    fn test_typing_clears_the_error_banner() {
        let mut form = PartyForm::new();
        form.set_error(FormError::MissingField("Name"));
        form.insert_char('G');
        assert!(form.error().is_none());
    }
}
