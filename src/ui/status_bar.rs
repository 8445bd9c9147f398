use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};

use crate::state::AppState;
use crate::theme::Theme;
use crate::ui::UIMode;

const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message shown in place of the key hints
#[derive(Debug, Clone)]
struct Notice {
    text: String,
    level: NoticeLevel,
    posted_at: Instant,
}

/// Single-line status bar: collection counts, key hints, and transient
/// notices for service failures and completed mutations
pub struct StatusBar {
    notice: Option<Notice>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self { notice: None }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            level: NoticeLevel::Info,
            posted_at: Instant::now(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            level: NoticeLevel::Error,
            posted_at: Instant::now(),
        });
    }

    /// Drop the notice once its display window has passed
    pub fn clear_expired(&mut self) {
        if let Some(notice) = &self.notice {
            if notice.posted_at.elapsed() >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    pub fn current_notice(&self) -> Option<(&str, NoticeLevel)> {
        self.notice.as_ref().map(|n| (n.text.as_str(), n.level))
    }

    fn hints(mode: &UIMode) -> &'static str {
        match mode {
            UIMode::Browse => "j/k navigate · Enter select · n new party · d delete · r refresh · q quit",
            UIMode::CreateForm => "type to edit · Tab next field · Enter submit · Esc cancel",
            UIMode::ConfirmDelete => "y confirm delete · n/Esc cancel",
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState, mode: &UIMode, theme: &Theme) {
        let counts = format!(
            " {} parties · {} guests · {} RSVPs ",
            state.parties().len(),
            state.guests().len(),
            state.rsvps().len()
        );

        let message = match &self.notice {
            Some(notice) => {
                let style = match notice.level {
                    NoticeLevel::Info => theme.info,
                    NoticeLevel::Error => theme.error,
                };
                Span::styled(notice.text.clone(), style)
            }
            None => Span::styled(Self::hints(mode), theme.hint),
        };

        let line = Line::from(vec![Span::styled(counts, theme.label), message]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
