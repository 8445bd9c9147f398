use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use crate::api::{ApiResult, PartyApiClient, PartyService};
use crate::config::Config;
use crate::events::{Action, EventHandler};
use crate::models::Party;
use crate::state::AppState;
use crate::ui::UI;

/// Result of a background selection fetch, tagged with its sequence
/// number so stale responses can be discarded
#[derive(Debug)]
pub enum FetchEvent {
    SelectionLoaded { seq: u64, result: ApiResult<Party> },
}

/// The application: owns the state store, the view, and the service
/// client, and runs the event loop that keeps them in sync.
///
/// All state mutation happens here, after a successful service call;
/// the view only ever reads. Mutations are awaited inline; selection
/// fetches run as spawned tasks reporting back over a channel.
pub struct App {
    should_quit: bool,
    state: AppState,
    ui: UI,
    event_handler: EventHandler,
    service: Arc<dyn PartyService>,
    fetch_tx: mpsc::UnboundedSender<FetchEvent>,
    fetch_rx: mpsc::UnboundedReceiver<FetchEvent>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let client = PartyApiClient::new(
            &config.api.base_url,
            &config.api.cohort,
            config.api.timeout_secs,
        )?;
        Ok(Self::with_service(Arc::new(client)))
    }

    /// Build an app around any service implementation. Tests drive the
    /// controller through this with an in-memory mock.
    pub fn with_service(service: Arc<dyn PartyService>) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            state: AppState::new(),
            ui: UI::new(),
            event_handler: EventHandler::new(),
            service,
            fetch_tx,
            fetch_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ui(&self) -> &UI {
        &self.ui
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Initial load: the guests+RSVPs join completes before the
    /// parties fetch begins; the first frame after this reflects all
    /// three collections.
    pub async fn initial_load(&mut self) {
        match self.service.list_guests_and_rsvps().await {
            Ok((guests, rsvps)) => self.state.replace_guests_and_rsvps(guests, rsvps),
            Err(e) => {
                tracing::error!("Failed to fetch guests and RSVPs: {}", e);
                self.ui.status_bar_mut().error("Could not load guests and RSVPs");
            }
        }
        self.refresh_parties().await;
    }

    /// Re-fetch the party collection and replace it wholesale.
    /// On failure the prior collection stays in place.
    async fn refresh_parties(&mut self) {
        match self.service.list_parties().await {
            Ok(parties) => self.state.replace_parties(parties),
            Err(e) => {
                tracing::error!("Failed to fetch parties: {}", e);
                self.ui.status_bar_mut().error("Could not load parties");
            }
        }
    }

    async fn refresh_all(&mut self) {
        match self.service.list_guests_and_rsvps().await {
            Ok((guests, rsvps)) => self.state.replace_guests_and_rsvps(guests, rsvps),
            Err(e) => {
                tracing::error!("Failed to refresh guests and RSVPs: {}", e);
                self.ui.status_bar_mut().error("Could not refresh guests and RSVPs");
            }
        }
        self.refresh_parties().await;
    }

    /// Start a selection fetch. The request is tagged with a sequence
    /// number; if the user selects again before it resolves, the newer
    /// request supersedes this one and its response is discarded.
    /// Returns the sequence number of the issued request.
    pub fn select_party(&mut self, id: i64) -> u64 {
        let seq = self.state.begin_selection();
        let service = Arc::clone(&self.service);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = service.get_party(id).await;
            // The receiver only goes away on shutdown
            let _ = tx.send(FetchEvent::SelectionLoaded { seq, result });
        });
        seq
    }

    /// Apply a completed background fetch to the state store
    pub fn apply_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::SelectionLoaded { seq, result } => match result {
                Ok(party) => {
                    self.state.apply_selection(seq, party);
                }
                Err(e) => {
                    // Prior selection state stays in place
                    tracing::error!("Failed to fetch party: {}", e);
                    self.ui.status_bar_mut().error("Could not load party details");
                }
            },
        }
    }

    /// Drain any selection fetches that completed since the last tick
    pub fn process_fetch_events(&mut self) {
        while let Ok(event) = self.fetch_rx.try_recv() {
            self.apply_fetch_event(event);
        }
    }

    /// Create a party, then re-fetch the collection once. The service
    /// is the source of truth; there is no optimistic insert.
    pub async fn submit_party(&mut self, draft: crate::models::NewParty) {
        match self.service.create_party(&draft).await {
            Ok(party) => {
                tracing::info!(party_id = party.id, "created party");
                self.ui.status_bar_mut().info(format!("Created \"{}\"", party.name));
                self.refresh_parties().await;
            }
            Err(e) => {
                tracing::error!("Failed to create party: {}", e);
                self.ui.status_bar_mut().error("Could not create party");
            }
        }
    }

    /// Delete the selected party. On success the selection is cleared
    /// and the collections re-fetched; on failure everything stays as
    /// it was.
    pub async fn delete_selected(&mut self) {
        let Some(party) = self.state.selected_party() else {
            return;
        };
        let (id, name) = (party.id, party.name.clone());

        match self.service.delete_party(id).await {
            Ok(()) => {
                tracing::info!(party_id = id, "deleted party");
                self.state.clear_selection();
                self.ui.status_bar_mut().info(format!("Deleted \"{}\"", name));
                self.refresh_all().await;
            }
            Err(e) => {
                tracing::error!("Failed to delete party: {}", e);
                self.ui.status_bar_mut().error("Could not delete party");
            }
        }
    }

    /// Translate a key event into an action for the current UI mode
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Action {
        self.event_handler.handle_key(key, &mut self.ui, &self.state)
    }

    /// Execute an action produced by the event handler
    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::Continue => {}
            Action::Quit => self.should_quit = true,
            Action::SelectParty(id) => {
                self.select_party(id);
            }
            Action::SubmitParty(draft) => self.submit_party(draft).await,
            Action::DeleteSelected => self.delete_selected().await,
            Action::Refresh => self.refresh_all().await,
        }
    }

    /// Set up the terminal and run until quit
    pub async fn run(&mut self) -> Result<()> {
        if !io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "soiree requires a terminal (TTY) to run. Please run it in a terminal emulator."
            ));
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        self.initial_load().await;

        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            if self.should_quit {
                return Ok(());
            }

            // Apply completed selection fetches before drawing
            self.process_fetch_events();
            self.ui.tick(&self.state);

            terminal.draw(|f| self.ui.render(f, &self.state))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    let action = self.handle_key(key);
                    self.dispatch(action).await;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }
        }
    }
}
