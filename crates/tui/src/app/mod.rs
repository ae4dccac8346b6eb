use std::time::{Duration, Instant};

use api_types::Insight;
use crossterm::event::{self, Event, KeyEvent};
use engine::{Currency, Engine, EngineError, EntryKind, PersonRecord, Storage};
use insight::InsightClient;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    entry_form::EntryForm,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

pub type Ledger = Engine<Box<dyn Storage>>;

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    AddPerson,
    Entry,
    Categories,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePerson,
    ClearEntries,
}

impl ConfirmAction {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::DeletePerson => "Delete this person and all their history?",
            Self::ClearEntries => {
                "Clear all transactions for this person? The profile will remain."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub action: ConfirmAction,
    pub person_id: Uuid,
    pub person_name: String,
}

#[derive(Debug, Default)]
pub struct CategoryManagerState {
    pub input: String,
    pub selected: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InsightState {
    #[default]
    Idle,
    Loading,
    Ready(Insight),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub ledger: Ledger,
    pub currency: Currency,
    pub timezone: chrono_tz::Tz,
    pub mode: Mode,
    pub selected: usize,
    pub name_input: String,
    pub entry: EntryForm,
    pub categories: CategoryManagerState,
    pub confirm: Option<ConfirmState>,
    pub insight: InsightState,
    pub toast: Option<ToastState>,
}

impl AppState {
    pub fn selected_person(&self) -> Option<&PersonRecord> {
        self.ledger.people().get(self.selected)
    }
}

pub struct App {
    client: InsightClient,
    pub state: AppState,
    insight_tx: mpsc::UnboundedSender<Insight>,
    insight_rx: mpsc::UnboundedReceiver<Insight>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, ledger: Ledger) -> Result<Self> {
        let currency = config.currency()?;
        let timezone = config.timezone()?;
        let client = InsightClient::new(config.insight)?;
        if !client.has_api_key() {
            tracing::warn!("no insight API key configured, insights will use the offline message");
        }

        let mut entry = EntryForm::default();
        entry.presets_changed(ledger.categories());
        let (insight_tx, insight_rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            state: AppState {
                ledger,
                currency,
                timezone,
                mode: Mode::List,
                selected: 0,
                name_input: String::new(),
                entry,
                categories: CategoryManagerState::default(),
                confirm: None,
                insight: InsightState::Idle,
                toast: None,
            },
            insight_tx,
            insight_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.drain_insights();
            self.expire_toast(Instant::now());

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            // Let the insight task make progress between polls.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != crossterm::event::KeyEventKind::Press {
            return;
        }
        self.handle_action(ui::keymap::map_key(key));
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.mode {
            Mode::List => self.handle_list(action),
            Mode::AddPerson => self.handle_add_person(action),
            Mode::Entry => self.handle_entry(action),
            Mode::Categories => self.handle_categories(action),
            Mode::Confirm => self.handle_confirm(action),
        }
    }

    fn handle_list(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Input('k') => {
                self.state.selected = self.state.selected.saturating_sub(1);
            }
            AppAction::Down | AppAction::Input('j') => {
                let len = self.state.ledger.people().len();
                if len > 0 {
                    self.state.selected = (self.state.selected + 1).min(len - 1);
                }
            }
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('n') | AppAction::Input('a') => {
                self.state.name_input.clear();
                self.state.mode = Mode::AddPerson;
            }
            AppAction::Input('+') | AppAction::Input('=') => self.open_entry(EntryKind::Lend),
            AppAction::Input('-') | AppAction::Input('_') => self.open_entry(EntryKind::Borrow),
            AppAction::Input('d') => self.ask_confirm(ConfirmAction::DeletePerson),
            AppAction::Input('c') => self.ask_confirm(ConfirmAction::ClearEntries),
            AppAction::Input('o') => {
                self.state.categories.error = None;
                self.clamp_category_selection();
                self.state.mode = Mode::Categories;
            }
            AppAction::Input('i') => self.request_insight(),
            _ => {}
        }
    }

    fn handle_add_person(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.name_input.push(ch),
            AppAction::Backspace => {
                self.state.name_input.pop();
            }
            AppAction::Submit => {
                if self.state.name_input.trim().is_empty() {
                    return;
                }
                match self.state.ledger.add_person(&self.state.name_input) {
                    Ok(id) => {
                        tracing::info!(%id, "person added");
                        self.state.selected = self.state.ledger.people().len().saturating_sub(1);
                        self.state.name_input.clear();
                        self.state.mode = Mode::List;
                    }
                    Err(err) => self.toast_engine_error(err),
                }
            }
            AppAction::Cancel => {
                self.state.name_input.clear();
                self.state.mode = Mode::List;
            }
            _ => {}
        }
    }

    fn open_entry(&mut self, kind: EntryKind) {
        let Some(person) = self.state.ledger.people().get(self.state.selected) else {
            self.toast("Add a person first.", ToastLevel::Info);
            return;
        };
        self.state
            .entry
            .open(person, kind, self.state.ledger.categories());
        self.state.mode = Mode::Entry;
    }

    fn handle_entry(&mut self, action: AppAction) {
        let presets = self.state.ledger.categories();
        match action {
            AppAction::Input(ch) => self.state.entry.push_char(ch),
            AppAction::Backspace => self.state.entry.backspace(),
            AppAction::NextField => self.state.entry.toggle_custom(),
            AppAction::Up | AppAction::Down => self.state.entry.toggle_focus(),
            AppAction::Left => self.state.entry.cycle_preset(presets, false),
            AppAction::Right => self.state.entry.cycle_preset(presets, true),
            AppAction::Cancel => self.state.mode = Mode::List,
            AppAction::Submit => match self.state.entry.submit() {
                Ok(draft) => {
                    let saved = self.state.ledger.add_entry(
                        draft.person_id,
                        draft.kind,
                        draft.amount,
                        &draft.category,
                    );
                    match saved {
                        Ok(id) => {
                            tracing::info!(
                                %id,
                                kind = draft.kind.as_str(),
                                category = %draft.category,
                                "entry added"
                            );
                            self.state.entry.reset();
                            self.state.mode = Mode::List;
                        }
                        Err(err) => self.toast_engine_error(err),
                    }
                }
                Err(message) => self.state.entry.error = Some(message),
            },
            _ => {}
        }
    }

    fn handle_categories(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => {
                self.state.categories.input.push(ch);
                self.state.categories.error = None;
            }
            AppAction::Backspace => {
                self.state.categories.input.pop();
            }
            AppAction::Up => {
                self.state.categories.selected = self.state.categories.selected.saturating_sub(1);
            }
            AppAction::Down => {
                self.state.categories.selected += 1;
                self.clamp_category_selection();
            }
            AppAction::Submit => {
                if self.state.categories.input.trim().is_empty() {
                    return;
                }
                match self.state.ledger.add_category(&self.state.categories.input) {
                    Ok(()) => {
                        self.state.categories.input.clear();
                        self.state.categories.selected =
                            self.state.ledger.categories().len().saturating_sub(1);
                        self.presets_changed();
                    }
                    Err(EngineError::ExistingKey(label)) => {
                        self.state.categories.error =
                            Some(format!("\"{label}\" is already listed."));
                    }
                    Err(err) => self.toast_engine_error(err),
                }
            }
            AppAction::Delete => {
                let label = self
                    .state
                    .ledger
                    .categories()
                    .as_slice()
                    .get(self.state.categories.selected)
                    .cloned();
                if let Some(label) = label {
                    match self.state.ledger.remove_category(&label) {
                        Ok(()) => {
                            self.clamp_category_selection();
                            self.presets_changed();
                        }
                        Err(err) => self.toast_engine_error(err),
                    }
                }
            }
            AppAction::Cancel => self.state.mode = Mode::List,
            _ => {}
        }
    }

    fn presets_changed(&mut self) {
        self.state
            .entry
            .presets_changed(self.state.ledger.categories());
    }

    fn clamp_category_selection(&mut self) {
        let len = self.state.ledger.categories().len();
        self.state.categories.selected = self.state.categories.selected.min(len.saturating_sub(1));
    }

    fn ask_confirm(&mut self, action: ConfirmAction) {
        let Some(confirm) = self.state.selected_person().map(|person| ConfirmState {
            action,
            person_id: person.id,
            person_name: person.name.clone(),
        }) else {
            return;
        };
        self.state.confirm = Some(confirm);
        self.state.mode = Mode::Confirm;
    }

    fn handle_confirm(&mut self, action: AppAction) {
        if action == AppAction::None {
            return;
        }
        self.state.mode = Mode::List;
        let Some(confirm) = self.state.confirm.take() else {
            return;
        };
        if !matches!(action, AppAction::Input('y') | AppAction::Input('Y')) {
            return;
        }

        match confirm.action {
            ConfirmAction::DeletePerson => {
                match self.state.ledger.delete_person(confirm.person_id) {
                    Ok(()) => {
                        tracing::info!(id = %confirm.person_id, "person deleted");
                        let len = self.state.ledger.people().len();
                        self.state.selected = self.state.selected.min(len.saturating_sub(1));
                        self.toast(format!("Deleted {}.", confirm.person_name), ToastLevel::Info);
                    }
                    Err(err) => self.toast_engine_error(err),
                }
            }
            ConfirmAction::ClearEntries => {
                match self.state.ledger.clear_person_entries(confirm.person_id) {
                    Ok(()) => {
                        tracing::info!(id = %confirm.person_id, "entries cleared");
                        self.toast(
                            format!("All settled with {}!", confirm.person_name),
                            ToastLevel::Success,
                        );
                    }
                    Err(err) => self.toast_engine_error(err),
                }
            }
        }
    }

    /// Fires the insight request on its own task; the answer comes back on
    /// the channel drained by the event loop.
    fn request_insight(&mut self) {
        if self.state.insight == InsightState::Loading {
            return;
        }
        self.state.insight = InsightState::Loading;

        let client = self.client.clone();
        let people = self.state.ledger.people().to_vec();
        let currency = self.state.currency;
        let tx = self.insight_tx.clone();
        tokio::spawn(async move {
            let insight = client.insights(&people, currency).await;
            // The receiver only goes away when the app is closing.
            let _ = tx.send(insight);
        });
    }

    pub fn drain_insights(&mut self) {
        while let Ok(insight) = self.insight_rx.try_recv() {
            self.state.insight = InsightState::Ready(insight);
        }
    }

    fn toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn toast_engine_error(&mut self, err: EngineError) {
        tracing::error!("ledger operation failed: {err}");
        self.toast(err.to_string(), ToastLevel::Error);
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.state.toast = None;
        }
    }
}
