use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::api::StatusService;
use crate::commands::{Command, CommandRegistry, Scope};
use crate::components::{ContainerTable, Header, HelpModal, LogModal, NoticeModal, StatusBar};
use crate::config::{DashboardConfig, LogMode};
use crate::effects::EffectManager;
use crate::error::ApiError;
use crate::event::AppEvent;
use crate::models::{ActionResponse, ContainerAction, ContainerRecord};
use crate::state::{ContainerSet, LogViewer, Notice};

/// The dashboard client: owns the container set, the single log view and
/// every background task it starts.
pub struct Dashboard {
    config: DashboardConfig,
    service: Arc<dyn StatusService>,

    // Background tasks report here
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    ticker: Option<JoinHandle<()>>,
    poll_seq: u64,

    // View state
    pub containers: ContainerSet,
    pub table: ContainerTable,
    pub logs: LogViewer,
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub should_quit: bool,

    pub commands: CommandRegistry,

    // Visual effects
    pub effects: EffectManager,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, service: Arc<dyn StatusService>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let commands = CommandRegistry::new(config.actions_enabled());
        Self {
            config,
            service,
            events_tx,
            events_rx,
            ticker: None,
            poll_seq: 0,
            containers: ContainerSet::new(),
            table: ContainerTable::new(),
            logs: LogViewer::new(),
            notice: None,
            show_help: false,
            should_quit: false,
            commands,
            effects: EffectManager::new(),
        }
    }

    /// Poll once now, then on every interval until `dispose`
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        info!(
            url = %self.config.base_url,
            api = ?self.config.api_version,
            log_mode = ?self.config.log_mode,
            "dashboard starting"
        );
        self.poll_now();

        let tx = self.events_tx.clone();
        let period = self.config.poll_interval();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; start() already polled
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(AppEvent::PollTick).is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop polling and tear down the log view
    pub fn dispose(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            info!("dashboard stopped");
        }
        self.logs.close();
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Fire one list request. Overlapping polls are allowed; whichever
    /// resolves last is what ends up on screen.
    pub fn poll_now(&mut self) {
        self.poll_seq += 1;
        let seq = self.poll_seq;
        self.containers.poll_started();

        let service = self.service.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = service.list_containers().await;
            let _ = tx.send(AppEvent::ContainersLoaded { seq, result });
        });
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.try_recv().ok()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PollTick | AppEvent::RefreshRequested => self.poll_now(),

            AppEvent::ContainersLoaded { seq, result } => {
                self.containers.poll_finished();
                match &result {
                    Ok(records) => debug!(seq, count = records.len(), "containers loaded"),
                    Err(err) => warn!(seq, error = %err, "container poll failed"),
                }
                self.apply_poll(result);
            }

            AppEvent::ActionFinished { id, action, result } => {
                self.finish_action(&id, action, result);
            }

            AppEvent::LogStream { session, event } => {
                self.logs.handle_stream_event(session, event);
            }

            AppEvent::SnapshotLoaded { session, result } => {
                if let Err(err) = &result {
                    warn!(session, error = %err, "log snapshot failed");
                }
                self.logs.apply_snapshot(session, result);
            }
        }
    }

    /// Full replace of the table, keeping the selection on the same
    /// container when it survived
    fn apply_poll(&mut self, result: Result<Vec<ContainerRecord>, ApiError>) {
        let selected_id = self.selected_record().map(|r| r.id.clone());
        self.containers.apply(result);
        let position = selected_id.and_then(|id| self.containers.position(&id));
        self.table.reselect(position, self.containers.records().len());
    }

    pub fn selected_record(&self) -> Option<&ContainerRecord> {
        self.table
            .selected()
            .and_then(|i| self.containers.record(i))
    }

    /// Which layer gets keys
    pub fn scope(&self) -> Scope {
        if self.notice.is_some() {
            Scope::Notice
        } else if self.show_help {
            Scope::Help
        } else if self.logs.is_open() {
            Scope::Logs
        } else {
            Scope::List
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = self.commands.resolve(self.scope(), key) {
            let action = self.resolve_command(command);
            self.handle_action(action);
        }
    }

    /// Turn a command into an action, reading the selected row now
    pub fn resolve_command(&self, command: Command) -> Action {
        let control = |action: ContainerAction| {
            self.selected_record()
                .map(|r| Action::Control(r.id.clone(), action))
                .unwrap_or(Action::None)
        };
        match command {
            Command::Up => Action::Up,
            Command::Down => Action::Down,
            Command::Top => Action::Top,
            Command::Bottom => Action::Bottom,
            Command::ViewLogs => self
                .selected_record()
                .map(|r| Action::ViewLogs {
                    id: r.id.clone(),
                    name: r.display_name().to_string(),
                })
                .unwrap_or(Action::None),
            Command::Start => control(ContainerAction::Start),
            Command::Stop => control(ContainerAction::Stop),
            Command::Restart => control(ContainerAction::Restart),
            Command::Refresh => Action::Refresh,
            Command::Help => Action::ShowHelp,
            Command::Quit => Action::Quit,
            Command::CloseLogs => Action::CloseLogs,
            Command::ToggleFollow => Action::ToggleFollow,
            Command::CloseHelp => Action::CloseHelp,
            Command::Dismiss => Action::DismissNotice,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let rows = self.containers.records().len();
        match action {
            Action::Up => {
                if self.logs.is_open() {
                    self.logs.scroll_up(1);
                } else {
                    self.table.previous(rows);
                }
            }
            Action::Down => {
                if self.logs.is_open() {
                    self.logs.scroll_down(1);
                } else {
                    self.table.next(rows);
                }
            }
            Action::Top => {
                if self.logs.is_open() {
                    self.logs.top();
                } else {
                    self.table.top(rows);
                }
            }
            Action::Bottom => {
                if self.logs.is_open() {
                    self.logs.bottom();
                } else {
                    self.table.bottom(rows);
                }
            }
            Action::Control(id, action) => self.dispatch_action(id, action),
            Action::ViewLogs { id, name } => self.open_logs(&id, &name),
            Action::CloseLogs => self.close_logs(),
            Action::ToggleFollow => self.logs.toggle_follow(),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::DismissNotice => self.notice = None,
            Action::Refresh => self.poll_now(),
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
    }

    /// Send a control request. The row shows a busy label until the next
    /// re-render; local state is never changed optimistically.
    pub fn dispatch_action(&mut self, id: String, action: ContainerAction) {
        if !self.config.actions_enabled() {
            self.notice = Some(Notice::error(
                ApiError::Unsupported("Container actions").user_message(),
            ));
            return;
        }
        if !self.containers.mark_busy(&id, action) {
            debug!(id, %action, "action ignored, row busy or gone");
            return;
        }
        info!(id, %action, "dispatching container action");

        let service = self.service.clone();
        let tx = self.events_tx.clone();
        let delay = self.config.action_refresh_delay();
        tokio::spawn(async move {
            let result = service.run_action(&id, action).await;
            let answered = result.is_ok();
            let _ = tx.send(AppEvent::ActionFinished { id, action, result });
            if answered {
                tokio::time::sleep(delay).await;
                let _ = tx.send(AppEvent::RefreshRequested);
            }
        });
    }

    fn finish_action(
        &mut self,
        id: &str,
        action: ContainerAction,
        result: Result<ActionResponse, ApiError>,
    ) {
        match result {
            Ok(response) if response.is_success() => {
                info!(id, %action, "action succeeded");
                self.effects
                    .trigger_status_change(action != ContainerAction::Stop);
            }
            Ok(response) => {
                let message = response.failure_message();
                warn!(id, %action, %message, "action rejected");
                self.notice = Some(Notice::error(format!("Error: {}", message)));
            }
            Err(err) => {
                warn!(id, %action, error = %err, "action request failed");
                self.notice = Some(Notice::error(format!(
                    "An error occurred while trying to {} the container.",
                    action
                )));
            }
        }
    }

    /// Show the log modal for one container. Replaces any open view.
    pub fn open_logs(&mut self, id: &str, name: &str) {
        let mode = self.config.log_mode;
        let session = self.logs.open(id, name, mode);
        info!(id, session, ?mode, "opening logs");

        match mode {
            LogMode::Stream => {
                match self
                    .service
                    .open_log_stream(id, session, self.events_tx.clone())
                {
                    Ok(handle) => self.logs.attach(handle),
                    Err(err) => {
                        warn!(id, error = %err, "could not open log stream");
                        self.logs.fail_to_open(session, &err);
                    }
                }
            }
            LogMode::Snapshot => {
                let service = self.service.clone();
                let tx = self.events_tx.clone();
                let id = id.to_string();
                tokio::spawn(async move {
                    let result = service.fetch_logs(&id).await;
                    let _ = tx.send(AppEvent::SnapshotLoaded { session, result });
                });
            }
        }
    }

    /// Idempotent
    pub fn close_logs(&mut self) {
        if self.logs.close() {
            info!("log view closed");
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        use crate::ui::layout::main_layout;
        use crate::ui::Theme;

        let bg_block = ratatui::widgets::Block::default().style(Style::default().bg(Theme::BG));
        frame.render_widget(bg_block, frame.area());

        let (header_area, body, footer) = main_layout(frame.area());

        Header::render(
            frame,
            header_area,
            &self.config,
            self.containers.last_updated(),
            self.containers.is_loading(),
        );

        let actions_enabled = self.config.actions_enabled();
        self.table
            .render(frame, body, &self.containers, actions_enabled, !self.logs.is_open());

        StatusBar::render(frame, footer, self.commands.hints(self.scope()));

        // Modals (rendered last, on top)
        if self.logs.is_open() {
            LogModal::render(frame, frame.area(), &mut self.logs);
        }
        if self.show_help {
            HelpModal::render(frame, frame.area(), actions_enabled);
        }
        if let Some(notice) = &self.notice {
            NoticeModal::render(frame, frame.area(), notice);
        }
    }

    /// Render with visual effects
    pub fn render_with_effects(&mut self, frame: &mut Frame, elapsed: Duration) {
        use crate::ui::layout::main_layout;

        self.render(frame);

        let area = frame.area();
        let (header_area, body, _) = main_layout(area);

        self.effects.process(elapsed, frame.buffer_mut(), area);
        self.effects.process_loading(
            elapsed,
            frame.buffer_mut(),
            header_area,
            self.containers.is_loading(),
        );
        self.effects.process_status(elapsed, frame.buffer_mut(), body);
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.dispose();
    }
}
