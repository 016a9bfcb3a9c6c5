use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::{info, warn};

use resto_core::{
    AuthMode, ButtonAction, FocusCursor, FormState, PanelId,
    chooser::{Chooser, ChooserOutcome},
    help_popup::HelpPopup,
    keybinds::{Action, InputMode, process_normal_key},
    prompt::{Prompt, PromptOutcome},
    settings::Settings,
};
use resto_http::{
    ExecutorCmd, ExecutorEvent, HttpExecutor, HttpResponse, RequestSpec, UpdateStatus, files,
    update::{LATEST_RELEASE_URL, UPDATE_INSTRUCTIONS},
};

use crate::ui::{HitMap, HitTarget};

/// Version reported to the update check.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default file name offered by "Save Response in File".
pub const DEFAULT_RESPONSE_FILE: &str = "response.json";

/// Files the app reads and writes.
#[derive(Debug, Clone)]
pub struct Paths {
    pub settings: PathBuf,
    pub body: PathBuf,
}

/// Entries of the Ctrl-P panel menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    RequestForm,
    SendRequest,
    Body,
    Headers,
    Authorization,
    ShowResponseHeaders,
    SaveResponse,
    Return,
    Quit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 9] = [
        MenuEntry::RequestForm,
        MenuEntry::SendRequest,
        MenuEntry::Body,
        MenuEntry::Headers,
        MenuEntry::Authorization,
        MenuEntry::ShowResponseHeaders,
        MenuEntry::SaveResponse,
        MenuEntry::Return,
        MenuEntry::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::RequestForm => "Request Form",
            MenuEntry::SendRequest => "Send Request",
            MenuEntry::Body => "Body",
            MenuEntry::Headers => "Headers",
            MenuEntry::Authorization => "Authorization",
            MenuEntry::ShowResponseHeaders => "Show Response Headers",
            MenuEntry::SaveResponse => "Save Response in File",
            MenuEntry::Return => "Return",
            MenuEntry::Quit => "Quit",
        }
    }
}

const UPDATE_OPTIONS: [&str; 3] = ["How to Update ?", "Don't show again", "Cancel"];

/// What the open prompt will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptPurpose {
    AddHeader,
    RemoveHeader,
    SaveResponse,
}

/// What the open chooser will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChooserPurpose {
    PanelMenu,
    AuthMode,
    Update,
    Notice,
}

/// A read-only text popup closed with Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOverlay {
    pub title: String,
    pub text: String,
}

/// The main application state.
pub struct App {
    pub form: FormState,
    pub settings: Settings,
    paths: Paths,
    executor: HttpExecutor,
    pub prompt: Prompt,
    prompt_purpose: Option<PromptPurpose>,
    pub chooser: Chooser,
    chooser_purpose: Option<ChooserPurpose>,
    pub help_popup: HelpPopup,
    pub overlay: Option<TextOverlay>,
    /// Last successful response, kept for the headers overlay and saving.
    pub response: Option<HttpResponse>,
    pub response_body: String,
    pub status_text: String,
    pub request_in_flight: bool,
    spinner_frame: u8,
    /// Set when the user asked for the update check, so "up to date" is shown.
    update_requested: bool,
    /// One-line feedback for the status bar.
    pub message: String,
    pub should_quit: bool,
    pending_editor: Option<PathBuf>,
    /// Item rects from the last frame, for click-to-focus.
    hit_map: HitMap,
}

impl App {
    pub fn new(settings: Settings, paths: Paths) -> Self {
        let mut form = FormState::new();
        if settings.rs_settings.default_auth != AuthMode::None {
            form.set_auth_mode(settings.rs_settings.default_auth);
        }
        Self {
            form,
            settings,
            paths,
            executor: HttpExecutor::spawn(),
            prompt: Prompt::new(),
            prompt_purpose: None,
            chooser: Chooser::new(),
            chooser_purpose: None,
            help_popup: HelpPopup::new(),
            overlay: None,
            response: None,
            response_body: String::new(),
            status_text: String::new(),
            request_in_flight: false,
            spinner_frame: 0,
            update_requested: false,
            message: "Ctrl-w for help".to_string(),
            should_quit: false,
            pending_editor: None,
            hit_map: HitMap::default(),
        }
    }

    /// Current input routing, for the status bar.
    pub fn mode(&self) -> InputMode {
        if self.prompt.visible {
            InputMode::Prompt
        } else if self.chooser.visible || self.help_popup.visible || self.overlay.is_some() {
            InputMode::Menu
        } else {
            InputMode::Normal
        }
    }

    /// Kick off the background update check unless the user opted out.
    pub fn startup_update_check(&mut self) {
        if self.settings.rs_settings.show_update {
            self.request_update_check(false);
        }
    }

    /// Remember where the last frame drew its items.
    pub fn set_hit_map(&mut self, hit_map: HitMap) {
        self.hit_map = hit_map;
    }

    /// Path waiting to be opened in the editor, if any.
    pub fn take_pending_editor(&mut self) -> Option<PathBuf> {
        self.pending_editor.take()
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Mouse(mouse) = event {
            self.handle_mouse(mouse);
            return;
        }
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            // Ctrl-c always quits
            if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
                self.should_quit = true;
                return;
            }

            if self.help_popup.visible {
                self.help_popup.handle_key(key);
                return;
            }
            if self.overlay.is_some() {
                self.handle_overlay_key(key);
                return;
            }
            if self.prompt.visible {
                self.handle_prompt_key(key);
                return;
            }
            if self.chooser.visible {
                self.handle_chooser_key(key);
                return;
            }

            let action = process_normal_key(key);
            self.process_action(action);
        }
    }

    /// Left click focuses the item under the pointer, or the panel's entry
    /// point when the click misses every item. Ignored while a popup is open.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.mode() != InputMode::Normal {
            return;
        }
        match self.hit_map.target_at(mouse.column, mouse.row) {
            // A stale map may name an item that is gone; focus_at refuses it.
            Some(HitTarget::Item(cursor)) => {
                if !self.form.focus_at(cursor) {
                    self.form.focus_panel(cursor.panel);
                }
            }
            Some(HitTarget::Panel(panel)) => self.form.focus_panel(panel),
            None => {}
        }
    }

    fn process_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Navigate(direction) => self.form.navigate(direction),
            Action::Activate => match self.form.focused_button() {
                Some(button) => self.press_button(button),
                None => self.form.cycle_choice_forward(),
            },
            Action::CycleForward => self.form.cycle_choice_forward(),
            Action::CycleBackward => self.form.cycle_choice_backward(),
            Action::InsertChar(' ') if self.focused_choice() => self.form.cycle_choice_forward(),
            Action::InsertChar(c) => self.form.insert_char(c),
            Action::Backspace => self.form.backspace(),
            Action::SelectAuthMode => self.open_auth_chooser(),
            Action::PanelMenu => {
                self.chooser
                    .open("resto", MenuEntry::ALL.iter().map(|entry| entry.label()));
                self.chooser_purpose = Some(ChooserPurpose::PanelMenu);
            }
            Action::Help => self.help_popup.show(),
            Action::OpenSettings => self.pending_editor = Some(self.paths.settings.clone()),
            Action::CheckUpdate => self.request_update_check(true),
        }
    }

    fn focused_choice(&self) -> bool {
        self.form
            .focused_field()
            .is_some_and(|field| field.input.is_choice())
    }

    fn press_button(&mut self, button: ButtonAction) {
        match button {
            ButtonAction::FocusHeaders => self.form.focus_panel(PanelId::Headers),
            ButtonAction::FocusAuth => self.form.focus_panel(PanelId::Auth),
            ButtonAction::FocusRequest => self.form.focus_panel(PanelId::Request),
            ButtonAction::EditBody => self.edit_body(),
            ButtonAction::Send => {
                self.send_request();
                self.form.focus_panel(PanelId::Response);
            }
            ButtonAction::AddHeader => self.open_prompt("Header Name", "", PromptPurpose::AddHeader),
            ButtonAction::RemoveHeader => {
                self.open_prompt("Header to remove", "", PromptPurpose::RemoveHeader)
            }
        }
    }

    fn open_prompt(&mut self, label: &str, initial: &str, purpose: PromptPurpose) {
        self.prompt.open(label, initial);
        self.prompt_purpose = Some(purpose);
    }

    fn open_auth_chooser(&mut self) {
        let current = AuthMode::ALL
            .iter()
            .position(|mode| *mode == self.form.auth_mode())
            .unwrap_or(0);
        self.chooser.open(
            "Authentication Type",
            AuthMode::ALL.iter().map(|mode| mode.label()),
        );
        self.chooser.select(current);
        self.chooser_purpose = Some(ChooserPurpose::AuthMode);
    }

    fn open_notice(&mut self, message: impl Into<String>) {
        self.chooser.open(message, ["Ok"]);
        self.chooser_purpose = Some(ChooserPurpose::Notice);
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.overlay = None;
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match self.prompt.handle_key(key) {
            PromptOutcome::Pending => {}
            PromptOutcome::Cancelled => self.prompt_purpose = None,
            PromptOutcome::Submitted(text) => {
                if let Some(purpose) = self.prompt_purpose.take() {
                    self.on_prompt_submitted(purpose, &text);
                }
            }
        }
    }

    fn on_prompt_submitted(&mut self, purpose: PromptPurpose, text: &str) {
        match purpose {
            PromptPurpose::AddHeader => match self.form.add_header(text) {
                Ok(()) => self.message = format!("Added header {}", text.trim()),
                Err(e) => self.message = e.to_string(),
            },
            PromptPurpose::RemoveHeader => match self.form.remove_header(text) {
                Ok(()) => self.message = format!("Removed header {}", text.trim()),
                Err(e) => self.message = e.to_string(),
            },
            PromptPurpose::SaveResponse => self.save_response(text.trim()),
        }
    }

    fn handle_chooser_key(&mut self, key: KeyEvent) {
        match self.chooser.handle_key(key) {
            ChooserOutcome::Pending => {}
            ChooserOutcome::Cancelled => self.chooser_purpose = None,
            ChooserOutcome::Chosen(index) => {
                if let Some(purpose) = self.chooser_purpose.take() {
                    self.on_chosen(purpose, index);
                }
            }
        }
    }

    fn on_chosen(&mut self, purpose: ChooserPurpose, index: usize) {
        match purpose {
            ChooserPurpose::PanelMenu => {
                if let Some(entry) = MenuEntry::ALL.get(index) {
                    self.on_menu_entry(*entry);
                }
            }
            ChooserPurpose::AuthMode => {
                if let Some(mode) = AuthMode::ALL.get(index) {
                    self.form.set_auth_mode(*mode);
                    self.message = format!("Authentication: {}", mode.label());
                }
            }
            ChooserPurpose::Update => match index {
                0 => {
                    self.overlay = Some(TextOverlay {
                        title: "Update".to_string(),
                        text: UPDATE_INSTRUCTIONS.to_string(),
                    })
                }
                1 => self.disable_update_notice(),
                _ => {}
            },
            ChooserPurpose::Notice => {}
        }
    }

    fn on_menu_entry(&mut self, entry: MenuEntry) {
        match entry {
            MenuEntry::RequestForm => self.form.focus_panel(PanelId::Request),
            MenuEntry::SendRequest => {
                self.send_request();
                self.form.focus_panel(PanelId::Request);
            }
            MenuEntry::Body => self.edit_body(),
            MenuEntry::Headers => self.form.focus_panel(PanelId::Headers),
            MenuEntry::Authorization => self.form.focus_panel(PanelId::Auth),
            MenuEntry::ShowResponseHeaders => match &self.response {
                Some(response) => {
                    self.overlay = Some(TextOverlay {
                        title: "Response Headers".to_string(),
                        text: response.headers_dump(),
                    })
                }
                None => self.message = "No response yet".to_string(),
            },
            MenuEntry::SaveResponse => {
                self.open_prompt("File Name", DEFAULT_RESPONSE_FILE, PromptPurpose::SaveResponse)
            }
            MenuEntry::Return => self.form.focus_panel(PanelId::Request),
            MenuEntry::Quit => self.should_quit = true,
        }
    }

    // ── Collaborators ────────────────────────────────────────────────

    fn edit_body(&mut self) {
        match files::ensure_file(&self.paths.body) {
            Ok(()) => self.pending_editor = Some(self.paths.body.clone()),
            Err(e) => self.message = format!("{e:#}"),
        }
    }

    /// Snapshot the form and hand it to the executor.
    fn send_request(&mut self) {
        if self.request_in_flight {
            self.message = "A request is already in flight".to_string();
            return;
        }
        self.response = None;
        self.response_body.clear();
        self.status_text.clear();
        let body = match files::read_body(&self.paths.body) {
            Ok(body) => body,
            Err(e) => {
                self.status_text = format!("Error: {e:#}");
                return;
            }
        };
        let spec = RequestSpec::from_form(&self.form, &body);
        info!(method = spec.method.as_str(), url = %spec.url, "dispatching request");
        if self.executor.send(ExecutorCmd::Send(spec)).is_err() {
            self.status_text = "Error: request executor stopped".to_string();
            return;
        }
        self.request_in_flight = true;
        self.spinner_frame = 0;
    }

    fn save_response(&mut self, name: &str) {
        let Some(response) = &self.response else {
            self.message = "No response to save".to_string();
            return;
        };
        let name = if name.is_empty() { DEFAULT_RESPONSE_FILE } else { name };
        self.message = match files::save_response(Path::new(name), &response.display_body()) {
            Ok(()) => format!("Response saved to {name}"),
            Err(e) => format!("{e:#}"),
        };
    }

    fn request_update_check(&mut self, user_requested: bool) {
        self.update_requested = user_requested;
        let cmd = ExecutorCmd::CheckUpdate {
            current_version: VERSION.to_string(),
            url: LATEST_RELEASE_URL.to_string(),
        };
        if self.executor.send(cmd).is_err() {
            self.message = "Update check unavailable".to_string();
        } else if user_requested {
            self.message = "Checking for updates...".to_string();
        }
    }

    fn disable_update_notice(&mut self) {
        self.settings.rs_settings.show_update = false;
        self.message = match self.settings.save(&self.paths.settings) {
            Ok(()) => "Update notices disabled".to_string(),
            Err(e) => format!("{e:#}"),
        };
    }

    /// Called by the main loop once the editor has exited.
    pub fn editor_finished(&mut self, path: &Path, result: Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "editor failed");
            self.message = format!("{e:#}");
            return;
        }
        if path == self.paths.settings {
            match Settings::load(&self.paths.settings) {
                Ok(settings) => {
                    self.settings = settings;
                    self.message = "Settings reloaded".to_string();
                    info!("settings reloaded");
                }
                Err(e) => self.message = format!("{e:#}"),
            }
        } else {
            self.message = "Body saved".to_string();
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Advance the spinner and drain executor results.
    pub fn tick(&mut self) {
        if self.request_in_flight {
            self.spinner_frame = (self.spinner_frame + 1) % 10;
        }
        while let Some(event) = self.executor.try_recv() {
            self.on_executor_event(event);
        }
    }

    pub fn spinner_char(&self) -> char {
        const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        FRAMES[self.spinner_frame as usize]
    }

    fn on_executor_event(&mut self, event: ExecutorEvent) {
        match event {
            ExecutorEvent::Response(Ok(response)) => {
                self.request_in_flight = false;
                self.response_body = response.display_body();
                self.status_text = response.summary();
                self.response = Some(response);
            }
            ExecutorEvent::Response(Err(e)) => {
                self.request_in_flight = false;
                warn!(error = %e, "request failed");
                self.response_body.clear();
                self.status_text = format!("Error: {e}");
                self.response = None;
            }
            ExecutorEvent::Update(Ok(status)) => self.on_update_status(status),
            ExecutorEvent::Update(Err(e)) => {
                warn!(error = %e, "update check failed");
                if self.update_requested {
                    self.message = format!("Update check failed: {e}");
                }
                self.update_requested = false;
            }
        }
    }

    fn on_update_status(&mut self, status: UpdateStatus) {
        let requested = std::mem::take(&mut self.update_requested);
        if self.chooser.visible || self.prompt.visible {
            self.message = status.message();
            return;
        }
        match status {
            UpdateStatus::Available { .. } => {
                self.chooser.open(status.message(), UPDATE_OPTIONS);
                self.chooser_purpose = Some(ChooserPurpose::Update);
            }
            UpdateStatus::UpToDate { .. } if requested => self.open_notice(status.message()),
            UpdateStatus::UpToDate { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use resto_core::{Direction, Position};
    use std::time::{Duration, Instant};

    fn app_in(dir: &Path) -> App {
        let paths = Paths {
            settings: dir.join("settings.json"),
            body: dir.join("request_body"),
        };
        App::new(Settings::default(), paths)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn wait_for_reply(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.request_in_flight && Instant::now() < deadline {
            app.tick();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    fn sample_response() -> HttpResponse {
        HttpResponse {
            status_code: 200,
            status_text: "OK".to_string(),
            elapsed_ms: 5,
            size_bytes: 2,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            request_headers: Vec::new(),
            body: "ok".to_string(),
            received_at: chrono::Local::now(),
        }
    }

    #[test]
    fn test_typing_edits_focused_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "http://x");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.url(), "http://");
    }

    #[test]
    fn test_space_cycles_choice_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.form.method(), "POST");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.method(), "PUT");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.form.method(), "POST");
    }

    #[test]
    fn test_add_and_remove_header_through_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.form.focus_panel(PanelId::Headers);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), InputMode::Prompt);
        type_text(&mut app, "X-Trace");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.header_count(), 1);
        assert_eq!(app.message, "Added header X-Trace");

        app.form.focus_panel(PanelId::Headers);
        // Cursor is on the new field; step to Remove Header.
        ctrl(&mut app, 'j');
        ctrl(&mut app, 'j');
        assert_eq!(app.form.cursor().position, Position::Button(1));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "X-Missing");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.header_count(), 1);
        assert!(app.message.contains("X-Missing"));
    }

    #[test]
    fn test_auth_chooser_applies_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        ctrl(&mut app, 'a');
        assert_eq!(app.mode(), InputMode::Menu);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.auth_mode(), AuthMode::BearerToken);
        assert_eq!(app.form.panel(PanelId::Auth).fields.len(), 1);
    }

    #[test]
    fn test_default_auth_applied_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.rs_settings.default_auth = AuthMode::Basic;
        let paths = Paths {
            settings: dir.path().join("settings.json"),
            body: dir.path().join("request_body"),
        };
        let app = App::new(settings, paths);
        assert_eq!(app.form.auth_mode(), AuthMode::Basic);
    }

    #[test]
    fn test_panel_menu_focuses_panels() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        ctrl(&mut app, 'p');
        // Headers is the fourth entry.
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.cursor().panel, PanelId::Headers);
        assert_eq!(app.mode(), InputMode::Normal);
    }

    #[test]
    fn test_panel_menu_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        ctrl(&mut app, 'p');
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
    }

    #[test]
    fn test_send_button_focuses_response_and_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        for _ in 0..6 {
            app.form.navigate(Direction::Down);
        }
        assert_eq!(app.form.focused_button(), Some(ButtonAction::Send));
        press(&mut app, KeyCode::Enter);
        assert!(app.request_in_flight);
        assert_eq!(app.form.cursor(), FocusCursor::view(PanelId::Response));
        wait_for_reply(&mut app);
        assert!(!app.request_in_flight);
        assert_eq!(app.status_text, "Error: URL is empty");
        assert!(app.response_body.is_empty());
        assert_eq!(app.form.cursor(), FocusCursor::view(PanelId::Response));
    }

    #[test]
    fn test_menu_send_and_return_focus_request_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.form.focus_panel(PanelId::Headers);
        app.on_menu_entry(MenuEntry::Return);
        assert_eq!(app.form.cursor(), FocusCursor::start());

        app.form.focus_panel(PanelId::Status);
        app.on_menu_entry(MenuEntry::SendRequest);
        assert_eq!(app.form.cursor(), FocusCursor::start());
        wait_for_reply(&mut app);
        assert_eq!(app.status_text, "Error: URL is empty");
    }

    #[test]
    fn test_unreadable_body_clears_previous_response() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        // A directory where the body file should be cannot be read.
        std::fs::create_dir(dir.path().join("request_body")).unwrap();
        app.response = Some(sample_response());
        app.response_body = "ok".to_string();
        app.send_request();
        assert!(!app.request_in_flight);
        assert!(app.response.is_none());
        assert!(app.response_body.is_empty());
        assert!(app.status_text.starts_with("Error:"));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = crate::ui::render(frame, app)).unwrap();
        app.set_hit_map(hits);
    }

    #[test]
    fn test_click_focuses_item_under_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        draw(&mut app);

        let send = FocusCursor::new(PanelId::Request, Position::Button(3));
        let rect = app.hit_map.item_rect(send).unwrap();
        click(&mut app, rect.x + 1, rect.y);
        assert_eq!(app.form.cursor(), send);

        // Top-right corner lies on the Response panel border.
        click(&mut app, 119, 0);
        assert_eq!(app.form.cursor(), FocusCursor::view(PanelId::Response));

        // Right button and the status bar do nothing.
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        }));
        click(&mut app, 0, 29);
        assert_eq!(app.form.cursor(), FocusCursor::view(PanelId::Response));
    }

    #[test]
    fn test_click_on_removed_header_keeps_cursor_valid() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.form.add_header("X-Trace").unwrap();
        draw(&mut app);
        let header = FocusCursor::new(PanelId::Headers, Position::Field(0));
        let rect = app.hit_map.item_rect(header).unwrap();

        app.form.remove_header("X-Trace").unwrap();
        click(&mut app, rect.x, rect.y);
        assert_eq!(
            app.form.cursor(),
            FocusCursor::new(PanelId::Headers, Position::Button(0))
        );
        assert!(app.form.cursor().is_valid_in(app.form.panels()));
    }

    #[test]
    fn test_clicks_ignored_while_menu_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        draw(&mut app);
        ctrl(&mut app, 'p');
        click(&mut app, 119, 0);
        assert_eq!(app.form.cursor(), FocusCursor::start());
    }

    #[test]
    fn test_response_headers_overlay_needs_response() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_menu_entry(MenuEntry::ShowResponseHeaders);
        assert!(app.overlay.is_none());
        assert_eq!(app.message, "No response yet");

        app.response = Some(sample_response());
        app.on_menu_entry(MenuEntry::ShowResponseHeaders);
        let overlay = app.overlay.clone().unwrap();
        assert!(overlay.text.contains("content-type: text/plain"));
        press(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_save_response_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.response = Some(sample_response());
        let target = dir.path().join("out.txt");
        app.on_prompt_submitted(PromptPurpose::SaveResponse, target.to_str().unwrap());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "ok");
        assert!(app.message.starts_with("Response saved"));
    }

    #[test]
    fn test_save_prompt_defaults_to_response_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_menu_entry(MenuEntry::SaveResponse);
        assert_eq!(app.prompt.input(), DEFAULT_RESPONSE_FILE);
    }

    #[test]
    fn test_update_modal_dont_show_again_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_update_status(UpdateStatus::compare("0.1.0", "0.2.0"));
        assert!(app.chooser.visible);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(!app.settings.rs_settings.show_update);
        let saved = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert!(!saved.rs_settings.show_update);
    }

    #[test]
    fn test_update_modal_how_to_update() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_update_status(UpdateStatus::compare("0.1.0", "0.2.0"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.overlay.as_ref().map(|o| o.text.as_str()),
            Some(UPDATE_INSTRUCTIONS)
        );
    }

    #[test]
    fn test_up_to_date_only_shown_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_update_status(UpdateStatus::compare("0.1.0", "0.1.0"));
        assert!(!app.chooser.visible);

        app.update_requested = true;
        app.on_update_status(UpdateStatus::compare("0.1.0", "0.1.0"));
        assert!(app.chooser.visible);
        assert_eq!(app.chooser_purpose, Some(ChooserPurpose::Notice));
    }

    #[test]
    fn test_editor_requests_and_settings_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        ctrl(&mut app, 'e');
        let path = app.take_pending_editor().unwrap();
        assert_eq!(path, dir.path().join("settings.json"));

        let mut edited = Settings::default();
        edited.rs_settings.enable_mouse = true;
        edited.save(&path).unwrap();
        app.editor_finished(&path, Ok(()));
        assert!(app.settings.rs_settings.enable_mouse);
        assert_eq!(app.message, "Settings reloaded");
    }

    #[test]
    fn test_body_button_creates_body_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.press_button(ButtonAction::EditBody);
        let path = app.take_pending_editor().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        ctrl(&mut app, 'w');
        assert!(app.help_popup.visible);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.cursor(), resto_core::FocusCursor::start());
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_popup.visible);
    }
}
