use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{features, shared, ui, widgets};
use features::todos::{TodoError, TodoListController};
use shared::{Config, I18n, ModernTheme};

/// Status message for user feedback
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub timestamp: std::time::Instant,
    pub message_type: StatusType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
}

/// Which surface currently receives key presses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    List,
    AddDialog,
    Help,
}

/// Main application state
pub struct App {
    /// Flag to indicate if the app should quit
    pub should_quit: bool,
    /// Todo list and add dialog
    pub controller: TodoListController,
    /// Revision feed from the controller
    revision_rx: watch::Receiver<u64>,
    /// Application configuration
    pub config: Config,
    /// Application theme
    pub theme: ModernTheme,
    /// Internationalization
    pub i18n: I18n,
    /// Highlighted row in the item list
    pub selected: usize,
    /// Current status message
    pub status_message: Option<StatusMessage>,
    /// Flag to indicate if UI needs redraw
    needs_redraw: bool,
    /// Write config changes to disk
    persist_config: bool,
}

impl App {
    /// Create a new App instance that persists config changes
    pub fn new(config: Config) -> Self {
        Self::from_config(config, true)
    }

    /// App that never touches the config file
    #[cfg(test)]
    pub fn for_tests(config: Config) -> Self {
        Self::from_config(config, false)
    }

    fn from_config(config: Config, persist_config: bool) -> Self {
        let controller = TodoListController::new();
        let revision_rx = controller.subscribe();

        Self {
            should_quit: false,
            theme: ModernTheme::for_mode(config.theme_mode),
            i18n: I18n::new(config.language),
            controller,
            revision_rx,
            config,
            selected: 0,
            status_message: None,
            needs_redraw: true,
            persist_config,
        }
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        if !IsTty::is_tty(&io::stdout()) {
            eprintln!("This application requires a TTY terminal to run.");
            return Ok(());
        }

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        info!("terminal ready");

        let result = self.event_loop(&mut terminal);

        // Every restore step runs even if the loop or an earlier step failed
        report_restore_failures([
            ("disable raw mode", disable_raw_mode()),
            (
                "leave alternate screen",
                execute!(terminal.backend_mut(), LeaveAlternateScreen),
            ),
            ("show cursor", terminal.show_cursor()),
        ]);

        let cleanup = self.cleanup().await;
        if let (Err(_), Err(e)) = (&result, &cleanup) {
            warn!("cleanup failed: {e}");
        }
        // The loop error wins over a cleanup error
        result.and(cleanup)
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            // Controller changes arrive as new revisions
            if self.revision_rx.has_changed().unwrap_or(false) {
                self.revision_rx.borrow_and_update();
                self.needs_redraw = true;
            }

            // Update status message (auto-clear after 2 seconds)
            self.update_status_message(std::time::Duration::from_secs(2));

            if self.needs_redraw {
                terminal.draw(|f| ui::draw(f, self))?;
                self.needs_redraw = false;
            }

            if event::poll(std::time::Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key.code, key.modifiers)?;
                    }
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Surface that owns the keyboard right now
    pub fn input_mode(&self) -> InputMode {
        if self.controller.dialog_open() {
            InputMode::AddDialog
        } else if self.config.show_help {
            InputMode::Help
        } else {
            InputMode::List
        }
    }

    /// Handle keyboard input
    fn handle_key_event(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.input_mode() {
            InputMode::AddDialog => self.handle_dialog_key(key, modifiers),
            InputMode::Help => {
                if matches!(
                    key,
                    KeyCode::Char('?') | KeyCode::Char('/') | KeyCode::Esc
                ) {
                    self.toggle_help();
                }
            }
            InputMode::List => self.handle_list_key(key),
        }
        Ok(())
    }

    fn handle_list_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('ㅂ') => self.should_quit = true,
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('+') | KeyCode::Char('ㅁ') => {
                self.controller.open_add_dialog();
            }
            KeyCode::Char('j') | KeyCode::Char('ㅓ') | KeyCode::Down => self.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Char('ㅏ') | KeyCode::Up => self.move_selection_up(),
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('x') => self.toggle_selected(),
            KeyCode::Char('X') => self.toggle_selected_matching(),
            KeyCode::Char('t') | KeyCode::Char('ㅅ') => self.toggle_theme(),
            KeyCode::Char('?') | KeyCode::Char('/') => self.toggle_help(),
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => self.controller.cancel_add_dialog(),
            KeyCode::Enter => self.submit_dialog(),
            KeyCode::Backspace => {
                let shorter = widgets::without_last_grapheme(self.controller.draft_text());
                self.controller.update_draft_text(shorter);
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                // The clear action only exists while there is something to clear
                if !self.controller.draft_text().is_empty() {
                    self.controller.clear_draft_text();
                }
            }
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut draft = self.controller.draft_text().to_string();
                draft.push(c);
                self.controller.update_draft_text(draft);
            }
            _ => {}
        }
    }

    fn submit_dialog(&mut self) {
        match self.controller.submit_add_dialog() {
            Ok(id) => {
                if let Some(index) = self.controller.items().iter().position(|it| it.id == id) {
                    self.selected = index;
                    let text = self.controller.items()[index].text().to_string();
                    self.show_status(
                        &format!("{} '{}'", self.i18n.t("status.added"), text),
                        StatusType::Success,
                    );
                }
            }
            Err(TodoError::EmptyDraft) => debug!("submit rejected, draft empty"),
            Err(e) => warn!("submit failed: {e}"),
        }
    }

    /// Move selection down in the item list
    fn move_selection_down(&mut self) {
        let len = self.controller.items().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
            self.needs_redraw = true;
        }
    }

    /// Move selection up in the item list
    fn move_selection_up(&mut self) {
        let len = self.controller.items().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
            self.needs_redraw = true;
        }
    }

    fn toggle_selected(&mut self) {
        let Some(item) = self.controller.items().get(self.selected).cloned() else {
            return;
        };

        if self.controller.toggle_done(&item) {
            let key = if item.is_done {
                "status.undone"
            } else {
                "status.done"
            };
            self.show_status(
                &format!("{} {}", self.i18n.t(key), item.text()),
                StatusType::Info,
            );
        }
    }

    /// Flip the selected item together with every item equal to it
    fn toggle_selected_matching(&mut self) {
        let Some(item) = self.controller.items().get(self.selected).cloned() else {
            return;
        };

        let flipped = self.controller.toggle_done_matching(&item);
        if flipped > 0 {
            self.show_status(
                &format!(
                    "{} {} ({})",
                    self.i18n.t("status.toggled_matching"),
                    item.text(),
                    flipped
                ),
                StatusType::Info,
            );
        }
    }

    /// Cycle theme mode
    fn toggle_theme(&mut self) {
        let mode = self.config.cycle_theme();
        self.theme = ModernTheme::for_mode(mode);
        self.save_config();

        self.show_status(
            &format!("{} {}", self.i18n.t("status.theme"), mode.display_name()),
            StatusType::Success,
        );
    }

    /// Toggle help overlay
    fn toggle_help(&mut self) {
        self.config.toggle_help();
        self.save_config();
        self.needs_redraw = true;
    }

    fn save_config(&self) {
        if self.persist_config {
            if let Err(e) = self.config.save() {
                warn!("failed to save config: {e}");
            }
        }
    }

    /// Get current theme instance
    pub fn current_theme(&self) -> &ModernTheme {
        &self.theme
    }

    /// Show a status message to the user
    pub fn show_status(&mut self, text: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: text.to_string(),
            timestamp: std::time::Instant::now(),
            message_type: status_type,
        });
        self.needs_redraw = true;
    }

    /// Clear status message if it's older than the specified duration
    pub fn update_status_message(&mut self, max_age: std::time::Duration) {
        if let Some(ref msg) = self.status_message {
            if msg.timestamp.elapsed() > max_age {
                self.status_message = None;
                self.needs_redraw = true;
            }
        }
    }

    /// Clean up resources before exiting
    async fn cleanup(&mut self) -> Result<()> {
        if self.persist_config {
            self.config.save()?;
        }
        info!(items = self.controller.items().len(), "exiting");
        Ok(())
    }
}

/// Log each failed terminal restore step, returning how many failed
fn report_restore_failures<const N: usize>(steps: [(&str, io::Result<()>); N]) -> usize {
    let mut failed = 0;
    for (step, outcome) in steps {
        if let Err(e) = outcome {
            warn!("terminal restore failed to {step}: {e}");
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ThemeMode;

    fn test_app() -> App {
        App::for_tests(Config::default())
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key_event(key, KeyModifiers::NONE).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_item(app: &mut App, text: &str) {
        press(app, KeyCode::Char('a'));
        type_text(app, text);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_add_item_through_keys() {
        let mut app = test_app();
        add_item(&mut app, "Buy milk");

        assert_eq!(app.controller.items().len(), 1);
        assert_eq!(app.controller.items()[0].text(), "Buy milk");
        assert_eq!(app.input_mode(), InputMode::List);
        assert_eq!(
            app.status_message.as_ref().map(|m| m.message_type.clone()),
            Some(StatusType::Success)
        );
    }

    #[test]
    fn test_dialog_keys_are_typed_not_commands() {
        let mut app = test_app();
        add_item(&mut app, "a");

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "qx t?");

        assert!(!app.should_quit);
        assert_eq!(app.controller.draft_text(), "qx t?");
        assert!(!app.controller.items()[0].is_done);
        assert!(!app.config.show_help);
    }

    #[test]
    fn test_empty_submit_shows_error_and_keeps_dialog() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), InputMode::AddDialog);
        assert!(app.controller.validation_error());
        assert!(app.controller.items().is_empty());
    }

    #[test]
    fn test_escape_cancels_dialog_then_quits() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode(), InputMode::List);
        assert!(app.controller.items().is_empty());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.draft_text(), "ab");

        app.handle_key_event(KeyCode::Char('u'), KeyModifiers::CONTROL)
            .unwrap();
        assert_eq!(app.controller.draft_text(), "");
        assert!(app.controller.dialog_open());

        // Backspace on an empty draft stays empty
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.draft_text(), "");
    }

    #[test]
    fn test_toggle_selected_item() {
        let mut app = test_app();
        add_item(&mut app, "Buy milk");
        add_item(&mut app, "Walk dog");
        assert_eq!(app.selected, 1);

        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char(' '));

        let items = app.controller.items();
        assert!(items[0].is_done);
        assert!(!items[1].is_done);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 0);

        add_item(&mut app, "one");
        add_item(&mut app, "two");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode(), InputMode::Help);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.controller.dialog_open());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode(), InputMode::List);
    }

    #[test]
    fn test_theme_cycles() {
        let mut app = test_app();
        assert_eq!(app.config.theme_mode, ThemeMode::Purple);
        assert_eq!(app.theme.bar, ModernTheme::purple().bar);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.config.theme_mode, ThemeMode::Dark);
        assert_eq!(app.theme.text_primary, ModernTheme::dark().text_primary);
    }

    #[test]
    fn test_shift_x_toggles_all_equal_items() {
        let mut app = test_app();
        add_item(&mut app, "Walk dog");
        add_item(&mut app, "Buy milk");
        add_item(&mut app, "Walk dog");
        assert_eq!(app.selected, 2);

        press(&mut app, KeyCode::Char('X'));
        let done: Vec<bool> = app.controller.items().iter().map(|it| it.is_done).collect();
        assert_eq!(done, vec![true, false, true]);
        assert!(app
            .status_message
            .as_ref()
            .is_some_and(|m| m.text.ends_with("Walk dog (2)")));

        // Plain x still flips only the selected row
        press(&mut app, KeyCode::Char('x'));
        let done: Vec<bool> = app.controller.items().iter().map(|it| it.is_done).collect();
        assert_eq!(done, vec![true, false, false]);
    }

    #[test]
    fn test_shift_x_on_empty_list_is_noop() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('X'));
        assert!(app.status_message.is_none());
        assert!(!app.revision_rx.has_changed().unwrap());
    }

    #[test]
    fn test_restore_failures_do_not_stop_later_steps() {
        let broken = || Err(io::Error::new(io::ErrorKind::Other, "gone"));
        assert_eq!(report_restore_failures([("a", Ok(())), ("b", Ok(()))]), 0);
        assert_eq!(
            report_restore_failures([("a", broken()), ("b", Ok(())), ("c", broken())]),
            2
        );
    }

    #[test]
    fn test_ctrl_c_quits_from_dialog() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        app.handle_key_event(KeyCode::Char('c'), KeyModifiers::CONTROL)
            .unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_controller_changes_reach_revision_feed() {
        let mut app = test_app();
        assert!(!app.revision_rx.has_changed().unwrap());
        press(&mut app, KeyCode::Char('a'));
        assert!(app.revision_rx.has_changed().unwrap());
    }
}
