use std::path::PathBuf;

use crate::config::Settings;
use crate::services::palette;
use crate::services::session::EditSession;
use crate::ui::dialogs::Dialog;
use crate::ui::picker::PickerState;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ColorList,
    Help,
}

#[derive(Debug, Clone, Default)]
pub struct HelpState {
    pub scroll_offset: usize,
    pub max_scroll: usize,
    pub visible_height: usize,
}

pub struct App {
    pub settings: Settings,
    pub theme: Theme,
    pub session: EditSession,
    pub current_screen: Screen,

    // Color list cursor/scroll. visible_rows is refreshed by the draw pass
    // so input handling can clamp the scroll window to the real height.
    pub cursor: usize,
    pub scroll_offset: usize,
    pub visible_rows: usize,

    pub picker: Option<PickerState>,
    pub dialog: Option<Dialog>,
    pub message: Option<String>,
    pub message_timer: u8,
    pub help_state: HelpState,

    pub true_color: bool,
    pub saved_path: Option<PathBuf>,
}

impl App {
    pub fn new(session: EditSession, settings: Settings) -> Self {
        let theme = Theme::load(&settings.theme.name);
        Self {
            settings,
            theme,
            session,
            current_screen: Screen::ColorList,
            cursor: 0,
            scroll_offset: 0,
            visible_rows: 0,
            picker: None,
            dialog: None,
            message: None,
            message_timer: 0,
            help_state: HelpState::default(),
            true_color: Theme::supports_true_color(),
            saved_path: None,
        }
    }

    pub fn token_count(&self) -> usize {
        self.session.found_colors().len()
    }

    pub fn selected_token(&self) -> Option<&str> {
        self.session.found_colors().get(self.cursor).map(|s| s.as_str())
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let count = self.token_count();
        if count == 0 {
            return;
        }
        let new_index = self.cursor as i32 + delta;
        self.cursor = new_index.clamp(0, count as i32 - 1) as usize;
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.token_count().saturating_sub(1);
    }

    /// Opens the picker for the token under the cursor, preloaded with the
    /// pending replacement if one exists, else the token's normalized color.
    pub fn open_picker(&mut self) {
        let Some(token) = self.selected_token() else {
            return;
        };
        let initial = match self.session.replacement_for(token) {
            Some(hex) => hex.to_string(),
            None => palette::normalize(token),
        };
        self.picker = Some(PickerState::new(token.to_string(), &initial));
    }

    /// Records a confirmed pick from the picker dialog.
    pub fn record_replacement(&mut self, token: &str, hex: &str) {
        match self.session.select_replacement(token, hex) {
            Ok(()) => self.set_message(format!("{} -> {}", token, hex)),
            Err(e) => {
                self.dialog = Some(Dialog::error(format!("Could not record replacement: {}", e)));
            }
        }
    }

    /// Drops the pending replacement on the cursor row, if any.
    pub fn clear_selected(&mut self) {
        let Some(token) = self.selected_token().map(|t| t.to_string()) else {
            return;
        };
        if self.session.clear_replacement(&token) {
            self.set_message(format!("Cleared replacement for {}", token));
        } else {
            self.set_message(format!("No pending replacement for {}", token));
        }
    }

    /// Quit request from the list screen. Returns true when the app should
    /// exit immediately; pending replacements get a confirm dialog instead.
    pub fn request_quit(&mut self) -> bool {
        if !self.session.has_pending() {
            return true;
        }
        let n = self.session.pending_count();
        let noun = if n == 1 { "replacement" } else { "replacements" };
        self.dialog = Some(Dialog::confirm_quit(format!(
            "Discard {} pending {}?",
            n, noun
        )));
        false
    }

    /// Save request. Returns true when the app should exit immediately
    /// (nothing to write); otherwise a dialog reports the outcome.
    pub fn request_save(&mut self) -> bool {
        match self.session.save(&self.settings.output_suffix) {
            Ok(None) => true,
            Ok(Some(path)) => {
                self.saved_path = Some(path.clone());
                self.dialog = Some(Dialog::saved(format!(
                    "Modified file saved as:\n{}",
                    path.display()
                )));
                false
            }
            Err(e) => {
                self.dialog = Some(Dialog::error(format!("Save failed: {}", e)));
                false
            }
        }
    }

    /// Switches between the built-in themes and persists the choice.
    pub fn toggle_theme(&mut self) {
        let next = if self.theme.name() == "dark" { "light" } else { "dark" };
        self.settings.theme.name = next.to_string();
        self.theme = Theme::load(next);
        match self.settings.save() {
            Ok(()) => self.set_message(format!("Theme: {}", next)),
            Err(e) => self.set_message(format!("Could not save settings: {}", e)),
        }
    }

    pub fn show_help(&mut self) {
        self.help_state.scroll_offset = 0;
        self.current_screen = Screen::Help;
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
        self.message_timer = 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dialogs::DialogType;

    fn app_for(text: &str) -> App {
        let session = EditSession::new(PathBuf::from("/tmp/t.css"), text.to_string());
        App::new(session, Settings::default())
    }

    #[test]
    fn test_cursor_clamps_to_token_range() {
        let mut app = app_for("#fff red #abc");
        assert_eq!(app.token_count(), 3);
        app.move_cursor(-5);
        assert_eq!(app.cursor, 0);
        app.move_cursor(10);
        assert_eq!(app.cursor, 2);
        app.cursor_to_start();
        assert_eq!(app.cursor, 0);
        app.cursor_to_end();
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_cursor_noop_on_empty_file() {
        let mut app = app_for("no colors here");
        app.move_cursor(1);
        assert_eq!(app.cursor, 0);
        assert!(app.selected_token().is_none());
    }

    #[test]
    fn test_open_picker_uses_normalized_token() {
        let mut app = app_for("color: red;");
        app.open_picker();
        let picker = app.picker.as_ref().expect("picker not opened");
        assert_eq!(picker.token, "red");
        assert_eq!(picker.current_hex(), "#ff0000");
    }

    #[test]
    fn test_open_picker_prefers_pending_replacement() {
        let mut app = app_for("color: red;");
        app.record_replacement("red", "#123456");
        app.open_picker();
        let picker = app.picker.as_ref().expect("picker not opened");
        assert_eq!(picker.current_hex(), "#123456");
    }

    #[test]
    fn test_quit_without_pending_exits_directly() {
        let mut app = app_for("color: red;");
        assert!(app.request_quit());
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_quit_with_pending_asks_first() {
        let mut app = app_for("color: red;");
        app.record_replacement("red", "#123456");
        assert!(!app.request_quit());
        assert!(matches!(
            app.dialog,
            Some(Dialog {
                dialog_type: DialogType::ConfirmQuit,
                ..
            })
        ));
    }

    #[test]
    fn test_save_with_no_replacements_exits_without_dialog() {
        let mut app = app_for("color: red;");
        assert!(app.request_save());
        assert!(app.dialog.is_none());
        assert!(app.saved_path.is_none());
    }
}
