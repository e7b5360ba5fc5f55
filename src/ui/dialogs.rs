use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    ConfirmQuit,
    Saved,
    Error,
}

#[derive(Debug, Clone)]
pub struct Dialog {
    pub dialog_type: DialogType,
    pub message: String,
    pub selected_button: usize, // 0: Yes, 1: No
}

impl Dialog {
    pub fn confirm_quit(message: String) -> Self {
        Self {
            dialog_type: DialogType::ConfirmQuit,
            message,
            // Default to "No" so a double-tap on q cannot drop work.
            selected_button: 1,
        }
    }

    pub fn saved(message: String) -> Self {
        Self {
            dialog_type: DialogType::Saved,
            message,
            selected_button: 0,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            dialog_type: DialogType::Error,
            message,
            selected_button: 0,
        }
    }
}

/// Centered dialog rect clamped to the frame area.
pub fn dialog_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2)).max(1);
    let height = height.min(area.height.saturating_sub(2)).max(1);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

pub fn draw_dialog(frame: &mut Frame, dialog: &Dialog, area: Rect, theme: &Theme) {
    match dialog.dialog_type {
        DialogType::ConfirmQuit => {
            let rect = dialog_rect(area, 46, 7);
            frame.render_widget(Clear, rect);
            draw_confirm_dialog(frame, dialog, rect, theme, " Quit ");
        }
        DialogType::Saved => {
            let rect = dialog_rect(area, 60, 8);
            frame.render_widget(Clear, rect);
            draw_notice_dialog(frame, dialog, rect, theme, " Saved ");
        }
        DialogType::Error => {
            let rect = dialog_rect(area, 60, 8);
            frame.render_widget(Clear, rect);
            draw_notice_dialog(frame, dialog, rect, theme, " Error ");
        }
    }
}

fn draw_confirm_dialog(frame: &mut Frame, dialog: &Dialog, area: Rect, theme: &Theme, title: &str) {
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(theme.dialog.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog.border))
        .style(Style::default().bg(theme.dialog.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 || inner.width < 6 {
        return;
    }

    // Message
    let message_area = Rect::new(inner.x + 1, inner.y + 1, inner.width - 2, 1);
    frame.render_widget(
        Paragraph::new(dialog.message.clone())
            .style(Style::default().fg(theme.dialog.message_text))
            .alignment(ratatui::layout::Alignment::Center),
        message_area,
    );

    let selected_style = Style::default()
        .fg(theme.dialog.button_selected_text)
        .bg(theme.dialog.button_selected_bg);
    let normal_style = Style::default().fg(theme.dialog.button_text);

    let yes_style = if dialog.selected_button == 0 { selected_style } else { normal_style };
    let no_style = if dialog.selected_button == 1 { selected_style } else { normal_style };

    let buttons = Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(" Yes ", yes_style),
        Span::styled("    ", Style::default()),
        Span::styled(" No ", no_style),
        Span::styled("  ", Style::default()),
    ]);
    let button_area = Rect::new(inner.x + 1, inner.y + inner.height - 2, inner.width - 2, 1);
    frame.render_widget(
        Paragraph::new(buttons).alignment(ratatui::layout::Alignment::Center),
        button_area,
    );
}

/// Notice dialog with an OK button only (save confirmation, errors).
fn draw_notice_dialog(frame: &mut Frame, dialog: &Dialog, area: Rect, theme: &Theme, title: &str) {
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(theme.dialog.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog.border))
        .style(Style::default().bg(theme.dialog.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 4 || inner.width < 6 {
        return;
    }

    // Message (can be multi-line, wrapped)
    let message_area = Rect::new(inner.x + 1, inner.y + 1, inner.width - 2, inner.height - 3);
    frame.render_widget(
        Paragraph::new(dialog.message.clone())
            .style(Style::default().fg(theme.dialog.message_text))
            .wrap(Wrap { trim: true }),
        message_area,
    );

    let selected_style = Style::default()
        .fg(theme.dialog.button_selected_text)
        .bg(theme.dialog.button_selected_bg);
    let buttons = Line::from(vec![Span::styled(" OK ", selected_style)]);
    let button_area = Rect::new(inner.x + 1, inner.y + inner.height - 2, inner.width - 2, 1);
    frame.render_widget(
        Paragraph::new(buttons).alignment(ratatui::layout::Alignment::Center),
        button_area,
    );
}

/// Handles a key while a dialog is open. Returns true when the application
/// should exit.
pub fn handle_dialog_input(app: &mut App, code: KeyCode) -> bool {
    let Some(ref mut dialog) = app.dialog else {
        return false;
    };

    match dialog.dialog_type {
        DialogType::ConfirmQuit => match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                dialog.selected_button = 1 - dialog.selected_button;
                false
            }
            KeyCode::Enter => {
                let discard = dialog.selected_button == 0;
                app.dialog = None;
                discard
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.dialog = None;
                true
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.dialog = None;
                false
            }
            _ => false,
        },
        DialogType::Saved => match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                app.dialog = None;
                true
            }
            _ => false,
        },
        DialogType::Error => match code {
            KeyCode::Enter | KeyCode::Esc => {
                app.dialog = None;
                false
            }
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::session::EditSession;
    use std::path::PathBuf;

    fn app_with_dialog(dialog: Dialog) -> App {
        let session = EditSession::new(PathBuf::from("/tmp/t.css"), "red".to_string());
        let mut app = App::new(session, Settings::default());
        app.dialog = Some(dialog);
        app
    }

    #[test]
    fn test_confirm_quit_defaults_to_no() {
        let mut app = app_with_dialog(Dialog::confirm_quit("Discard?".to_string()));
        assert!(!handle_dialog_input(&mut app, KeyCode::Enter));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_confirm_quit_yes_exits() {
        let mut app = app_with_dialog(Dialog::confirm_quit("Discard?".to_string()));
        handle_dialog_input(&mut app, KeyCode::Left);
        let mut app2 = app_with_dialog(Dialog::confirm_quit("Discard?".to_string()));
        assert!(handle_dialog_input(&mut app2, KeyCode::Char('y')));

        // Toggled to Yes, Enter discards.
        assert!(matches!(app.dialog, Some(ref d) if d.selected_button == 0));
        assert!(handle_dialog_input(&mut app, KeyCode::Enter));
    }

    #[test]
    fn test_saved_dialog_exits_on_dismiss() {
        let mut app = app_with_dialog(Dialog::saved("Saved".to_string()));
        assert!(!handle_dialog_input(&mut app, KeyCode::Char('x')));
        assert!(handle_dialog_input(&mut app, KeyCode::Enter));
    }

    #[test]
    fn test_error_dialog_closes_without_exit() {
        let mut app = app_with_dialog(Dialog::error("boom".to_string()));
        assert!(!handle_dialog_input(&mut app, KeyCode::Enter));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_dialog_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = dialog_rect(area, 46, 7);
        assert_eq!(rect, Rect::new(27, 16, 46, 7));

        let tiny = Rect::new(0, 0, 10, 5);
        let clamped = dialog_rect(tiny, 46, 7);
        assert!(clamped.width <= 10 && clamped.height <= 5);
    }
}
