use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{
    app::{App, Screen},
    color_list, dialogs, help, picker,
    theme::Theme,
};

const APP_TITLE: &str = concat!("HUEDIT v", env!("CARGO_PKG_VERSION"));

pub fn draw(frame: &mut Frame, app: &mut App) {
    // Clone theme to avoid borrow conflict with mutable app
    let theme = app.theme.clone();
    let area = frame.area();

    // Check if terminal is too large for ratatui buffer
    if (area.width as u32 * area.height as u32) > 65534 {
        let msg = Paragraph::new("Terminal too large. Please resize smaller.")
            .style(Style::default().fg(theme.message.text).add_modifier(Modifier::BOLD));
        let safe_rect = Rect::new(0, 0, area.width.min(80), 1);
        frame.render_widget(msg, safe_rect);
        return;
    }

    // Fill entire screen with background color first
    let background = Block::default().style(Style::default().bg(theme.palette.bg));
    frame.render_widget(background, area);

    match app.current_screen {
        Screen::ColorList => draw_list_screen(frame, app, area, &theme),
        Screen::Help => {
            draw_list_screen(frame, app, area, &theme);
            help::draw(frame, app, area, &theme);
        }
    }

    // Overlays are drawn on top of everything
    if let Some(ref state) = app.picker {
        picker::draw(frame, state, area, &theme, app.true_color);
    }
    if let Some(ref dialog) = app.dialog {
        dialogs::draw_dialog(frame, dialog, area, &theme);
    }

    // Update message timer
    if app.message_timer > 0 {
        app.message_timer -= 1;
        if app.message_timer == 0 {
            app.message = None;
        }
    }
}

fn draw_list_screen(frame: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    // Layout: list, status bar, function bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Color list
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Function bar / message
        ])
        .split(area);

    color_list::draw(frame, app, chunks[0], theme);
    draw_status_bar(frame, app, chunks[1], theme);
    draw_function_bar(frame, app, chunks[2], theme);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let left_text = app.session.source_path().display().to_string();

    let pending = app.session.pending_count();
    let right_text = if pending > 0 {
        format!("{} colors, {} pending", app.token_count(), pending)
    } else {
        format!("{} colors", app.token_count())
    };

    let padding = area
        .width
        .saturating_sub(left_text.width() as u16 + right_text.width() as u16 + 4)
        as usize;
    let status = Line::from(vec![
        Span::styled(format!(" {} ", left_text), theme.status_bar_style()),
        Span::styled(" ".repeat(padding), theme.status_bar_style()),
        Span::styled(format!(" {} ", right_text), theme.status_bar_style()),
    ]);

    frame.render_widget(Paragraph::new(status).style(theme.status_bar_style()), area);
}

fn draw_function_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    // Show message if present
    if let Some(ref msg) = app.message {
        let message = Paragraph::new(Span::styled(
            format!(" {} ", msg),
            Style::default().fg(theme.message.text).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(message, area);
        return;
    }

    let shortcuts: [(&str, &str); 6] = [
        ("Enter", "pick "),
        ("u", "clear "),
        ("s", "save "),
        ("h", "help "),
        ("t", "theme "),
        ("q", "quit"),
    ];

    let key_style = Style::default().fg(theme.function_bar.key);
    let label_style = Style::default().fg(theme.function_bar.label);

    let mut spans = Vec::new();
    for (key, label) in shortcuts {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(":", label_style));
        spans.push(Span::styled(label, label_style));
    }

    let shortcuts_width: usize = shortcuts.iter().map(|(k, l)| k.width() + 1 + l.width()).sum();
    let version_text = format!(" {}", APP_TITLE);
    let padding_width = (area.width as usize).saturating_sub(shortcuts_width + version_text.width());

    spans.push(Span::styled(" ".repeat(padding_width), theme.dim_style()));
    spans.push(Span::styled(version_text, theme.dim_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
