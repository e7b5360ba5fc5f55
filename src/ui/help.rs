//! Help screen with scrolling support

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::app::App;
use super::theme::Theme;

/// Draw the help screen as a centered overlay
pub fn draw(frame: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let lines = build_help_content(theme);
    let total_lines = lines.len();

    // Dialog size (max 80% of screen, within bounds)
    let width = ((area.width as u32 * 80 / 100) as u16).clamp(44, 60);
    let height = ((area.height as u32 * 80 / 100) as u16).clamp(12, 30);
    if area.width < 44 || area.height < 10 {
        return;
    }

    let visible_height = (height.saturating_sub(2)) as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);

    app.help_state.visible_height = visible_height;
    app.help_state.max_scroll = max_scroll;
    app.help_state.scroll_offset = app.help_state.scroll_offset.min(max_scroll);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(theme.help.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.help.border))
        .style(Style::default().bg(theme.help.bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.help_state.scroll_offset as u16, 0));
    frame.render_widget(paragraph, dialog_area);

    if total_lines > visible_height {
        let scrollbar_area = Rect::new(
            dialog_area.x + dialog_area.width - 1,
            dialog_area.y + 1,
            1,
            dialog_area.height.saturating_sub(2),
        );
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        let mut scrollbar_state =
            ScrollbarState::new(max_scroll + 1).position(app.help_state.scroll_offset);
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// Handle keyboard input for the help screen
/// Returns true if the screen should be closed
pub fn handle_input(app: &mut App, code: KeyCode) -> bool {
    let state = &mut app.help_state;

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.scroll_offset < state.max_scroll {
                state.scroll_offset += 1;
            }
            false
        }
        KeyCode::PageUp => {
            let amount = state.visible_height.saturating_sub(1).max(1);
            state.scroll_offset = state.scroll_offset.saturating_sub(amount);
            false
        }
        KeyCode::PageDown => {
            let amount = state.visible_height.saturating_sub(1).max(1);
            state.scroll_offset = (state.scroll_offset + amount).min(state.max_scroll);
            false
        }
        KeyCode::Home => {
            state.scroll_offset = 0;
            false
        }
        KeyCode::End => {
            state.scroll_offset = state.max_scroll;
            false
        }
        // Any other key closes help
        _ => true,
    }
}

fn build_help_content(theme: &Theme) -> Vec<Line<'static>> {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme.help.section_title)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(
                format!("  {:<14}", key),
                Style::default().fg(theme.help.key_text),
            ),
            Span::styled(label, Style::default().fg(theme.help.text)),
        ])
    };

    vec![
        section(" Color list"),
        entry("Up/Down, j/k", "Move between colors"),
        entry("PgUp/PgDn", "Move one page"),
        entry("Home/End", "Jump to first / last color"),
        entry("Enter, Space", "Pick a replacement for the color"),
        entry("u, Delete", "Clear the pending replacement"),
        entry("s", "Save the modified file and exit"),
        entry("t", "Toggle dark / light theme"),
        entry("q, Esc", "Quit (asks when picks are pending)"),
        Line::from(""),
        section(" Picker dialog"),
        entry("Left/Right", "Adjust the active channel by 1"),
        entry("Shift+arrows", "Adjust by 16"),
        entry("Up/Down, Tab", "Switch between R, G, B and hex"),
        entry("0-9 a-f", "Type a hex value directly"),
        entry("Enter", "Apply the shown color"),
        entry("Esc", "Cancel without changes"),
        Line::from(""),
        section(" Saving"),
        entry("", "The output is written next to the"),
        entry("", "source as {name}-modified{ext};"),
        entry("", "the source file is never changed."),
    ]
}
