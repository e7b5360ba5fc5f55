//! Modal color-picker dialog.
//!
//! Three channel sliders plus a hex input field, kept in sync both ways:
//! adjusting a slider rewrites the hex field, typing a valid hex value moves
//! the sliders. Enter confirms the pick, Esc cancels without recording
//! anything.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialogs::dialog_rect;
use super::theme::Theme;
use crate::services::palette;

const SLIDER_WIDTH: u16 = 24;
const COARSE_STEP: i16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerField {
    Red,
    Green,
    Blue,
    Hex,
}

impl PickerField {
    fn next(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Blue,
            Self::Blue => Self::Hex,
            Self::Hex => Self::Red,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Red => Self::Hex,
            Self::Green => Self::Red,
            Self::Blue => Self::Green,
            Self::Hex => Self::Blue,
        }
    }
}

/// What a key press did to the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Cancel,
    Apply,
}

#[derive(Debug, Clone)]
pub struct PickerState {
    pub token: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub field: PickerField,
    pub hex_input: String,
    pub hex_valid: bool,
}

impl PickerState {
    /// `initial` is expected to be a normalized hex value; anything else
    /// falls back to white, mirroring normalization.
    pub fn new(token: String, initial: &str) -> Self {
        let (r, g, b) = palette::hex_to_rgb(initial).unwrap_or((255, 255, 255));
        let mut state = Self {
            token,
            r,
            g,
            b,
            field: PickerField::Red,
            hex_input: String::new(),
            hex_valid: true,
        };
        state.sync_hex_from_channels();
        state
    }

    /// The current choice as lowercase `#rrggbb`.
    pub fn current_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn sync_hex_from_channels(&mut self) {
        self.hex_input = self.current_hex();
        self.hex_valid = true;
    }

    fn sync_channels_from_hex(&mut self) {
        match palette::hex_to_rgb(&self.hex_input) {
            Some((r, g, b)) => {
                self.r = r;
                self.g = g;
                self.b = b;
                self.hex_valid = true;
            }
            None => self.hex_valid = false,
        }
    }

    fn adjust_channel(&mut self, delta: i16) {
        let channel = match self.field {
            PickerField::Red => &mut self.r,
            PickerField::Green => &mut self.g,
            PickerField::Blue => &mut self.b,
            PickerField::Hex => return,
        };
        *channel = (*channel as i16 + delta).clamp(0, 255) as u8;
        self.sync_hex_from_channels();
    }

    fn push_hex_char(&mut self, c: char) {
        if self.hex_input.len() >= 7 {
            return;
        }
        if c == '#' && !self.hex_input.is_empty() {
            return;
        }
        if c != '#' && !c.is_ascii_hexdigit() {
            return;
        }
        self.hex_input.push(c.to_ascii_lowercase());
        self.sync_channels_from_hex();
    }

    fn pop_hex_char(&mut self) {
        self.hex_input.pop();
        self.sync_channels_from_hex();
    }
}

pub fn handle_input(state: &mut PickerState, code: KeyCode, modifiers: KeyModifiers) -> PickerAction {
    let step = if modifiers.contains(KeyModifiers::SHIFT) {
        COARSE_STEP
    } else {
        1
    };

    match code {
        KeyCode::Esc => return PickerAction::Cancel,
        KeyCode::Enter => {
            // Refuse to apply while the hex field holds garbage.
            if state.hex_valid {
                return PickerAction::Apply;
            }
        }
        KeyCode::Up | KeyCode::BackTab => state.field = state.field.prev(),
        KeyCode::Down | KeyCode::Tab => state.field = state.field.next(),
        KeyCode::Left => state.adjust_channel(-step),
        KeyCode::Right => state.adjust_channel(step),
        KeyCode::Backspace if state.field == PickerField::Hex => state.pop_hex_char(),
        KeyCode::Char(c) if state.field == PickerField::Hex => state.push_hex_char(c),
        _ => {}
    }
    PickerAction::None
}

pub fn draw(frame: &mut Frame, state: &PickerState, area: Rect, theme: &Theme, true_color: bool) {
    let rect = dialog_rect(area, 50, 13);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Pick a new color ")
        .title_style(Style::default().fg(theme.dialog.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog.border))
        .style(Style::default().bg(theme.dialog.bg));

    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.height < 10 || inner.width < 30 {
        return;
    }

    // Token line: the original spelling plus its normalized value.
    let original_hex = palette::normalize(&state.token);
    let token_line = Line::from(vec![
        Span::styled(" Token: ", Style::default().fg(theme.dialog.text_dim)),
        Span::styled(
            state.token.clone(),
            Style::default().fg(theme.dialog.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({})", original_hex),
            Style::default().fg(theme.dialog.text_dim),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(token_line),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    // Preview band: original color on the left, the current pick on the right.
    let old_color = swatch(&original_hex, true_color);
    let new_color = swatch(&state.current_hex(), true_color);
    let half = (inner.width.saturating_sub(4) / 2) as usize;
    let preview = Line::from(vec![
        Span::raw("  "),
        Span::styled(" ".repeat(half), Style::default().bg(old_color)),
        Span::styled(" ".repeat(half), Style::default().bg(new_color)),
    ]);
    for dy in 0..2 {
        frame.render_widget(
            Paragraph::new(preview.clone()),
            Rect::new(inner.x, inner.y + 2 + dy, inner.width, 1),
        );
    }

    // Channel sliders.
    let channels = [
        (PickerField::Red, "R", state.r),
        (PickerField::Green, "G", state.g),
        (PickerField::Blue, "B", state.b),
    ];
    for (i, &(field, label, value)) in channels.iter().enumerate() {
        let y = inner.y + 5 + i as u16;
        frame.render_widget(
            Paragraph::new(slider_line(field, label, value, state.field, theme)),
            Rect::new(inner.x, y, inner.width, 1),
        );
    }

    // Hex input field.
    let hex_selected = state.field == PickerField::Hex;
    let marker_style = Style::default().fg(theme.picker.selected).add_modifier(Modifier::BOLD);
    let value_style = if state.hex_valid {
        Style::default().fg(theme.dialog.input_text)
    } else {
        Style::default().fg(theme.picker.error)
    };
    let mut hex_spans = vec![
        Span::styled(
            if hex_selected { "▶" } else { " " },
            marker_style,
        ),
        Span::styled(" Hex ", Style::default().fg(theme.picker.label)),
        Span::styled(state.hex_input.clone(), value_style),
    ];
    if hex_selected {
        hex_spans.push(Span::styled(
            " ",
            Style::default()
                .fg(theme.dialog.input_cursor_fg)
                .bg(theme.dialog.input_cursor_bg),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(hex_spans)),
        Rect::new(inner.x, inner.y + 9, inner.width, 1),
    );

    // Help line.
    let key_style = Style::default().fg(theme.dialog.help_key_text);
    let label_style = Style::default().fg(theme.dialog.help_label_text);
    let help = Line::from(vec![
        Span::styled(" ←/→", key_style),
        Span::styled(" adjust  ", label_style),
        Span::styled("Shift", key_style),
        Span::styled(" ±16  ", label_style),
        Span::styled("↑/↓", key_style),
        Span::styled(" field  ", label_style),
        Span::styled("Enter", key_style),
        Span::styled(" apply  ", label_style),
        Span::styled("Esc", key_style),
        Span::styled(" cancel", label_style),
    ]);
    frame.render_widget(
        Paragraph::new(help),
        Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
    );
}

fn slider_line<'a>(
    field: PickerField,
    label: &'a str,
    value: u8,
    active: PickerField,
    theme: &Theme,
) -> Line<'a> {
    let selected = field == active;
    let marker_style = Style::default().fg(theme.picker.selected).add_modifier(Modifier::BOLD);
    let label_style = if selected {
        Style::default().fg(theme.picker.selected).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.picker.label)
    };

    let filled = (value as u16 * SLIDER_WIDTH / 255) as usize;
    let empty = SLIDER_WIDTH as usize - filled;

    Line::from(vec![
        Span::styled(if selected { "▶" } else { " " }, marker_style),
        Span::styled(format!(" {} ", label), label_style),
        Span::styled("█".repeat(filled), Style::default().fg(theme.picker.fill)),
        Span::styled("░".repeat(empty), Style::default().fg(theme.picker.empty)),
        Span::styled(
            format!(" {:>3}", value),
            Style::default().fg(theme.picker.value),
        ),
    ])
}

/// Swatch color honoring the terminal's color depth.
pub fn swatch(hex: &str, true_color: bool) -> ratatui::style::Color {
    use ratatui::style::Color;
    let (r, g, b) = palette::hex_to_rgb(hex).unwrap_or((255, 255, 255));
    if true_color {
        Color::Rgb(r, g, b)
    } else {
        // Nearest entry in the 6x6x6 color cube of the 256-color palette.
        let ri = (r as u16 * 5 / 255) as u8;
        let gi = (g as u16 * 5 / 255) as u8;
        let bi = (b as u16 * 5 / 255) as u8;
        Color::Indexed(16 + 36 * ri + 6 * gi + bi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PickerState {
        PickerState::new("red".to_string(), "#ff0000")
    }

    #[test]
    fn test_new_parses_initial_hex() {
        let s = state();
        assert_eq!((s.r, s.g, s.b), (255, 0, 0));
        assert_eq!(s.hex_input, "#ff0000");
        assert!(s.hex_valid);
    }

    #[test]
    fn test_adjust_clamps_at_bounds() {
        let mut s = state();
        handle_input(&mut s, KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(s.r, 255); // already at max
        handle_input(&mut s, KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(s.r, 254);
        handle_input(&mut s, KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(s.r, 238);
        assert_eq!(s.hex_input, "#ee0000");
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut s = state();
        handle_input(&mut s, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(s.field, PickerField::Green);
        handle_input(&mut s, KeyCode::Up, KeyModifiers::NONE);
        handle_input(&mut s, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(s.field, PickerField::Hex);
        handle_input(&mut s, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(s.field, PickerField::Red);
    }

    #[test]
    fn test_hex_typing_updates_channels() {
        let mut s = state();
        s.field = PickerField::Hex;
        for _ in 0..7 {
            handle_input(&mut s, KeyCode::Backspace, KeyModifiers::NONE);
        }
        for c in "#123456".chars() {
            handle_input(&mut s, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert!(s.hex_valid);
        assert_eq!((s.r, s.g, s.b), (0x12, 0x34, 0x56));
    }

    #[test]
    fn test_short_hex_is_valid() {
        let mut s = state();
        s.field = PickerField::Hex;
        s.hex_input.clear();
        for c in "#1af".chars() {
            handle_input(&mut s, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert!(s.hex_valid);
        assert_eq!((s.r, s.g, s.b), (0x11, 0xaa, 0xff));
    }

    #[test]
    fn test_enter_blocked_while_hex_invalid() {
        let mut s = state();
        s.field = PickerField::Hex;
        handle_input(&mut s, KeyCode::Backspace, KeyModifiers::NONE);
        assert!(!s.hex_valid);
        assert_eq!(
            handle_input(&mut s, KeyCode::Enter, KeyModifiers::NONE),
            PickerAction::None
        );
        // Restoring a full value unblocks Enter.
        handle_input(&mut s, KeyCode::Char('0'), KeyModifiers::NONE);
        assert!(s.hex_valid);
        assert_eq!(
            handle_input(&mut s, KeyCode::Enter, KeyModifiers::NONE),
            PickerAction::Apply
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut s = state();
        assert_eq!(
            handle_input(&mut s, KeyCode::Esc, KeyModifiers::NONE),
            PickerAction::Cancel
        );
    }

    #[test]
    fn test_rejects_non_hex_characters() {
        let mut s = state();
        s.field = PickerField::Hex;
        let before = s.hex_input.clone();
        handle_input(&mut s, KeyCode::Char('z'), KeyModifiers::NONE);
        handle_input(&mut s, KeyCode::Char('#'), KeyModifiers::NONE);
        assert_eq!(s.hex_input, before);
    }

    #[test]
    fn test_swatch_indexed_fallback() {
        use ratatui::style::Color;
        assert_eq!(swatch("#ff0000", true), Color::Rgb(255, 0, 0));
        assert_eq!(swatch("#000000", false), Color::Indexed(16));
        assert_eq!(swatch("#ffffff", false), Color::Indexed(231));
    }
}
