use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use serde::Deserialize;

use super::theme::*;

// ═══════════════════════════════════════════════════════════════════════════════
// JSON mirror structs (colors as 256-palette indexes)
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ThemeJson {
    pub name: String,
    #[serde(default)]
    pub palette: PaletteJson,
    #[serde(default)]
    pub state: StateColorsJson,
    #[serde(default)]
    pub list: ListColorsJson,
    #[serde(default)]
    pub status_bar: StatusBarColorsJson,
    #[serde(default)]
    pub function_bar: FunctionBarColorsJson,
    #[serde(default)]
    pub message: MessageColorsJson,
    #[serde(default)]
    pub dialog: DialogColorsJson,
    #[serde(default)]
    pub picker: PickerColorsJson,
    #[serde(default)]
    pub help: HelpColorsJson,
}

#[derive(Debug, Deserialize, Default)]
pub struct PaletteJson {
    #[serde(default = "default_234")]
    pub bg: u8,
    #[serde(default = "default_236")]
    pub bg_alt: u8,
    #[serde(default = "default_250")]
    pub fg: u8,
    #[serde(default = "default_244")]
    pub fg_dim: u8,
    #[serde(default = "default_255")]
    pub fg_strong: u8,
    #[serde(default = "default_234")]
    pub fg_inverse: u8,
    #[serde(default = "default_75")]
    pub accent: u8,
    #[serde(default = "default_74")]
    pub shortcut: u8,
    #[serde(default = "default_78")]
    pub positive: u8,
    #[serde(default = "default_204")]
    pub highlight: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct StateColorsJson {
    #[serde(default = "default_78")]
    pub success: u8,
    #[serde(default = "default_214")]
    pub warning: u8,
    #[serde(default = "default_204")]
    pub error: u8,
    #[serde(default = "default_75")]
    pub info: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListColorsJson {
    #[serde(default = "default_234")]
    pub bg: u8,
    #[serde(default = "default_240")]
    pub border: u8,
    #[serde(default = "default_255")]
    pub title: u8,
    #[serde(default = "default_236")]
    pub header_bg: u8,
    #[serde(default = "default_248")]
    pub header_text: u8,
    #[serde(default = "default_250")]
    pub token_text: u8,
    #[serde(default = "default_78")]
    pub pending_text: u8,
    #[serde(default = "default_24")]
    pub selected_bg: u8,
    #[serde(default = "default_255")]
    pub selected_text: u8,
    #[serde(default = "default_244")]
    pub empty_text: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct StatusBarColorsJson {
    #[serde(default = "default_236")]
    pub bg: u8,
    #[serde(default = "default_250")]
    pub text: u8,
    #[serde(default = "default_244")]
    pub text_dim: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct FunctionBarColorsJson {
    #[serde(default = "default_234")]
    pub bg: u8,
    #[serde(default = "default_75")]
    pub key: u8,
    #[serde(default = "default_244")]
    pub label: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct MessageColorsJson {
    #[serde(default = "default_234")]
    pub bg: u8,
    #[serde(default = "default_214")]
    pub text: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct DialogColorsJson {
    #[serde(default = "default_235")]
    pub bg: u8,
    #[serde(default = "default_240")]
    pub border: u8,
    #[serde(default = "default_255")]
    pub title: u8,
    #[serde(default = "default_250")]
    pub text: u8,
    #[serde(default = "default_244")]
    pub text_dim: u8,
    #[serde(default = "default_250")]
    pub message_text: u8,
    #[serde(default = "default_255")]
    pub input_text: u8,
    #[serde(default = "default_234")]
    pub input_cursor_fg: u8,
    #[serde(default = "default_255")]
    pub input_cursor_bg: u8,
    #[serde(default = "default_75")]
    pub input_prompt: u8,
    #[serde(default = "default_250")]
    pub button_text: u8,
    #[serde(default = "default_24")]
    pub button_selected_bg: u8,
    #[serde(default = "default_255")]
    pub button_selected_text: u8,
    #[serde(default = "default_75")]
    pub help_key_text: u8,
    #[serde(default = "default_244")]
    pub help_label_text: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct PickerColorsJson {
    #[serde(default = "default_248")]
    pub label: u8,
    #[serde(default = "default_75")]
    pub fill: u8,
    #[serde(default = "default_238")]
    pub empty: u8,
    #[serde(default = "default_255")]
    pub value: u8,
    #[serde(default = "default_214")]
    pub selected: u8,
    #[serde(default = "default_204")]
    pub error: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct HelpColorsJson {
    #[serde(default = "default_235")]
    pub bg: u8,
    #[serde(default = "default_240")]
    pub border: u8,
    #[serde(default = "default_255")]
    pub title: u8,
    #[serde(default = "default_250")]
    pub text: u8,
    #[serde(default = "default_75")]
    pub section_title: u8,
    #[serde(default = "default_214")]
    pub key_text: u8,
}

fn default_24() -> u8 { 24 }
fn default_74() -> u8 { 74 }
fn default_75() -> u8 { 75 }
fn default_78() -> u8 { 78 }
fn default_204() -> u8 { 204 }
fn default_214() -> u8 { 214 }
fn default_234() -> u8 { 234 }
fn default_235() -> u8 { 235 }
fn default_236() -> u8 { 236 }
fn default_238() -> u8 { 238 }
fn default_240() -> u8 { 240 }
fn default_244() -> u8 { 244 }
fn default_248() -> u8 { 248 }
fn default_250() -> u8 { 250 }
fn default_255() -> u8 { 255 }

// ═══════════════════════════════════════════════════════════════════════════════
// Conversion
// ═══════════════════════════════════════════════════════════════════════════════

fn ci(n: u8) -> Color {
    Color::Indexed(n)
}

/// Parses theme JSON text into a [`Theme`]. Returns `None` on malformed JSON
/// so callers can fall back to the built-ins.
pub fn parse_theme(content: &str) -> Option<Theme> {
    let json: ThemeJson = serde_json::from_str(content).ok()?;
    Some(theme_from_json(json))
}

fn theme_from_json(json: ThemeJson) -> Theme {
    let mut theme = Theme::dark();

    theme.palette = Palette {
        bg: ci(json.palette.bg),
        bg_alt: ci(json.palette.bg_alt),
        fg: ci(json.palette.fg),
        fg_dim: ci(json.palette.fg_dim),
        fg_strong: ci(json.palette.fg_strong),
        fg_inverse: ci(json.palette.fg_inverse),
        accent: ci(json.palette.accent),
        shortcut: ci(json.palette.shortcut),
        positive: ci(json.palette.positive),
        highlight: ci(json.palette.highlight),
    };

    theme.state = StateColors {
        success: ci(json.state.success),
        warning: ci(json.state.warning),
        error: ci(json.state.error),
        info: ci(json.state.info),
    };

    theme.list = ListColors {
        bg: ci(json.list.bg),
        border: ci(json.list.border),
        title: ci(json.list.title),
        header_bg: ci(json.list.header_bg),
        header_text: ci(json.list.header_text),
        token_text: ci(json.list.token_text),
        pending_text: ci(json.list.pending_text),
        selected_bg: ci(json.list.selected_bg),
        selected_text: ci(json.list.selected_text),
        empty_text: ci(json.list.empty_text),
    };

    theme.status_bar = StatusBarColors {
        bg: ci(json.status_bar.bg),
        text: ci(json.status_bar.text),
        text_dim: ci(json.status_bar.text_dim),
    };

    theme.function_bar = FunctionBarColors {
        bg: ci(json.function_bar.bg),
        key: ci(json.function_bar.key),
        label: ci(json.function_bar.label),
    };

    theme.message = MessageColors {
        bg: ci(json.message.bg),
        text: ci(json.message.text),
    };

    theme.dialog = DialogColors {
        bg: ci(json.dialog.bg),
        border: ci(json.dialog.border),
        title: ci(json.dialog.title),
        text: ci(json.dialog.text),
        text_dim: ci(json.dialog.text_dim),
        message_text: ci(json.dialog.message_text),
        input_text: ci(json.dialog.input_text),
        input_cursor_fg: ci(json.dialog.input_cursor_fg),
        input_cursor_bg: ci(json.dialog.input_cursor_bg),
        input_prompt: ci(json.dialog.input_prompt),
        button_text: ci(json.dialog.button_text),
        button_selected_bg: ci(json.dialog.button_selected_bg),
        button_selected_text: ci(json.dialog.button_selected_text),
        help_key_text: ci(json.dialog.help_key_text),
        help_label_text: ci(json.dialog.help_label_text),
    };

    theme.picker = PickerColors {
        label: ci(json.picker.label),
        fill: ci(json.picker.fill),
        empty: ci(json.picker.empty),
        value: ci(json.picker.value),
        selected: ci(json.picker.selected),
        error: ci(json.picker.error),
    };

    theme.help = HelpColors {
        bg: ci(json.help.bg),
        border: ci(json.help.border),
        title: ci(json.help.title),
        text: ci(json.help.text),
        section_title: ci(json.help.section_title),
        key_text: ci(json.help.key_text),
    };

    theme.name = json.name;
    theme
}

/// Loads a theme by name from ~/.huedit/themes/{name}.json
pub fn load_theme(name: &str) -> Option<Theme> {
    let path = theme_path(name)?;
    let content = fs::read_to_string(path).ok()?;
    parse_theme(&content)
}

fn theme_path(name: &str) -> Option<PathBuf> {
    // Theme names come from settings; refuse anything that could escape the
    // themes directory.
    if name.is_empty() || name.contains(['/', '\\', '\0']) || name.starts_with('.') {
        return None;
    }
    let dir = crate::config::Settings::themes_dir()?;
    Some(dir.join(format!("{}.json", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_from_builtin() {
        let theme = parse_theme(&Theme::light().to_json()).expect("parse failed");
        assert_eq!(theme.name(), "light");
        assert_eq!(theme.palette.bg, Color::Indexed(255));
        assert_eq!(theme.list.selected_bg, Color::Indexed(25));
    }

    #[test]
    fn test_parse_partial_json_falls_back_to_defaults() {
        let theme = parse_theme(r#"{"name":"custom","palette":{"accent":99}}"#)
            .expect("parse failed");
        assert_eq!(theme.name(), "custom");
        assert_eq!(theme.palette.accent, Color::Indexed(99));
        // Untouched sections keep the dark defaults.
        assert_eq!(theme.palette.bg, Color::Indexed(234));
        assert_eq!(theme.picker.fill, Color::Indexed(75));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_theme("not json").is_none());
        assert!(parse_theme(r#"{"palette":{}}"#).is_none()); // missing name
    }

    #[test]
    fn test_theme_path_rejects_traversal() {
        assert!(theme_path("../evil").is_none());
        assert!(theme_path("a/b").is_none());
        assert!(theme_path("").is_none());
    }
}
