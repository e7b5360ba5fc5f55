use ratatui::style::{Color, Style};
use supports_color::Stream;

/// Default theme name used throughout the application
pub const DEFAULT_THEME_NAME: &str = "dark";

// ═══════════════════════════════════════════════════════════════════════════════
// Base palette
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct Palette {
    // Luminance-based (backgrounds / text)
    pub bg: Color,          // base background
    pub bg_alt: Color,      // alternate background (header, status bar)
    pub fg: Color,          // base text
    pub fg_dim: Color,      // dimmed text (secondary info)
    pub fg_strong: Color,   // emphasized text (titles)
    pub fg_inverse: Color,  // inverted text (selected rows)

    // Purpose-based accents
    pub accent: Color,      // informational accent (headers, prompts)
    pub shortcut: Color,    // shortcut keys
    pub positive: Color,    // success / pending-replacement marks
    pub highlight: Color,   // emphasis / warning / error
}

// ═══════════════════════════════════════════════════════════════════════════════
// State colors
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct StateColors {
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color list panel
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct ListColors {
    pub bg: Color,
    pub border: Color,
    pub title: Color,
    pub header_bg: Color,
    pub header_text: Color,
    pub token_text: Color,
    pub pending_text: Color,    // the "-> #hex" replacement column
    pub selected_bg: Color,
    pub selected_text: Color,
    pub empty_text: Color,      // "No HTML colors found."
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status bar
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct StatusBarColors {
    pub bg: Color,
    pub text: Color,
    pub text_dim: Color,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Function bar (bottom shortcut line)
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct FunctionBarColors {
    pub bg: Color,
    pub key: Color,
    pub label: Color,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Message line
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct MessageColors {
    pub bg: Color,
    pub text: Color,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Dialogs
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct DialogColors {
    pub bg: Color,
    pub border: Color,
    pub title: Color,

    pub text: Color,
    pub text_dim: Color,
    pub message_text: Color,

    pub input_text: Color,
    pub input_cursor_fg: Color,
    pub input_cursor_bg: Color,
    pub input_prompt: Color,

    pub button_text: Color,
    pub button_selected_bg: Color,
    pub button_selected_text: Color,

    pub help_key_text: Color,
    pub help_label_text: Color,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color picker dialog
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct PickerColors {
    pub label: Color,       // channel labels "R" "G" "B"
    pub fill: Color,        // filled part of a slider
    pub empty: Color,       // empty part of a slider
    pub value: Color,       // numeric channel values
    pub selected: Color,    // the active field marker
    pub error: Color,       // invalid hex input
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help screen
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct HelpColors {
    pub bg: Color,
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub section_title: Color,
    pub key_text: Color,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Theme
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
    pub state: StateColors,
    pub list: ListColors,
    pub status_bar: StatusBarColors,
    pub function_bar: FunctionBarColors,
    pub message: MessageColors,
    pub dialog: DialogColors,
    pub picker: PickerColors,
    pub help: HelpColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Load theme by name from ~/.huedit/themes/{name}.json
    /// Falls back to built-in theme if file not found
    pub fn load(name: &str) -> Self {
        if let Some(theme) = super::theme_loader::load_theme(name) {
            return theme;
        }
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            _ => Self::dark(),
        }
    }

    /// Check if terminal supports true color (24-bit RGB)
    pub fn supports_true_color() -> bool {
        if let Some(support) = supports_color::on(Stream::Stdout) {
            support.has_16m
        } else {
            false
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        let palette = Palette {
            bg: Color::Indexed(234),
            bg_alt: Color::Indexed(236),
            fg: Color::Indexed(250),
            fg_dim: Color::Indexed(244),
            fg_strong: Color::Indexed(255),
            fg_inverse: Color::Indexed(234),
            accent: Color::Indexed(75),
            shortcut: Color::Indexed(74),
            positive: Color::Indexed(78),
            highlight: Color::Indexed(204),
        };

        let state = StateColors {
            success: Color::Indexed(78),
            warning: Color::Indexed(214),
            error: Color::Indexed(204),
            info: Color::Indexed(75),
        };

        let list = ListColors {
            bg: Color::Indexed(234),
            border: Color::Indexed(240),
            title: Color::Indexed(255),
            header_bg: Color::Indexed(236),
            header_text: Color::Indexed(248),
            token_text: Color::Indexed(250),
            pending_text: Color::Indexed(78),
            selected_bg: Color::Indexed(24),
            selected_text: Color::Indexed(255),
            empty_text: Color::Indexed(244),
        };

        let status_bar = StatusBarColors {
            bg: Color::Indexed(236),
            text: Color::Indexed(250),
            text_dim: Color::Indexed(244),
        };

        let function_bar = FunctionBarColors {
            bg: Color::Indexed(234),
            key: Color::Indexed(75),
            label: Color::Indexed(244),
        };

        let message = MessageColors {
            bg: Color::Indexed(234),
            text: Color::Indexed(214),
        };

        let dialog = DialogColors {
            bg: Color::Indexed(235),
            border: Color::Indexed(240),
            title: Color::Indexed(255),
            text: Color::Indexed(250),
            text_dim: Color::Indexed(244),
            message_text: Color::Indexed(250),
            input_text: Color::Indexed(255),
            input_cursor_fg: Color::Indexed(234),
            input_cursor_bg: Color::Indexed(255),
            input_prompt: Color::Indexed(75),
            button_text: Color::Indexed(250),
            button_selected_bg: Color::Indexed(24),
            button_selected_text: Color::Indexed(255),
            help_key_text: Color::Indexed(75),
            help_label_text: Color::Indexed(244),
        };

        let picker = PickerColors {
            label: Color::Indexed(248),
            fill: Color::Indexed(75),
            empty: Color::Indexed(238),
            value: Color::Indexed(255),
            selected: Color::Indexed(214),
            error: Color::Indexed(204),
        };

        let help = HelpColors {
            bg: Color::Indexed(235),
            border: Color::Indexed(240),
            title: Color::Indexed(255),
            text: Color::Indexed(250),
            section_title: Color::Indexed(75),
            key_text: Color::Indexed(214),
        };

        Self {
            name: "dark".to_string(),
            palette,
            state,
            list,
            status_bar,
            function_bar,
            message,
            dialog,
            picker,
            help,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        let palette = Palette {
            bg: Color::Indexed(255),
            bg_alt: Color::Indexed(254),
            fg: Color::Indexed(238),
            fg_dim: Color::Indexed(246),
            fg_strong: Color::Indexed(232),
            fg_inverse: Color::Indexed(255),
            accent: Color::Indexed(25),
            shortcut: Color::Indexed(31),
            positive: Color::Indexed(28),
            highlight: Color::Indexed(161),
        };

        let state = StateColors {
            success: Color::Indexed(28),
            warning: Color::Indexed(130),
            error: Color::Indexed(161),
            info: Color::Indexed(25),
        };

        let list = ListColors {
            bg: Color::Indexed(255),
            border: Color::Indexed(250),
            title: Color::Indexed(232),
            header_bg: Color::Indexed(253),
            header_text: Color::Indexed(242),
            token_text: Color::Indexed(238),
            pending_text: Color::Indexed(28),
            selected_bg: Color::Indexed(25),
            selected_text: Color::Indexed(231),
            empty_text: Color::Indexed(246),
        };

        let status_bar = StatusBarColors {
            bg: Color::Indexed(253),
            text: Color::Indexed(240),
            text_dim: Color::Indexed(248),
        };

        let function_bar = FunctionBarColors {
            bg: Color::Indexed(255),
            key: Color::Indexed(25),
            label: Color::Indexed(246),
        };

        let message = MessageColors {
            bg: Color::Indexed(255),
            text: Color::Indexed(130),
        };

        let dialog = DialogColors {
            bg: Color::Indexed(254),
            border: Color::Indexed(248),
            title: Color::Indexed(232),
            text: Color::Indexed(238),
            text_dim: Color::Indexed(246),
            message_text: Color::Indexed(238),
            input_text: Color::Indexed(232),
            input_cursor_fg: Color::Indexed(255),
            input_cursor_bg: Color::Indexed(238),
            input_prompt: Color::Indexed(25),
            button_text: Color::Indexed(238),
            button_selected_bg: Color::Indexed(25),
            button_selected_text: Color::Indexed(231),
            help_key_text: Color::Indexed(25),
            help_label_text: Color::Indexed(246),
        };

        let picker = PickerColors {
            label: Color::Indexed(242),
            fill: Color::Indexed(25),
            empty: Color::Indexed(252),
            value: Color::Indexed(232),
            selected: Color::Indexed(130),
            error: Color::Indexed(161),
        };

        let help = HelpColors {
            bg: Color::Indexed(254),
            border: Color::Indexed(248),
            title: Color::Indexed(232),
            text: Color::Indexed(238),
            section_title: Color::Indexed(25),
            key_text: Color::Indexed(130),
        };

        Self {
            name: "light".to_string(),
            palette,
            state,
            list,
            status_bar,
            function_bar,
            message,
            dialog,
            picker,
            help,
        }
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.palette.fg_dim)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.list.selected_text)
            .bg(self.list.selected_bg)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.list.header_text)
            .bg(self.list.header_bg)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.status_bar.text).bg(self.status_bar.bg)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serializes the theme as the JSON format theme_loader reads back.
    pub fn to_json(&self) -> String {
        fn ci(color: Color) -> u8 {
            match color {
                Color::Indexed(i) => i,
                _ => 0,
            }
        }

        format!(
            r#"{{
  "name": "{}",
  "palette": {{
    "bg": {}, "bg_alt": {}, "fg": {}, "fg_dim": {}, "fg_strong": {}, "fg_inverse": {},
    "accent": {}, "shortcut": {}, "positive": {}, "highlight": {}
  }},
  "state": {{ "success": {}, "warning": {}, "error": {}, "info": {} }},
  "list": {{
    "bg": {}, "border": {}, "title": {}, "header_bg": {}, "header_text": {},
    "token_text": {}, "pending_text": {}, "selected_bg": {}, "selected_text": {}, "empty_text": {}
  }},
  "status_bar": {{ "bg": {}, "text": {}, "text_dim": {} }},
  "function_bar": {{ "bg": {}, "key": {}, "label": {} }},
  "message": {{ "bg": {}, "text": {} }},
  "dialog": {{
    "bg": {}, "border": {}, "title": {}, "text": {}, "text_dim": {}, "message_text": {},
    "input_text": {}, "input_cursor_fg": {}, "input_cursor_bg": {}, "input_prompt": {},
    "button_text": {}, "button_selected_bg": {}, "button_selected_text": {},
    "help_key_text": {}, "help_label_text": {}
  }},
  "picker": {{
    "label": {}, "fill": {}, "empty": {}, "value": {}, "selected": {}, "error": {}
  }},
  "help": {{
    "bg": {}, "border": {}, "title": {}, "text": {}, "section_title": {}, "key_text": {}
  }}
}}
"#,
            self.name,
            ci(self.palette.bg), ci(self.palette.bg_alt), ci(self.palette.fg),
            ci(self.palette.fg_dim), ci(self.palette.fg_strong), ci(self.palette.fg_inverse),
            ci(self.palette.accent), ci(self.palette.shortcut), ci(self.palette.positive),
            ci(self.palette.highlight),
            ci(self.state.success), ci(self.state.warning), ci(self.state.error), ci(self.state.info),
            ci(self.list.bg), ci(self.list.border), ci(self.list.title), ci(self.list.header_bg),
            ci(self.list.header_text), ci(self.list.token_text), ci(self.list.pending_text),
            ci(self.list.selected_bg), ci(self.list.selected_text), ci(self.list.empty_text),
            ci(self.status_bar.bg), ci(self.status_bar.text), ci(self.status_bar.text_dim),
            ci(self.function_bar.bg), ci(self.function_bar.key), ci(self.function_bar.label),
            ci(self.message.bg), ci(self.message.text),
            ci(self.dialog.bg), ci(self.dialog.border), ci(self.dialog.title), ci(self.dialog.text),
            ci(self.dialog.text_dim), ci(self.dialog.message_text), ci(self.dialog.input_text),
            ci(self.dialog.input_cursor_fg), ci(self.dialog.input_cursor_bg), ci(self.dialog.input_prompt),
            ci(self.dialog.button_text), ci(self.dialog.button_selected_bg),
            ci(self.dialog.button_selected_text), ci(self.dialog.help_key_text),
            ci(self.dialog.help_label_text),
            ci(self.picker.label), ci(self.picker.fill), ci(self.picker.empty),
            ci(self.picker.value), ci(self.picker.selected), ci(self.picker.error),
            ci(self.help.bg), ci(self.help.border), ci(self.help.title), ci(self.help.text),
            ci(self.help.section_title), ci(self.help.key_text),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_falls_back_to_builtin() {
        assert_eq!(Theme::load("light").name(), "light");
        assert_eq!(Theme::load("dark").name(), "dark");
    }

    #[test]
    fn test_to_json_contains_sections() {
        let json = Theme::dark().to_json();
        assert!(json.contains("\"name\": \"dark\""));
        assert!(json.contains("\"palette\""));
        assert!(json.contains("\"picker\""));
        assert!(json.contains("\"help\""));
    }

    #[test]
    fn test_to_json_is_valid_json() {
        let parsed: serde_json::Value =
            serde_json::from_str(&Theme::light().to_json()).expect("invalid theme JSON");
        assert_eq!(parsed["name"], "light");
    }
}
