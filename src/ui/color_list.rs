use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::App;
use super::picker::swatch;
use super::theme::Theme;
use crate::services::palette;

const SWATCH_WIDTH: usize = 4;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let file_name = app
        .session
        .source_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.session.source_path().display().to_string());

    let block = Block::default()
        .title(format!(" {} ", file_name))
        .title_style(Style::default().fg(theme.list.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.list.border))
        .style(Style::default().bg(theme.list.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 20 {
        return;
    }

    let count = app.session.found_colors().len();
    if count == 0 {
        draw_empty_state(frame, inner, theme);
        return;
    }

    // Header row
    let token_col = app
        .session
        .found_colors()
        .iter()
        .map(|t| t.width())
        .max()
        .unwrap_or(0)
        .max("Token".len());
    let header = format!(
        "   {:<swatch$}  {:<token$}  Replacement",
        "Color",
        "Token",
        swatch = SWATCH_WIDTH + 1,
        token = token_col,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(header, theme.header_style())).style(theme.header_style()),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    // Visible window; remember the height so input handlers can page by it.
    let visible_rows = (inner.height - 1) as usize;
    app.visible_rows = visible_rows;
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible_rows {
        app.scroll_offset = app.cursor + 1 - visible_rows;
    }

    let scroll_offset = app.scroll_offset;
    let cursor = app.cursor;
    let end = (scroll_offset + visible_rows).min(count);
    for (row, idx) in (scroll_offset..end).enumerate() {
        let token = &app.session.found_colors()[idx];
        let y = inner.y + 1 + row as u16;
        let selected = idx == cursor;
        let line = token_row(app, token, token_col, selected, theme);
        let row_style = if selected {
            theme.selected_style()
        } else {
            Style::default().bg(theme.list.bg)
        };
        frame.render_widget(
            Paragraph::new(line).style(row_style),
            Rect::new(inner.x, y, inner.width, 1),
        );
    }

    // Scrollbar when the list overflows
    if count > visible_rows {
        let scrollbar_area = Rect::new(
            area.x + area.width - 1,
            area.y + 1,
            1,
            area.height.saturating_sub(2),
        );
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        let mut scrollbar_state = ScrollbarState::new(count.saturating_sub(visible_rows) + 1)
            .position(scroll_offset);
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

fn token_row<'a>(
    app: &App,
    token: &'a str,
    token_col: usize,
    selected: bool,
    theme: &Theme,
) -> Line<'a> {
    let marker = if selected { " ▶ " } else { "   " };
    let original = swatch(&palette::normalize(token), app.true_color);

    let text_style = if selected {
        Style::default().fg(theme.list.selected_text)
    } else {
        Style::default().fg(theme.list.token_text)
    };

    let mut spans = vec![
        Span::raw(marker),
        Span::styled(" ".repeat(SWATCH_WIDTH), Style::default().bg(original)),
        Span::raw("   "),
        Span::styled(format!("{:<width$}", token, width = token_col), text_style),
    ];

    if let Some(replacement) = app.session.replacement_for(token) {
        let chosen = swatch(replacement, app.true_color);
        let pending_style = if selected {
            Style::default().fg(theme.list.selected_text)
        } else {
            Style::default().fg(theme.list.pending_text)
        };
        spans.push(Span::styled(
            format!("  ->  {}  ", replacement),
            pending_style,
        ));
        spans.push(Span::styled(
            " ".repeat(SWATCH_WIDTH),
            Style::default().bg(chosen),
        ));
    }

    Line::from(spans)
}

fn draw_empty_state(frame: &mut Frame, inner: Rect, theme: &Theme) {
    let y = inner.y + inner.height / 2;
    frame.render_widget(
        Paragraph::new(Span::styled(
            "No HTML colors found.",
            Style::default().fg(theme.list.empty_text),
        ))
        .alignment(ratatui::layout::Alignment::Center),
        Rect::new(inner.x, y, inner.width, 1),
    );
    if y + 1 < inner.y + inner.height {
        frame.render_widget(
            Paragraph::new(Span::styled("Press q to quit.", theme.dim_style()))
                .alignment(ratatui::layout::Alignment::Center),
            Rect::new(inner.x, y + 1, inner.width, 1),
        );
    }
}
