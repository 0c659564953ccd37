use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::view::ScorePanel;

/// Renders the one-row score panel: high score left, score right, message centred.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, panel: &ScorePanel) {
    let style = Style::new().bg(panel.style.bg).fg(panel.style.fg);

    frame.render_widget(
        Paragraph::new(panel_line(panel, usize::from(area.width))).style(style),
        area,
    );
}

/// Lays out the panel text to exactly `width` display columns when it fits.
///
/// The message is truncated first; the score labels are only cut by the
/// paragraph itself on very narrow terminals.
#[must_use]
pub fn panel_line(panel: &ScorePanel, width: usize) -> Line<'static> {
    let left = format!(" {} ", panel.high_score);
    let right = format!(" {} ", panel.score);

    let free = width.saturating_sub(left.width() + right.width());
    let message = truncate_to_width(&panel.message, free);
    let spare = free - message.width();
    let pad_left = spare / 2;
    let pad_right = spare - pad_left;

    Line::from(vec![
        Span::raw(left),
        Span::raw(" ".repeat(pad_left)),
        Span::raw(message),
        Span::raw(" ".repeat(pad_right)),
        Span::raw(right),
    ])
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }

    out
}
