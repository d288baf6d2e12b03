use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::shared::theme::{ModernIcons, ModernTheme, ProgressChars};

/// Helper function to render text with proper Unicode support
/// Returns the number of columns (visual width) consumed
fn render_text_unicode_aware(
    text: &str,
    buf: &mut Buffer,
    x: u16,
    y: u16,
    max_x: u16,
    style: Style,
) -> u16 {
    let mut current_x = x;

    for grapheme in text.graphemes(true) {
        let width = grapheme.width();

        if current_x + width as u16 > max_x {
            break;
        }

        let cell = buf.get_mut(current_x, y);
        cell.set_symbol(grapheme);
        cell.set_style(style);

        current_x += width as u16;

        // For zero-width graphemes, ensure we advance at least one position
        if width == 0 && current_x == x {
            current_x += 1;
        }
    }

    current_x - x
}

/// Bordered card with a title and wrapped content
pub struct ModernCard<'a> {
    title: Option<&'a str>,
    content: Text<'a>,
    theme: &'a ModernTheme,
    focused: bool,
}

impl<'a> ModernCard<'a> {
    pub fn new(content: Text<'a>, theme: &'a ModernTheme) -> Self {
        Self {
            title: None,
            content,
            theme,
            focused: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for ModernCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = modern_block(self.title, self.theme, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.content)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Single-row completion bar with a centered label
pub struct ModernProgressBar<'a> {
    percentage: f64,
    label: Option<&'a str>,
    theme: &'a ModernTheme,
}

impl<'a> ModernProgressBar<'a> {
    pub fn new(percentage: f64, theme: &'a ModernTheme) -> Self {
        Self {
            percentage: percentage.clamp(0.0, 100.0),
            label: None,
            theme,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }
}

impl<'a> Widget for ModernProgressBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let progress_style = self.theme.progress_style_for_percentage(self.percentage);

        let progress_width = area.width as f64 * (self.percentage / 100.0);
        let filled_chars = progress_width.floor() as u16;
        let remaining_width = progress_width - filled_chars as f64;

        for x in 0..area.width {
            let cell = buf.get_mut(area.x + x, area.y);

            if x < filled_chars {
                cell.set_char(ProgressChars::FILLED);
                cell.set_style(progress_style);
            } else if x == filled_chars && remaining_width > 0.5 {
                cell.set_char(ProgressChars::PARTIAL);
                cell.set_style(progress_style);
            } else {
                cell.set_char(ProgressChars::EMPTY);
                cell.set_style(self.theme.secondary_text_style());
            }
        }

        let overlay_text = match self.label {
            Some(label) => format!("{} {:.0}%", label, self.percentage),
            None => format!("{:.0}%", self.percentage),
        };

        let text_width = overlay_text.width();
        if text_width <= area.width as usize {
            let x_offset = (area.width as usize - text_width) / 2;
            render_text_unicode_aware(
                &overlay_text,
                buf,
                area.x + x_offset as u16,
                area.y,
                area.x + area.width,
                Style::default().fg(self.theme.text_primary),
            );
        }
    }
}

/// One row of the todo list: checkbox followed by the item text
pub struct TodoRow<'a> {
    text: &'a str,
    done: bool,
    selected: bool,
    theme: &'a ModernTheme,
}

impl<'a> TodoRow<'a> {
    pub fn new(text: &'a str, done: bool, theme: &'a ModernTheme) -> Self {
        Self {
            text,
            done,
            selected: false,
            theme,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for TodoRow<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let max_x = area.x + area.width;
        let base_style = if self.selected {
            self.theme.selected_style()
        } else {
            Style::default().fg(self.theme.text_primary)
        };

        if self.selected {
            for x in area.x..max_x {
                buf.get_mut(x, area.y).set_style(base_style);
            }
        }

        let mut x = area.x;
        let marker = if self.selected {
            ModernIcons::ARROW_RIGHT
        } else {
            " "
        };
        x += render_text_unicode_aware(marker, buf, x, area.y, max_x, base_style);
        x += render_text_unicode_aware(" ", buf, x, area.y, max_x, base_style);

        let box_style = if self.done {
            base_style.patch(self.theme.success_style())
        } else {
            base_style
        };
        x += render_text_unicode_aware(checkbox_icon(self.done), buf, x, area.y, max_x, box_style);
        x += render_text_unicode_aware(" ", buf, x, area.y, max_x, base_style);

        let text_style = if self.done {
            base_style.patch(self.theme.dimmed_style())
        } else {
            base_style
        };
        let available = max_x.saturating_sub(x) as usize;
        let shown = format_item_text(self.text, available);
        render_text_unicode_aware(&shown, buf, x, area.y, max_x, text_style);
    }
}

/// Bordered single-line text field
pub struct TextInput<'a> {
    value: &'a str,
    label: &'a str,
    trailing_hint: Option<&'a str>,
    error: bool,
    theme: &'a ModernTheme,
}

impl<'a> TextInput<'a> {
    pub fn new(value: &'a str, label: &'a str, theme: &'a ModernTheme) -> Self {
        Self {
            value,
            label,
            trailing_hint: None,
            error: false,
            theme,
        }
    }

    /// Hint drawn on the right border, only while the value is non-empty
    pub fn trailing_hint(mut self, hint: &'a str) -> Self {
        self.trailing_hint = Some(hint);
        self
    }

    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }
}

impl<'a> Widget for TextInput<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.error {
            self.theme.danger_style()
        } else {
            self.theme.border_focused_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Keep one column free for the cursor
        let visible = visible_tail(self.value, inner.width.saturating_sub(1) as usize);
        render_text_unicode_aware(
            visible,
            buf,
            inner.x,
            inner.y,
            inner.x + inner.width,
            Style::default().fg(self.theme.text_primary),
        );

        if let Some(hint) = self.trailing_hint.filter(|_| !self.value.is_empty()) {
            let hint_width = hint.width() as u16;
            if hint_width + 2 < area.width {
                let x = area.x + area.width - hint_width - 1;
                render_text_unicode_aware(
                    hint,
                    buf,
                    x,
                    area.y + area.height.saturating_sub(1),
                    x + hint_width,
                    self.theme.secondary_text_style(),
                );
            }
        }
    }
}

/// Filled button with centered text
pub struct ModernButton<'a> {
    text: &'a str,
    theme: &'a ModernTheme,
    variant: ButtonVariant,
}

#[derive(Clone, Copy)]
pub enum ButtonVariant {
    Primary,
    Secondary,
}

impl<'a> ModernButton<'a> {
    pub fn new(text: &'a str, theme: &'a ModernTheme) -> Self {
        Self {
            text,
            theme,
            variant: ButtonVariant::Primary,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }
}

impl<'a> Widget for ModernButton<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let button_style = match self.variant {
            ButtonVariant::Primary => Style::default()
                .fg(self.theme.text_primary)
                .bg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Secondary => Style::default().fg(self.theme.accent),
        };

        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let cell = buf.get_mut(x, y);
                cell.set_char(' ');
                cell.set_style(button_style);
            }
        }

        let text_width = self.text.width();
        if text_width <= area.width as usize {
            let x_offset = (area.width as usize - text_width) / 2;
            let y_offset = area.height / 2;

            render_text_unicode_aware(
                self.text,
                buf,
                area.x + x_offset as u16,
                area.y + y_offset,
                area.x + area.width,
                button_style,
            );
        }
    }
}

/// Helper function to create a styled block
pub fn modern_block<'a>(
    title: Option<&'a str>,
    theme: &'a ModernTheme,
    focused: bool,
) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        });

    if let Some(title) = title {
        block = block.title(title);
    }

    block
}

/// Checkbox glyph for the done flag
pub fn checkbox_icon(done: bool) -> &'static str {
    if done {
        ModernIcons::CHECKED
    } else {
        ModernIcons::UNCHECKED
    }
}

/// Truncate item text to `max_width` columns, ending in "..." when cut.
/// Works on grapheme clusters so wide characters are never split.
pub fn format_item_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let target_width = max_width.saturating_sub(ellipsis.width());
    let mut result = String::new();
    let mut current_width = 0;

    for grapheme in text.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > target_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }

    if max_width >= ellipsis.width() {
        result.push_str(ellipsis);
    }
    result
}

/// Longest suffix of `text` that fits in `max_width` columns
pub fn visible_tail(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();

    for (idx, grapheme) in text.grapheme_indices(true).rev() {
        let grapheme_width = grapheme.width();
        if width + grapheme_width > max_width {
            break;
        }
        width += grapheme_width;
        start = idx;
    }

    &text[start..]
}

/// Remove the last grapheme cluster, returning the shortened string
pub fn without_last_grapheme(text: &str) -> String {
    match text.grapheme_indices(true).next_back() {
        Some((idx, _)) => text[..idx].to_string(),
        None => String::new(),
    }
}
