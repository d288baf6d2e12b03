use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, StatusType},
    shared::theme::{ModernIcons, ModernTheme},
    widgets::{
        modern_block, visible_tail, ButtonVariant, ModernButton, ModernCard, ModernProgressBar,
        TextInput, TodoRow,
    },
};

/// Draw the main UI
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.current_theme().clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top bar
            Constraint::Min(0),    // Item list
            Constraint::Length(4), // Footer
        ])
        .split(f.size());

    draw_top_bar(f, chunks[0], app, &theme);
    draw_item_list(f, chunks[1], app, &theme);
    draw_footer(f, chunks[2], app, &theme);

    if app.config.show_help {
        draw_help_overlay(f, f.size(), app, &theme);
    }

    // The dialog sits above everything else
    if app.controller.dialog_open() {
        draw_add_dialog(f, f.size(), app, &theme);
    }
}

fn draw_top_bar(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let title = Paragraph::new(app.i18n.t("app.title"))
        .style(theme.bar_style())
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_item_list(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let items = app.controller.items();
    let block = modern_block(Some(app.i18n.t("list.title")), theme, !app.controller.dialog_open());
    let inner = block.inner(area);
    block.render(area, f.buffer_mut());

    if inner.height == 0 {
        return;
    }

    if items.is_empty() {
        let hint = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(app.i18n.t("list.empty"), theme.header_style())),
            Line::from(vec![
                Span::styled(ModernIcons::ADD, theme.key_style()),
                Span::styled(
                    format!(" {}", app.i18n.t("list.empty_hint")),
                    theme.secondary_text_style(),
                ),
            ]),
        ]);
        f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), inner);
        return;
    }

    // Last inner row is reserved for the completion bar
    let rows_height = inner.height.saturating_sub(1) as usize;
    let offset = scroll_offset(app.selected, rows_height);

    for (row, (index, item)) in items
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows_height)
        .enumerate()
    {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        TodoRow::new(item.text(), item.is_done, theme)
            .selected(index == app.selected)
            .render(row_area, f.buffer_mut());
    }

    let done = app.controller.done_count();
    let percentage = done as f64 / items.len() as f64 * 100.0;
    let label = format!("{}/{} {}", done, items.len(), app.i18n.t("list.completed"));
    let bar_area = Rect {
        x: inner.x,
        y: inner.y + inner.height - 1,
        width: inner.width,
        height: 1,
    };
    ModernProgressBar::new(percentage, theme)
        .label(&label)
        .render(bar_area, f.buffer_mut());
}

/// First visible row so that `selected` stays on screen
fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 || selected < height {
        0
    } else {
        selected + 1 - height
    }
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let key = |k: &'static str| Span::styled(k, theme.key_style());
    let label = |l: &str| Span::styled(format!(" {l}  "), theme.secondary_text_style());

    let keys = Line::from(vec![
        key("a"),
        label(app.i18n.t("controls.add")),
        key("Space"),
        label(app.i18n.t("controls.toggle")),
        key("j/k ↑↓"),
        label(app.i18n.t("controls.navigation")),
        key("?"),
        label(app.i18n.t("controls.help")),
        Span::styled("q", theme.danger_style()),
        label(app.i18n.t("controls.quit")),
    ]);

    // Status messages temporarily replace the theme line
    let second = match app.status_message {
        Some(ref msg) => {
            let style = match msg.message_type {
                StatusType::Success => theme.success_style(),
                StatusType::Info => theme.info_style(),
            };
            Line::from(vec![
                Span::styled(format!("{} ", ModernIcons::BULLET), style),
                Span::styled(msg.text.clone(), style),
            ])
        }
        None => Line::from(vec![
            Span::styled(app.i18n.t("controls.theme"), theme.secondary_text_style()),
            Span::styled(" t", theme.key_style()),
            Span::styled(format!(" ({})", app.config.theme_display()), theme.info_style()),
        ]),
    };
    let lines = vec![keys, second];

    ModernCard::new(Text::from(lines), theme).render(area, f.buffer_mut());
}

/// Fixed-size rectangle centered in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_add_dialog(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let popup_area = centered_rect(50, 10, area);
    f.render_widget(Clear, popup_area);

    let block = modern_block(Some(app.i18n.t("dialog.title")), theme, true);
    let inner = block.inner(popup_area);
    block.render(popup_area, f.buffer_mut());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Inline error
            Constraint::Min(0),
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    let draft = app.controller.draft_text();
    let error = app.controller.validation_error();

    TextInput::new(draft, app.i18n.t("dialog.label"), theme)
        .trailing_hint(app.i18n.t("dialog.clear"))
        .error(error)
        .render(chunks[0], f.buffer_mut());

    if error {
        let message = Line::from(vec![
            Span::styled(format!("{} ", ModernIcons::ERROR), theme.danger_style()),
            Span::styled(app.i18n.t("dialog.error"), Style::default().fg(theme.danger)),
        ]);
        f.render_widget(Paragraph::new(message), chunks[1]);
    }

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14), // Cancel
            Constraint::Length(1),
            Constraint::Length(14), // Save
        ])
        .split(chunks[3]);

    let cancel = format!("{} (Esc)", app.i18n.t("dialog.cancel"));
    let save = format!("{} (↵)", app.i18n.t("dialog.save"));
    ModernButton::new(&cancel, theme)
        .variant(ButtonVariant::Secondary)
        .render(buttons[1], f.buffer_mut());
    ModernButton::new(&save, theme).render(buttons[3], f.buffer_mut());

    // Cursor sits right after the visible part of the draft
    let field = chunks[0];
    if field.width > 2 && field.height > 2 {
        let visible = visible_tail(draft, (field.width - 3) as usize);
        f.set_cursor(field.x + 1 + visible.width() as u16, field.y + 1);
    }
}

fn draw_help_overlay(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let popup_area = centered_rect(52, 17, area);
    f.render_widget(Clear, popup_area);

    let binding = |keys: &'static str, what: &str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme.key_style()),
            Span::styled(what.to_string(), theme.secondary_text_style()),
        ])
    };

    let content = Text::from(vec![
        Line::from(Span::styled(app.i18n.t("help.list"), theme.header_style())),
        binding("a n +", app.i18n.t("controls.add")),
        binding("Space ↵ x", app.i18n.t("controls.toggle")),
        binding("X", app.i18n.t("controls.toggle_matching")),
        binding("j k ↑ ↓", app.i18n.t("controls.navigation")),
        binding("t", app.i18n.t("controls.theme")),
        binding("q Esc", app.i18n.t("controls.quit")),
        Line::from(""),
        Line::from(Span::styled(app.i18n.t("help.dialog"), theme.header_style())),
        binding("↵", app.i18n.t("dialog.save")),
        binding("Esc", app.i18n.t("dialog.cancel")),
        binding("Ctrl+U", app.i18n.t("dialog.clear")),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", ModernIcons::HELP, app.i18n.t("help.close")),
            theme.dimmed_style(),
        )),
    ]);

    ModernCard::new(content, theme)
        .title(app.i18n.t("help.title"))
        .focused(true)
        .render(popup_area, f.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol.as_str());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::for_tests(Config::default())
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(9, 5), 5);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 20, 8);
        let rect = centered_rect(50, 10, area);
        assert!(rect.width <= 18 && rect.height <= 6);
        assert_eq!(rect.x, (20 - rect.width) / 2);
    }

    #[test]
    fn test_empty_list_shows_hint() {
        let screen = render(&app());
        assert!(screen.contains("Todo"));
        assert!(screen.contains("Nothing to do yet."));
    }

    #[test]
    fn test_items_render_with_checkboxes() {
        let mut app = app();
        for text in ["Buy milk", "Walk dog"] {
            app.controller.open_add_dialog();
            app.controller.update_draft_text(text);
            app.controller.submit_add_dialog().unwrap();
        }
        let milk = app.controller.items()[0].clone();
        app.controller.toggle_done(&milk);

        let screen = render(&app);
        assert!(screen.contains("[x] Buy milk"));
        assert!(screen.contains("[ ] Walk dog"));
        assert!(screen.contains("1/2 completed"));
    }

    #[test]
    fn test_dialog_error_only_after_empty_submit() {
        let mut app = app();
        app.controller.open_add_dialog();
        let screen = render(&app);
        assert!(screen.contains("Add Todo"));
        assert!(!screen.contains("Todo cannot be empty"));

        let _ = app.controller.submit_add_dialog();
        let screen = render(&app);
        assert!(screen.contains("Todo cannot be empty"));
    }

    #[test]
    fn test_dialog_clear_hint_follows_draft() {
        let mut app = app();
        app.controller.open_add_dialog();
        assert!(!render(&app).contains("Ctrl+U clear"));

        app.controller.update_draft_text("milk");
        let screen = render(&app);
        assert!(screen.contains("milk"));
        assert!(screen.contains("Ctrl+U clear"));
    }

    #[test]
    fn test_help_overlay_lists_matching_toggle() {
        let mut app = app();
        app.config.show_help = true;
        let screen = render(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
        assert!(screen.contains("toggle all equal items"));
    }

    #[test]
    fn test_draw_survives_small_terminals() {
        let mut app = app();
        for text in ["우유 사기", "e\u{301}clair", "Walk dog"] {
            app.controller.open_add_dialog();
            app.controller.update_draft_text(text);
            app.controller.submit_add_dialog().unwrap();
        }
        app.config.show_help = true;
        app.controller.open_add_dialog();
        let _ = app.controller.submit_add_dialog();
        assert!(app.controller.validation_error());

        for width in 0..40 {
            for height in 0..25 {
                let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
                terminal.draw(|f| draw(f, &app)).unwrap();
            }
        }
    }
}
