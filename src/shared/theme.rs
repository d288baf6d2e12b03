use ratatui::style::{Color, Modifier, Style};

use super::config::ThemeMode;

/// Color palette for the todo TUI
#[derive(Debug, Clone)]
pub struct ModernTheme {
    // Primary colors
    pub primary: Color,
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    /// Top bar background
    pub bar: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,

    // Interactive colors
    pub selected: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for ModernTheme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

impl ModernTheme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::Purple => Self::purple(),
        }
    }

    /// Dark theme with indigo accents
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(99, 102, 241), // Indigo-500
            accent: Color::Rgb(168, 85, 247),  // Purple-500

            success: Color::Rgb(34, 197, 94),  // Green-500
            warning: Color::Rgb(251, 191, 36), // Amber-500
            danger: Color::Rgb(239, 68, 68),   // Red-500
            info: Color::Rgb(59, 130, 246),    // Blue-500

            bar: Color::Rgb(55, 65, 81), // Gray-700

            text_primary: Color::Rgb(243, 244, 246), // Gray-100
            text_secondary: Color::Rgb(156, 163, 175), // Gray-400
            text_disabled: Color::Rgb(107, 114, 128), // Gray-500

            selected: Color::Rgb(99, 102, 241),
            border: Color::Rgb(75, 85, 99), // Gray-600
            border_focused: Color::Rgb(99, 102, 241),
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(79, 70, 229),
            accent: Color::Rgb(147, 51, 234),

            success: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(217, 119, 6),
            danger: Color::Rgb(220, 38, 38),
            info: Color::Rgb(37, 99, 235),

            bar: Color::Rgb(229, 231, 235),

            text_primary: Color::Rgb(17, 24, 39),
            text_secondary: Color::Rgb(75, 85, 99),
            text_disabled: Color::Rgb(156, 163, 175),

            selected: Color::Rgb(199, 210, 254),
            border: Color::Rgb(209, 213, 219),
            border_focused: Color::Rgb(79, 70, 229),
        }
    }

    /// Material purple, matching the mobile app's top bar
    pub fn purple() -> Self {
        Self {
            primary: Color::Rgb(102, 80, 164),   // Purple40
            accent: Color::Rgb(208, 188, 255),   // Purple80
            success: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(251, 191, 36),
            danger: Color::Rgb(179, 38, 30),     // Material error
            info: Color::Rgb(204, 194, 220),     // PurpleGrey80
            bar: Color::Rgb(102, 80, 164),
            text_primary: Color::Rgb(250, 245, 255),
            text_secondary: Color::Rgb(204, 194, 220),
            text_disabled: Color::Rgb(125, 82, 96), // Pink40
            selected: Color::Rgb(102, 80, 164),
            border: Color::Rgb(98, 91, 113), // PurpleGrey40
            border_focused: Color::Rgb(208, 188, 255),
        }
    }
}

/// Unicode glyphs used across the UI
pub struct ModernIcons;

impl ModernIcons {
    pub const CHECKED: &'static str = "[x]";
    pub const UNCHECKED: &'static str = "[ ]";
    pub const ADD: &'static str = "+";
    pub const ARROW_RIGHT: &'static str = "▶";
    pub const BULLET: &'static str = "•";
    pub const HELP: &'static str = "?";
    pub const ERROR: &'static str = "!";
}

/// Progress bar characters
pub struct ProgressChars;

impl ProgressChars {
    pub const FILLED: char = '█';
    pub const EMPTY: char = '░';
    pub const PARTIAL: char = '▒';
}

/// Pre-defined styles for common UI elements
impl ModernTheme {
    /// Style for headers and titles
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Top bar title on the bar color
    pub fn bar_style(&self) -> Style {
        self.header_style().bg(self.bar)
    }

    pub fn secondary_text_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn danger_style(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for the highlighted row
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Key names in hint lines
    pub fn key_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Done items and disabled elements
    pub fn dimmed_style(&self) -> Style {
        Style::default()
            .fg(self.text_disabled)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Completion bar color: more done is greener
    pub fn progress_style_for_percentage(&self, percentage: f64) -> Style {
        if percentage >= 80.0 {
            self.success_style()
        } else if percentage >= 50.0 {
            self.warning_style()
        } else {
            self.info_style().add_modifier(Modifier::BOLD)
        }
    }
}
