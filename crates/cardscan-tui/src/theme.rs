use ratatui::style::{Color, Modifier, Style};

use cardscan_core::NoticeLevel;

/// Color theme for the TUI.
pub struct Theme {
    pub success: Color,
    pub error: Color,
    pub info: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Default theme: cyan accents, pink errors.
    pub fn default_theme() -> Self {
        Self {
            success: Color::Rgb(76, 201, 240),
            error: Color::Rgb(247, 37, 133),
            info: Color::Rgb(200, 200, 200),

            header_fg: Color::White,
            header_bg: Color::Rgb(67, 97, 238),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(30, 40, 80),
            active: Color::Rgb(72, 149, 239),
            spinner: Color::Rgb(76, 201, 240),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    /// Monochrome theme for terminals with limited color support.
    pub fn mono() -> Self {
        Self {
            success: Color::White,
            error: Color::White,
            info: Color::Gray,

            header_fg: Color::Black,
            header_bg: Color::White,
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::DarkGray,
            active: Color::White,
            spinner: Color::White,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "mono" => Self::mono(),
            _ => Self::default_theme(),
        }
    }

    pub fn notice_color(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Info => self.info,
            NoticeLevel::Success => self.success,
            NoticeLevel::Error => self.error,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
