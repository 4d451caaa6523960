use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(64, 32, f.area());

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section_header("Documents", theme),
        key_line("Tab / Shift+Tab", "Next / previous document tab", theme),
        key_line("1 / 2", "Aadhaar / PAN tab", theme),
        key_line("click", "Switch to the clicked tab", theme),
        Line::from(""),
        section_header("Upload", theme),
        key_line("drop / paste", "Select a PDF by dropping it here", theme),
        key_line("o", "Browse for a file", theme),
        key_line("p", "Type a file path", theme),
        key_line("x / e / Enter", "Extract information", theme),
        Line::from(""),
        section_header("Results", theme),
        key_line("y", "Copy JSON to clipboard (OSC 52)", theme),
        key_line("d", "Download JSON to export directory", theme),
        key_line("r", "Upload another file", theme),
        Line::from(""),
        section_header("File browser", theme),
        key_line("j / k", "Move down / up", theme),
        key_line("g / G", "Go to top / bottom", theme),
        key_line("Enter", "Open directory / select file", theme),
        key_line("Esc", "Back", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<16}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}

/// Create a centered rectangle of the given width (columns) and height (rows).
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
