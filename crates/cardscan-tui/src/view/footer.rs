use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, InputMode};

/// Render the footer: key hints and server, or the path input line.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if app.input_mode == InputMode::PathInput {
        let line = Line::from(vec![
            Span::styled(
                " Path: ",
                Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
            ),
            Span::styled(&app.path_input, Style::default().fg(theme.text)),
            Span::styled("\u{2588}", Style::default().fg(theme.active)),
        ]);
        f.render_widget(Paragraph::new(line), area);
        return;
    }

    let line = Line::from(vec![
        Span::styled(
            " Tab:switch  o:browse  p:path  x:extract  ?:help  q:quit",
            theme.footer_style(),
        ),
        Span::styled(format!("  \u{2192} {}", app.server_url), theme.footer_style()),
    ]);
    f.render_widget(Paragraph::new(line).style(theme.footer_style()), area);
}
