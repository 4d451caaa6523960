use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use cardscan_core::NoticeLevel;

use crate::app::App;

/// Render the transient notice line (blank when nothing is showing).
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.notices.current() else {
        return;
    };
    let marker = match notice.level {
        NoticeLevel::Info => "\u{2139}",
        NoticeLevel::Success => "\u{2713}",
        NoticeLevel::Error => "\u{2717}",
    };
    let style = Style::default()
        .fg(app.theme.notice_color(notice.level))
        .add_modifier(Modifier::BOLD);
    let line = Line::from(Span::styled(format!(" {} {}", marker, notice.message), style));
    f.render_widget(Paragraph::new(line), area);
}
