use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs};

use cardscan_core::{DocumentKind, Session};

use crate::app::App;
use crate::view::spinner_char;

/// Tab title as drawn; also used for hit-testing clicks.
fn tab_title(index: usize, kind: DocumentKind) -> String {
    format!("{} {}", index + 1, kind.label())
}

/// Suffix drawn after the title of a tab whose extraction is running.
fn busy_marker(tick: usize) -> String {
    format!(" {}", spinner_char(tick))
}

/// Columns taken by a tab's title, including the busy marker when shown.
fn title_width(index: usize, kind: DocumentKind, busy: bool) -> u16 {
    let marker = if busy {
        busy_marker(0).chars().count()
    } else {
        0
    };
    (tab_title(index, kind).chars().count() + marker) as u16
}

/// Render the document tab bar.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let titles: Vec<Line> = DocumentKind::all()
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let mut spans = vec![Span::raw(tab_title(i, kind))];
            // Busy marker on background tabs too
            if app.session.document(kind).is_busy() {
                spans.push(Span::styled(
                    busy_marker(app.tick),
                    Style::default().fg(theme.spinner),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.session.tabs.index())
        .style(Style::default().fg(theme.dim))
        .highlight_style(
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(Span::styled(" cardscan ", theme.header_style())),
        );

    f.render_widget(tabs, area);
}

/// Which tab, if any, sits under a click at (`col`, `row`).
///
/// Mirrors the `Tabs` widget layout: one column of border, then for each tab
/// a space, the title (with its busy marker), a space, and a one-column
/// divider.
pub fn tab_at(area: Rect, session: &Session, col: u16, row: u16) -> Option<DocumentKind> {
    if row <= area.y || row >= area.y + area.height.saturating_sub(1) {
        return None;
    }
    let mut x = area.x + 1;
    for (i, &kind) in DocumentKind::all().iter().enumerate() {
        let busy = session.document(kind).is_busy();
        let width = title_width(i, kind, busy) + 2;
        if col >= x && col < x + width {
            return Some(kind);
        }
        x += width + 1;
    }
    None
}
