use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::App;

/// Render the file picker screen into the given area.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let picker = &app.file_picker;
    let kind = app.session.tabs.active();

    let chunks = Layout::vertical([
        Constraint::Length(1), // current dir
        Constraint::Min(3),    // file list
        Constraint::Length(1), // hint
    ])
    .split(area);

    let dir_line = Line::from(vec![
        Span::styled(" \u{1F4C1} ", Style::default().fg(theme.active)),
        Span::styled(
            picker.current_dir.display().to_string(),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(dir_line), chunks[0]);

    let visible_height = chunks[1].height.saturating_sub(2) as usize; // borders
    let scroll_offset = if picker.cursor >= visible_height {
        picker.cursor - visible_height + 1
    } else {
        0
    };

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|entry| {
            let (icon, style) = if entry.is_dir {
                ("\u{1F4C1} ", Style::default().fg(theme.active))
            } else if entry.is_pdf {
                ("\u{1F4C4} ", Style::default().fg(theme.text))
            } else {
                // Listed so picking it reports the PDF-only rule
                ("  ", Style::default().fg(theme.dim))
            };
            ListItem::new(Line::from(vec![
                Span::styled(icon, style),
                Span::styled(&entry.name, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(format!(" Select PDF for {} ", kind.label())),
        )
        .highlight_style(theme.highlight_style());

    let mut state = ListState::default();
    state.select(Some(picker.cursor.saturating_sub(scroll_offset)));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let hint = Line::from(vec![
        Span::styled(
            " Enter",
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" open/select  ", Style::default().fg(theme.dim)),
        Span::styled(
            "Esc",
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" back", Style::default().fg(theme.dim)),
    ]);
    f.render_widget(Paragraph::new(hint), chunks[2]);
}
