use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use cardscan_core::{DocumentSession, NO_FILE_SELECTED, Panel};

use crate::app::App;
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

/// Render the active document's upload or results panel.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let doc = app.session.active();
    match doc.panel() {
        Panel::Upload => render_upload(f, app, doc, area),
        Panel::Results => render_results(f, &app.theme, doc, area),
    }
}

fn render_upload(f: &mut Frame, app: &App, doc: &DocumentSession, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(format!(" Upload {} ", doc.kind().label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let name = doc.filename_display();
    let name_style = if name == NO_FILE_SELECTED {
        Style::default().fg(theme.dim)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };
    let width = inner.width.saturating_sub(10) as usize;

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  File: ", Style::default().fg(theme.dim)),
            Span::styled(truncate(name, width), name_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Drop a PDF onto the terminal, press o to browse or p to type a path",
            Style::default().fg(theme.dim),
        )),
        Line::from(""),
    ];

    if doc.is_busy() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} ", spinner_char(app.tick)),
                Style::default().fg(theme.spinner),
            ),
            Span::styled("Extracting...", Style::default().fg(theme.text)),
        ]));
    } else {
        let button_style = if doc.can_extract() {
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(" [x] Extract Information ", button_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_results(f: &mut Frame, theme: &Theme, doc: &DocumentSession, area: Rect) {
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    let rows: Vec<Row> = doc
        .rows()
        .unwrap_or_default()
        .into_iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.label).style(Style::default().fg(theme.dim)),
                Cell::from(row.value).style(Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(10)])
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(Span::styled(
                    format!(" {} Details ", doc.kind().label()),
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(table, chunks[0]);

    let key = Style::default().fg(theme.active).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(theme.dim);
    let hints = Line::from(vec![
        Span::styled(" y", key),
        Span::styled(" copy JSON  ", dim),
        Span::styled("d", key),
        Span::styled(" download  ", dim),
        Span::styled("r", key),
        Span::styled(" upload another", dim),
    ]);
    f.render_widget(Paragraph::new(hints), chunks[1]);
}
