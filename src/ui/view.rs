//! Rendering. Everything here reads the state and never changes it, so the
//! same state always produces the same text.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem as ListRow, ListState, Paragraph, Wrap,
};
use ratatui::Frame;

use super::forms::{EntryField, EntryForm};
use super::helpers::centered_rect;
use super::input::TextInput;
use super::screens::{ListItem, ListView, Screen, ScreenState, StatusKind};

/// Footer space reserved for the status message.
const FOOTER_HEIGHT: u16 = 2;
/// Marker in front of the highlighted list row.
const HIGHLIGHT_SYMBOL: &str = "> ";
/// Lines above the first form field.
const FORM_HEADER_LINES: u16 = 2;
const SEARCH_PREFIX: &str = "Search: ";

/// Body of the current screen followed by the status line, if any.
pub fn screen_lines(state: &ScreenState) -> Vec<Line<'static>> {
    let mut lines = body_lines(state);
    if let Some(status) = status_line(state) {
        lines.push(Line::from(""));
        lines.push(status);
    }
    lines
}

/// [`screen_lines`] flattened to plain text, one line per row.
pub fn screen_text(state: &ScreenState) -> String {
    screen_lines(state)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Paint the state onto the terminal frame.
pub fn draw(frame: &mut Frame, state: &ScreenState) {
    let area = frame.area();
    let footer_height = FOOTER_HEIGHT.min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
        .split(area);
    let (content_area, footer_area) = (chunks[0], chunks[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" CLI Catalog ");
    let inner = block.inner(content_area);
    frame.render_widget(block, content_area);

    match &state.screen {
        Screen::Confirm(pending) => draw_confirm(frame, inner, pending.prompt()),
        Screen::List(list) => draw_list(frame, inner, state, list),
        _ => frame.render_widget(Paragraph::new(body_lines(state)), inner),
    }

    if let Some((x, y)) = cursor_position(state) {
        if x < inner.width && y < inner.height {
            frame.set_cursor_position((inner.x + x, inner.y + y));
        }
    }

    if footer_area.height > 0 {
        let footer_block = Block::default().borders(Borders::TOP);
        let footer_inner = footer_block.inner(footer_area);
        frame.render_widget(footer_block, footer_area);
        if let Some(status) = status_line(state) {
            frame.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), footer_inner);
        }
    }
}

fn draw_confirm(frame: &mut Frame, area: Rect, prompt: String) {
    let popup_area = centered_rect(70, 40, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default().title("Confirm").borders(Borders::ALL);
    let lines = vec![
        Line::from(prompt),
        Line::from(""),
        hint("Press y to confirm, n to cancel"),
    ];
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Heading and hint as paragraphs, rows through the stateful `List` widget
/// so ratatui keeps the highlighted row in view.
fn draw_list(frame: &mut Frame, area: Rect, state: &ScreenState, list: &ListView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(heading(list_title(state, list))), chunks[0]);

    let rows: Vec<ListRow> = list
        .items
        .iter()
        .map(|item| ListRow::new(row_text(item)))
        .collect();
    let widget = List::new(rows)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut list_state = ListState::default();
    if !list.items.is_empty() {
        list_state.select(Some(list.selected));
    }
    frame.render_stateful_widget(widget, chunks[1], &mut list_state);

    frame.render_widget(Paragraph::new(vec![Line::from(""), list_hint()]), chunks[2]);
}

/// Where the text cursor belongs, relative to the content area.
pub fn cursor_position(state: &ScreenState) -> Option<(u16, u16)> {
    match &state.screen {
        Screen::Add(form) | Screen::Edit { form, .. } => {
            let field = form.active();
            let row = EntryField::ALL.iter().position(|f| *f == field)? as u16;
            let prefix = field_prefix(field).chars().count();
            let col = prefix + form.input(field).cursor();
            Some((col as u16, FORM_HEADER_LINES + row))
        }
        Screen::Search(input) => {
            let col = SEARCH_PREFIX.len() + input.cursor();
            Some((col as u16, 2))
        }
        _ => None,
    }
}

fn body_lines(state: &ScreenState) -> Vec<Line<'static>> {
    match &state.screen {
        Screen::Menu => menu_lines(state.purge_available()),
        Screen::List(list) => list_lines(state, list),
        Screen::Add(form) => form_lines("ADD CLI", form),
        Screen::Edit { form, .. } => form_lines("EDIT CLI", form),
        Screen::Confirm(pending) => vec![
            Line::from(pending.prompt()),
            Line::from(""),
            hint("Press y to confirm, n to cancel"),
        ],
        Screen::Search(input) => search_lines(input),
    }
}

fn status_line(state: &ScreenState) -> Option<Line<'static>> {
    let status = state.status.as_ref()?;
    let (prefix, color) = match status.kind {
        StatusKind::Error => ("Error: ", Color::Red),
        StatusKind::Success => ("Success: ", Color::Green),
    };
    Some(Line::from(Span::styled(
        format!("{prefix}{}", status.text),
        Style::default().fg(color),
    )))
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn hint(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
}

fn menu_lines(purge_available: bool) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut items = vec![
        ("v", "View all CLIs"),
        ("s", "Search for CLIs"),
        ("a", "Add a new CLI"),
        ("q", "Quit program"),
    ];
    if purge_available {
        items.push(("p", "Purge database"));
    }

    let mut lines = vec![heading("MAIN MENU"), Line::from("")];
    lines.extend(items.into_iter().map(|(key, label)| {
        Line::from(vec![
            Span::styled(key, key_style),
            Span::raw(format!(": {label}")),
        ])
    }));
    lines
}

fn list_title(state: &ScreenState, list: &ListView) -> String {
    match (&state.selected_entry, list.is_action_menu()) {
        (Some(entry), true) => format!("CLI '{}'", entry.name),
        _ => format!("CLIS ({})", list.items.len()),
    }
}

fn row_text(item: &ListItem) -> String {
    match item {
        ListItem::Catalog(entry) => format!("{} - {}", entry.name, entry.description),
        ListItem::Action(action) => action.label().to_string(),
    }
}

fn list_hint() -> Line<'static> {
    hint("Up/Down to move, Enter to select, Esc for menu")
}

/// Text form of the list, marking the highlighted row the way the widget does.
fn list_lines(state: &ScreenState, list: &ListView) -> Vec<Line<'static>> {
    let mut lines = vec![heading(list_title(state, list)), Line::from("")];
    let blank = " ".repeat(HIGHLIGHT_SYMBOL.len());
    lines.extend(list.items.iter().enumerate().map(|(idx, item)| {
        if idx == list.selected {
            Line::from(format!("{HIGHLIGHT_SYMBOL}{}", row_text(item)))
        } else {
            Line::from(format!("{blank}{}", row_text(item)))
        }
    }));
    lines.push(Line::from(""));
    lines.push(list_hint());
    lines
}

fn field_prefix(field: EntryField) -> String {
    format!("{}: ", field.label())
}

/// One `Label: value` line, highlighted when focused.
fn input_line(prefix: String, input: &TextInput, focused: bool) -> Line<'static> {
    let value = input.value();
    let display = if value.is_empty() {
        format!("<{}>", input.placeholder())
    } else {
        value.to_string()
    };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(vec![Span::raw(prefix), Span::styled(display, style)])
}

fn form_lines(title: &'static str, form: &EntryForm) -> Vec<Line<'static>> {
    let mut lines = vec![heading(title), Line::from("")];
    for field in EntryField::ALL {
        lines.push(input_line(
            field_prefix(field),
            form.input(field),
            form.active() == field,
        ));
    }
    lines.push(Line::from(""));
    lines.push(hint("Press Enter to save, Esc to cancel"));
    lines
}

fn search_lines(input: &TextInput) -> Vec<Line<'static>> {
    vec![
        heading("Search CLIs"),
        Line::from(""),
        input_line(SEARCH_PREFIX.to_string(), input, true),
        Line::from(""),
        hint("Press Enter to search, Esc to cancel"),
    ]
}
