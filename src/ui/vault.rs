//! Vault screen rendering: filter bar, credential table, add form.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::components::{render_input_field, InputFieldConfig, INPUT_FIELD_HEIGHT};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_SELECTED};
use crate::app::{App, Focus};
use crate::models::CredentialDraft;

pub fn render_vault_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let [filter_area, main_area, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .areas(area);

    render_filter_bar(frame, filter_area, app);

    let [table_area, form_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(main_area);
    render_table(frame, table_area, app);
    render_add_form(frame, form_area, app);

    let hints = match app.focus {
        Focus::Table => {
            "[/] Filter  [a] Add  [Enter] Edit  [d] Delete  [Ctrl+L] Sign out  [q] Quit"
        }
        Focus::Filter => "[Enter] Apply  [Esc] Clear filter",
        Focus::AddForm => "[Tab] Next field  [Enter] Save entry  [Ctrl+U] Show password  [Esc] Back",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(COLOR_DIM)),
        hints_area,
    );
}

fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Filter;
    let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(" Search ");

    let text = if app.vault.filter_text.is_empty() && !focused {
        Span::styled("Filter by title or username", Style::default().fg(COLOR_DIM))
    } else {
        Span::styled(
            app.vault.filter_text.as_str(),
            Style::default().fg(COLOR_ACCENT),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Table;
    let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };

    let visible = app.vault.filtered();
    let title = format!(" Entries ({}) ", visible.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(title);

    if visible.is_empty() {
        let message = if app.vault.mirror().is_empty() {
            "No entries yet. Press [a] to add one."
        } else {
            "No entries match the filter."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new([Cell::from("Title"), Cell::from("Username")])
        .style(Style::default().fg(COLOR_DIM).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = visible
        .iter()
        .map(|record| {
            Row::new([
                Cell::from(record.title.as_str()),
                Cell::from(record.username.as_str()),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(COLOR_SELECTED)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(app.vault.table_index.min(visible.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_add_form(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::AddForm;
    let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(" New entry ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    for (index, (label, value)) in draft_fields(&app.vault.draft).into_iter().enumerate() {
        if y + INPUT_FIELD_HEIGHT > inner.bottom() {
            break;
        }
        let config = InputFieldConfig::new(label, value)
            .focused(focused && app.add_field == index)
            .password(label == "Password" && !app.vault.reveal_draft_secret);
        let field_area = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), INPUT_FIELD_HEIGHT);
        render_input_field(frame, field_area, &config);
        y += INPUT_FIELD_HEIGHT;
    }
}

/// Field labels and values in display order, matching the key handler's
/// field indices.
pub fn draft_fields(draft: &CredentialDraft) -> [(&'static str, &str); 5] {
    [
        ("Title", draft.title.as_str()),
        ("Username", draft.username.as_str()),
        ("Password", draft.secret.as_str()),
        ("URL", draft.url.as_str()),
        ("Note", draft.note.as_str()),
    ]
}
