//! Login screen rendering.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::components::{render_input_field, InputFieldConfig, INPUT_FIELD_HEIGHT};
use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_HEADER};
use crate::app::{App, AuthMode};

const BANNER: &str = "  K E Y C U D D L E  ";

pub fn render_login_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, area);

    let inner = area.inner(Margin::new(2, 1));

    let banner_area = Rect::new(inner.x, inner.y, inner.width, 2);
    let banner = Paragraph::new(BANNER)
        .style(
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(banner, banner_area);

    let fields: Vec<InputFieldConfig> = match app.login.mode {
        AuthMode::SignIn => vec![
            InputFieldConfig::new("Email", &app.login.email).placeholder("you@example.com"),
            InputFieldConfig::new("Password", &app.login.password)
                .password(!app.login.reveal_password),
        ],
        AuthMode::Register => vec![
            InputFieldConfig::new("Full name", &app.login.fullname),
            InputFieldConfig::new("Age", &app.login.age),
            InputFieldConfig::new("Email", &app.login.email).placeholder("you@example.com"),
            InputFieldConfig::new("Password", &app.login.password)
                .password(!app.login.reveal_password),
        ],
    };

    let form_width = inner.width.saturating_sub(8).min(48);
    let form_x = inner.x + (inner.width.saturating_sub(form_width)) / 2;
    let mut y = inner.y + 3;
    for (index, field) in fields.into_iter().enumerate() {
        if y + INPUT_FIELD_HEIGHT > inner.bottom() {
            break;
        }
        let field_area = Rect::new(form_x, y, form_width, INPUT_FIELD_HEIGHT);
        let field = field.focused(app.login.field == index);
        render_input_field(frame, field_area, &field);
        y += INPUT_FIELD_HEIGHT;
    }

    let status = if app.login.busy {
        match app.login.mode {
            AuthMode::SignIn => "Signing in...",
            AuthMode::Register => "Creating account...",
        }
    } else {
        match app.login.mode {
            AuthMode::SignIn => {
                "[Enter] Sign in  [Tab] Next field  [Ctrl+R] Register  [Ctrl+U] Show password"
            }
            AuthMode::Register => {
                "[Enter] Create account  [Tab] Next field  [Ctrl+R] Back to sign in"
            }
        }
    };
    if y + 3 > inner.bottom() {
        return;
    }
    let hints_area = Rect::new(form_x, y + 1, form_width, 2);
    let hints = Paragraph::new(status)
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(hints, hints_area);
}
