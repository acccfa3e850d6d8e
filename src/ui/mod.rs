//! UI rendering for the KeyCuddle TUI
//!
//! Layout:
//! - Login screen: banner plus sign-in / registration form
//! - Vault screen: search bar, credential table, add form, keybind hints
//! - Overlays: editor dialog for the selected entry, dismissible notices

pub mod components;
mod editor;
mod login;
mod notice;
mod theme;
mod vault;

use ratatui::Frame;

use crate::app::{App, Screen};
use editor::render_editor;
use login::render_login_screen;
use notice::render_notice;
use vault::render_vault_screen;

/// Render the whole frame for the current app state.
pub fn render(frame: &mut Frame, app: &App) {
    // Until the initial session check resolves, show nothing but a
    // placeholder; neither form is the right one to offer yet.
    if app.session.is_loading() {
        render_loading(frame);
        return;
    }

    match app.screen {
        Screen::Login => render_login_screen(frame, app),
        Screen::Vault => {
            render_vault_screen(frame, app);
            if let Some(copy) = app.vault.selected() {
                render_editor(frame, app, copy);
            }
        }
    }

    if let Some(ref notice) = app.notice {
        render_notice(frame, notice);
    }
}

fn render_loading(frame: &mut Frame) {
    use ratatui::layout::Alignment;
    use ratatui::style::Style;
    use ratatui::widgets::Paragraph;

    let area = frame.area();
    if area.height < 2 {
        return;
    }
    let line = ratatui::layout::Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    let placeholder = Paragraph::new("Loading...")
        .style(Style::default().fg(theme::COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(placeholder, line);
}
