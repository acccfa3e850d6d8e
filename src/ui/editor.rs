//! Editor dialog for the selected credential.

use ratatui::prelude::*;

use super::components::{
    render_dialog_frame, render_input_field, InputFieldConfig, INPUT_FIELD_HEIGHT,
};
use super::vault::draft_fields;
use crate::app::App;
use crate::vault::WorkingCopy;

pub fn render_editor(frame: &mut Frame, app: &App, copy: &WorkingCopy) {
    let content_height = 5 * INPUT_FIELD_HEIGHT + 1;
    let inner = render_dialog_frame(frame, frame.area(), "Edit entry", content_height, 64);

    let mut y = inner.y;
    for (index, (label, value)) in draft_fields(&copy.fields).into_iter().enumerate() {
        if y + INPUT_FIELD_HEIGHT > inner.bottom() {
            break;
        }
        let config = InputFieldConfig::new(label, value)
            .focused(app.editor_field == index)
            .password(label == "Password" && !copy.reveal_secret)
            .placeholder("(keep current)");
        let field_area = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), INPUT_FIELD_HEIGHT);
        render_input_field(frame, field_area, &config);
        y += INPUT_FIELD_HEIGHT;
    }

    if y < inner.bottom() {
        let hints = ratatui::widgets::Paragraph::new(
            "[Enter] Save  [Ctrl+D] Delete  [Ctrl+U] Show password  [Esc] Close",
        )
        .style(Style::default().fg(super::theme::COLOR_DIM))
        .alignment(Alignment::Center);
        frame.render_widget(
            hints,
            Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
        );
    }
}
