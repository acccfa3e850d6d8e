//! Bottom-of-screen notice banner.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::{COLOR_ACCENT, COLOR_ERROR, COLOR_SUCCESS};
use crate::app::{Notice, NoticeKind};

pub fn render_notice(frame: &mut Frame, notice: &Notice) {
    let area = frame.area();
    if area.height < 4 {
        return;
    }

    let height = 3;
    let banner_area = Rect::new(
        area.x + 2,
        area.bottom() - height - 1,
        area.width.saturating_sub(4),
        height,
    );

    let color = match notice.kind {
        NoticeKind::Info => COLOR_ACCENT,
        NoticeKind::Success => COLOR_SUCCESS,
        NoticeKind::Error => COLOR_ERROR,
    };

    frame.render_widget(Clear, banner_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(" [Enter] Dismiss ");
    let banner = Paragraph::new(notice.text.as_str())
        .style(Style::default().fg(color))
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(banner, banner_area);
}
