use crate::keybinds::InputMode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Border color of the panel holding focus.
pub const FOCUSED_BORDER: Color = Color::Blue;
/// Background of the focused item inside a panel.
pub const FOCUSED_ITEM_BG: Color = Color::Gray;

/// Render the bottom status bar: mode, focused item and a message.
pub fn render_status_bar(frame: &mut Frame, area: Rect, mode: InputMode, focus: &str, info: &str) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
        Span::styled(focus, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(info, Style::default().add_modifier(Modifier::DIM)),
    ]);

    let bar = Paragraph::new(line).style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

/// Main content area plus a one-line status bar.
pub fn standard_layout(area: Rect) -> (Rect, Rect) {
    let [content, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    (content, status)
}

/// Bordered, centered-title block; the border turns blue when focused.
pub fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(FOCUSED_BORDER)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Block::default()
        .title(format!(" {} ", title))
        .title_alignment(ratatui::layout::Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border)
}

/// A `width` x `height` rect centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
