use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position as CursorPosition, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use resto_core::{
    FocusCursor, FormState, PanelId, Position,
    panel::{FieldInput, Panel},
    ui::{FOCUSED_ITEM_BG, centered_rect, panel_block, render_status_bar, standard_layout},
};

use crate::app::{App, TextOverlay};

/// Rows of the StatusView, borders included.
const STATUS_HEIGHT: u16 = 7;

fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Yellow,
        500..=599 => Color::Red,
        _ => Color::White,
    }
}

/// Clickable regions from the last frame, most specific first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    items: Vec<(Rect, FocusCursor)>,
    panels: Vec<(Rect, PanelId)>,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Item(FocusCursor),
    Panel(PanelId),
}

impl HitMap {
    pub fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let point = CursorPosition::new(column, row);
        self.items
            .iter()
            .find(|(rect, _)| rect.contains(point))
            .map(|(_, cursor)| HitTarget::Item(*cursor))
            .or_else(|| {
                self.panels
                    .iter()
                    .find(|(rect, _)| rect.contains(point))
                    .map(|(_, id)| HitTarget::Panel(*id))
            })
    }

    /// Rect of the item at `cursor`, if it was drawn.
    pub fn item_rect(&self, cursor: FocusCursor) -> Option<Rect> {
        self.items
            .iter()
            .find(|(_, c)| *c == cursor)
            .map(|(rect, _)| *rect)
    }

    fn push_item(&mut self, rect: Rect, cursor: FocusCursor) {
        if rect.width > 0 && rect.height > 0 {
            self.items.push((rect, cursor));
        }
    }
}

fn focused_style() -> Style {
    Style::default()
        .bg(FOCUSED_ITEM_BG)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// Height a form panel needs: one row per field, a gap, the button row.
fn form_height(panel: &Panel) -> u16 {
    let gap = u16::from(!panel.fields.is_empty());
    panel.fields.len() as u16 + gap + 1 + 2
}

/// Render the whole screen and return where its items were drawn.
pub fn render(frame: &mut Frame, app: &App) -> HitMap {
    let mut hits = HitMap::default();
    let (content, status_bar) = standard_layout(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(content);

    let form = &app.form;
    let [request_area, auth_area, headers_area] = Layout::vertical([
        Constraint::Length(form_height(form.panel(PanelId::Request))),
        Constraint::Length(form_height(form.panel(PanelId::Auth))),
        Constraint::Min(3),
    ])
    .areas(left);
    let [response_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(STATUS_HEIGHT)]).areas(right);

    let request_title = Line::from(format!(" body theme: {} ", app.settings.theme()));
    render_form_panel(frame, request_area, form, PanelId::Request, Some(request_title), &mut hits);
    let auth_title = Line::from(format!(" {} ", form.auth_mode().label()));
    render_form_panel(frame, auth_area, form, PanelId::Auth, Some(auth_title), &mut hits);
    render_form_panel(frame, headers_area, form, PanelId::Headers, None, &mut hits);
    render_response(frame, response_area, app);
    render_status_view(frame, status_area, app);
    hits.panels = vec![
        (request_area, PanelId::Request),
        (auth_area, PanelId::Auth),
        (headers_area, PanelId::Headers),
        (response_area, PanelId::Response),
        (status_area, PanelId::Status),
    ];

    let focus = format!("{} › {}", form.cursor().panel.title(), form.focused_label());
    render_status_bar(frame, status_bar, app.mode(), focus.trim_end_matches(" › "), &app.message);

    // Overlays, topmost last.
    let area = frame.area();
    app.chooser.render(frame, area);
    app.prompt.render(frame, area);
    if let Some(overlay) = &app.overlay {
        render_text_overlay(frame, area, overlay);
    }
    app.help_popup.render(frame, area);
    hits
}

fn render_form_panel(
    frame: &mut Frame,
    area: Rect,
    form: &FormState,
    id: PanelId,
    bottom_title: Option<Line<'static>>,
    hits: &mut HitMap,
) {
    let panel = form.panel(id);
    let focused = form.cursor().panel == id;
    let mut block = panel_block(id.title(), focused);
    if let Some(title) = bottom_title {
        block = block.title_bottom(title);
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let label_width = panel
        .fields
        .iter()
        .map(|f| f.label.width())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    let mut text_cursor = None;
    for (i, field) in panel.fields.iter().enumerate() {
        let is_focused = form.is_focused(id, Position::Field(i));
        let label = format!(" {:<width$} ", field.label, width = label_width);
        let value = match &field.input {
            FieldInput::Text(text) => text.clone(),
            FieldInput::Choice { .. } => format!("‹ {} ›", field.input.value()),
        };
        if is_focused && !field.input.is_choice() {
            let x = inner.x + (label.width() + 1 + value.width()) as u16;
            text_cursor = Some(CursorPosition::new(
                x.min(inner.right().saturating_sub(1)),
                inner.y + i as u16,
            ));
        }
        let row = inner.y + i as u16;
        if row < inner.bottom() {
            hits.push_item(
                Rect::new(inner.x, row, inner.width, 1),
                FocusCursor::new(id, Position::Field(i)),
            );
        }
        let value_style = if is_focused {
            focused_style()
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(value, value_style),
        ]));
    }
    if !panel.fields.is_empty() {
        lines.push(Line::from(""));
    }

    let button_row = inner.y + lines.len() as u16;
    let mut x = inner.x + 1;
    let mut buttons = vec![Span::raw(" ")];
    for (i, button) in panel.buttons.iter().enumerate() {
        let style = if form.is_focused(id, Position::Button(i)) {
            focused_style()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let text = format!("[ {} ]", button.label);
        let width = text.width() as u16;
        if button_row < inner.bottom() && x < inner.right() {
            hits.push_item(
                Rect::new(x, button_row, width.min(inner.right() - x), 1),
                FocusCursor::new(id, Position::Button(i)),
            );
        }
        x = x.saturating_add(width + 1);
        buttons.push(Span::styled(text, style));
        buttons.push(Span::raw(" "));
    }
    lines.push(Line::from(buttons));

    frame.render_widget(Paragraph::new(lines), inner);
    if let Some(position) = text_cursor {
        frame.set_cursor_position(position);
    }
}

fn render_response(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.form.cursor().panel == PanelId::Response;
    let block = panel_block(PanelId::Response.title(), focused);

    if app.response_body.is_empty() {
        let hint = if app.request_in_flight {
            ""
        } else {
            "Send a request to see its response here"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))).block(block),
            area,
        );
        return;
    }

    frame.render_widget(
        Paragraph::new(app.response_body.as_str())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_view(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.form.cursor().panel == PanelId::Status;
    let block = panel_block(PanelId::Status.title(), focused);

    let paragraph = if app.request_in_flight {
        Paragraph::new(format!("{} Sending request...", app.spinner_char()))
            .style(Style::default().fg(Color::Yellow))
    } else if let Some(response) = &app.response {
        let mut lines = app.status_text.lines();
        let first = lines.next().unwrap_or("").to_string();
        let mut out = vec![Line::from(Span::styled(
            first,
            Style::default()
                .fg(status_color(response.status_code))
                .add_modifier(Modifier::BOLD),
        ))];
        out.extend(
            lines.map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::DarkGray)))),
        );
        Paragraph::new(out)
    } else if app.status_text.starts_with("Error") {
        Paragraph::new(app.status_text.as_str()).style(Style::default().fg(Color::Red))
    } else {
        Paragraph::new(app.status_text.as_str())
    };

    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), area);
}

fn render_text_overlay(frame: &mut Frame, area: Rect, overlay: &TextOverlay) {
    let mut lines: Vec<Line> = overlay.text.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc to exit",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let widest = lines.iter().map(|l| l.width()).max().unwrap_or(20) as u16;
    let width = (widest + 4).min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect(width, height, area);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", overlay.title))
                    .borders(Borders::ALL),
            )
            .wrap(Wrap { trim: false }),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Paths;
    use ratatui::{Terminal, backend::TestBackend};
    use resto_core::settings::Settings;

    fn draw(app: &App) -> HitMap {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = render(frame, app)).unwrap();
        hits
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| {
            render(frame, app);
        })
        .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths {
            settings: dir.path().join("settings.json"),
            body: dir.path().join("request_body"),
        };
        let app = App::new(Settings::default(), paths);
        (dir, app)
    }

    #[test]
    fn test_form_height_counts_rows() {
        let form = FormState::new();
        assert_eq!(form_height(form.panel(PanelId::Request)), 3 + 1 + 1 + 2);
        assert_eq!(form_height(form.panel(PanelId::Auth)), 1 + 2);
    }

    #[test]
    fn test_screen_shows_all_panels() {
        let (_dir, app) = app();
        let text = screen(&app);
        for title in ["Request Form", "Authentication", "Headers", "Response", "Status"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.contains("[ Send ]"));
        assert!(text.contains("‹ GET ›"));
        assert!(text.contains("body theme: railscast"));
    }

    #[test]
    fn test_hit_map_locates_items_and_panels() {
        let (_dir, mut app) = app();
        app.form.add_header("X-Trace").unwrap();
        let hits = draw(&app);

        let send = FocusCursor::new(PanelId::Request, Position::Button(3));
        let rect = hits.item_rect(send).unwrap();
        assert_eq!(hits.target_at(rect.x, rect.y), Some(HitTarget::Item(send)));
        assert_eq!(
            hits.target_at(rect.right() - 1, rect.y),
            Some(HitTarget::Item(send))
        );

        let header = FocusCursor::new(PanelId::Headers, Position::Field(0));
        assert!(hits.item_rect(header).is_some());

        // Top-right corner is the Response panel border.
        assert_eq!(hits.target_at(119, 0), Some(HitTarget::Panel(PanelId::Response)));
        // The status bar is not clickable.
        assert_eq!(hits.target_at(0, 29), None);
    }

    #[test]
    fn test_screen_shows_dynamic_fields() {
        let (_dir, mut app) = app();
        app.form.set_auth_mode(resto_core::AuthMode::BearerToken);
        app.form.add_header("X-Trace").unwrap();
        let text = screen(&app);
        assert!(text.contains("Token"));
        assert!(text.contains("X-Trace"));
    }
}
