use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::centered_rect;

/// One shortcut line in the help popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub section: &'static str,
    pub keys: &'static str,
    pub description: &'static str,
}

const fn entry(section: &'static str, keys: &'static str, description: &'static str) -> HelpEntry {
    HelpEntry {
        section,
        keys,
        description,
    }
}

/// Every shortcut resto understands, grouped by section.
pub const SHORTCUTS: &[HelpEntry] = &[
    entry("Focus", "Ctrl-j / Tab", "Next item (wraps across forms)"),
    entry("Focus", "Ctrl-k / S-Tab", "Previous item"),
    entry("Focus", "Ctrl-l", "Jump forward between forms and output"),
    entry("Focus", "Ctrl-h / Alt-h", "Jump back between forms and output"),
    entry("Editing", "typing", "Edit the focused text field"),
    entry("Editing", "Enter / Space", "Press button / cycle choice"),
    entry("Editing", "Left / Right", "Cycle choice"),
    entry("Editing", "Ctrl-a", "Select authentication type"),
    entry("App", "Ctrl-p", "Open resto panel"),
    entry("App", "Ctrl-w", "This help"),
    entry("App", "Ctrl-e", "Open settings"),
    entry("App", "Ctrl-u", "Check for updates"),
    entry("App", "Ctrl-q", "Quit"),
];

/// The help popup state.
#[derive(Debug, Default)]
pub struct HelpPopup {
    pub visible: bool,
    scroll: u16,
}

impl HelpPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.scroll = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Handle a key while visible. Esc, q and Ctrl-w close the popup.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('w') => self.hide(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let lines = build_lines();
        let width = area.width.saturating_sub(8).min(64);
        let height = area.height.saturating_sub(4).min(lines.len() as u16 + 2);
        let popup = centered_rect(width, height, area);

        let max_scroll = (lines.len() as u16).saturating_sub(height.saturating_sub(2));
        let block = Block::default()
            .title(" Welcome to resto! ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll.min(max_scroll), 0)),
            popup,
        );
    }
}

fn build_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(" Build and send HTTP requests from your terminal."),
        Line::from(""),
    ];
    let mut section = "";
    for e in SHORTCUTS {
        if e.section != section {
            if !section.is_empty() {
                lines.push(Line::from(""));
            }
            section = e.section;
            lines.push(Line::from(Span::styled(
                format!(" {section}"),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>15} ", e.keys), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::raw(e.description),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Esc/q  close    j/k  scroll",
        Style::default().add_modifier(Modifier::DIM),
    )));
    lines
}
