use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::{FOCUSED_ITEM_BG, centered_rect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserOutcome {
    Pending,
    /// Index into the options the chooser was opened with.
    Chosen(usize),
    Cancelled,
}

/// A modal with a message and a vertical list of options.
#[derive(Debug, Default)]
pub struct Chooser {
    pub visible: bool,
    message: String,
    options: Vec<String>,
    selected: usize,
}

impl Chooser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<S: Into<String>>(&mut self, message: impl Into<String>, options: impl IntoIterator<Item = S>) {
        self.visible = true;
        self.message = message.into();
        self.options = options.into_iter().map(Into::into).collect();
        self.selected = 0;
    }

    /// Pre-select an option (e.g. the current auth mode).
    pub fn select(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = index;
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.message.clear();
        self.options.clear();
        self.selected = 0;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ChooserOutcome {
        let len = self.options.len();
        match key.code {
            KeyCode::Esc => {
                self.close();
                ChooserOutcome::Cancelled
            }
            KeyCode::Enter if len > 0 => {
                let chosen = self.selected;
                self.close();
                ChooserOutcome::Chosen(chosen)
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') if len > 0 => {
                self.selected = (self.selected + 1) % len;
                ChooserOutcome::Pending
            }
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') if len > 0 => {
                self.selected = (self.selected + len - 1) % len;
                ChooserOutcome::Pending
            }
            _ => ChooserOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let widest = self
            .options
            .iter()
            .map(|o| o.len())
            .chain(std::iter::once(self.message.len()))
            .max()
            .unwrap_or(10) as u16;
        let width = (widest + 6).min(area.width.saturating_sub(4));
        let message_rows = if self.message.is_empty() { 0 } else { 2 };
        let height = (self.options.len() as u16 + message_rows + 2).min(area.height);
        let popup = centered_rect(width, height, area);

        let mut lines = Vec::new();
        if !self.message.is_empty() {
            lines.push(Line::from(self.message.as_str()).alignment(Alignment::Center));
            lines.push(Line::from(""));
        }
        for (i, option) in self.options.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .bg(FOCUSED_ITEM_BG)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!(" {option} "), style)).alignment(Alignment::Center));
        }

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: true }),
            popup,
        );
    }
}
