use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::keybinds::is_text_input;
use crate::ui::centered_rect;

/// Result of feeding a key to an open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Submitted(String),
    Cancelled,
}

/// A one-line text prompt shown as a small bordered popup.
#[derive(Debug, Default)]
pub struct Prompt {
    pub visible: bool,
    label: String,
    input: String,
    /// Byte offset of the cursor in `input`.
    cursor: usize,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the prompt with a label and pre-filled text.
    pub fn open(&mut self, label: impl Into<String>, initial: &str) {
        self.visible = true;
        self.label = label.into();
        self.input = initial.to_string();
        self.cursor = self.input.len();
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.label.clear();
        self.input.clear();
        self.cursor = 0;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        match key.code {
            KeyCode::Enter => {
                let text = self.input.clone();
                self.close();
                PromptOutcome::Submitted(text)
            }
            KeyCode::Esc => {
                self.close();
                PromptOutcome::Cancelled
            }
            KeyCode::Char(c) if is_text_input(&key) => {
                self.input.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                PromptOutcome::Pending
            }
            KeyCode::Backspace => {
                if let Some((prev, _)) = self.input[..self.cursor].char_indices().next_back() {
                    self.input.drain(prev..self.cursor);
                    self.cursor = prev;
                }
                PromptOutcome::Pending
            }
            KeyCode::Left => {
                if let Some((prev, _)) = self.input[..self.cursor].char_indices().next_back() {
                    self.cursor = prev;
                }
                PromptOutcome::Pending
            }
            KeyCode::Right => {
                if let Some(c) = self.input[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
                PromptOutcome::Pending
            }
            KeyCode::Home => {
                self.cursor = 0;
                PromptOutcome::Pending
            }
            KeyCode::End => {
                self.cursor = self.input.len();
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = area.width.saturating_sub(4).min(60);
        let popup = centered_rect(width, 3, area);
        frame.render_widget(Clear, popup);

        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(popup);
        let label = format!("{}: ", self.label);
        let line = Line::from(vec![
            Span::styled(label.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(self.input.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), popup);

        let offset = label.width() + self.input[..self.cursor].width();
        let x = inner.x + (offset as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}
