use tracing::debug;

use crate::compose::AuthMode;
use crate::cursor::{FocusCursor, Position};
use crate::navigation::{self, Direction};
use crate::panel::{
    ButtonAction, CONTENT_TYPE_LABEL, Field, METHOD_LABEL, Panel, PanelId, Panels, URL_LABEL,
};

/// All panel contents plus the focus cursor.
///
/// Owned and mutated by the input loop only; the renderer reads it through
/// a shared borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub(crate) panels: Panels,
    pub(crate) cursor: FocusCursor,
    pub(crate) auth_mode: AuthMode,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            panels: Panels::new(),
            cursor: FocusCursor::start(),
            auth_mode: AuthMode::None,
        }
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn cursor(&self) -> FocusCursor {
        self.cursor
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn panel(&self, id: PanelId) -> &Panel {
        self.panels.get(id)
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Number of header fields currently composed.
    pub fn header_count(&self) -> usize {
        self.panels.get(PanelId::Headers).fields.len()
    }

    /// Header fields as `(name, value)` pairs, in insertion order.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.panels
            .get(PanelId::Headers)
            .fields
            .iter()
            .map(|f| (f.label.clone(), f.input.value().to_string()))
            .collect()
    }

    /// Current value of a field, or `""` when the field is absent.
    pub fn field_value(&self, panel: PanelId, label: &str) -> &str {
        self.panels
            .get(panel)
            .field(label)
            .map(|f| f.input.value())
            .unwrap_or("")
    }

    pub fn method(&self) -> &str {
        self.field_value(PanelId::Request, METHOD_LABEL)
    }

    pub fn url(&self) -> &str {
        self.field_value(PanelId::Request, URL_LABEL)
    }

    pub fn content_type(&self) -> &str {
        self.field_value(PanelId::Request, CONTENT_TYPE_LABEL)
    }

    pub fn is_focused(&self, panel: PanelId, position: Position) -> bool {
        self.cursor.panel == panel && self.cursor.position == position
    }

    pub fn focused_field(&self) -> Option<&Field> {
        match self.cursor.position {
            Position::Field(i) => self.panels.get(self.cursor.panel).fields.get(i),
            _ => None,
        }
    }

    pub fn focused_button(&self) -> Option<ButtonAction> {
        match self.cursor.position {
            Position::Button(i) => self
                .panels
                .get(self.cursor.panel)
                .buttons
                .get(i)
                .map(|b| b.action),
            _ => None,
        }
    }

    /// Label of the focused item, for the status line.
    pub fn focused_label(&self) -> &str {
        self.panels
            .get(self.cursor.panel)
            .label_at(self.cursor.position)
            .unwrap_or("")
    }

    // ── Focus ────────────────────────────────────────────────────────

    pub fn navigate(&mut self, direction: Direction) {
        let next = navigation::navigate(self.cursor, &self.panels, direction);
        debug!(
            direction = direction.label(),
            from = ?self.cursor,
            to = ?next,
            "focus moved"
        );
        self.cursor = next;
    }

    /// Focus a panel at its entry point (first field, else first button).
    pub fn focus_panel(&mut self, panel: PanelId) {
        if let Some(cursor) = navigation::entry_point(&self.panels, panel) {
            self.cursor = cursor;
        }
    }

    /// Move the cursor to `target` if it names an existing item. Returns
    /// whether the cursor moved.
    pub fn focus_at(&mut self, target: FocusCursor) -> bool {
        if !target.is_valid_in(&self.panels) {
            return false;
        }
        self.cursor = target;
        true
    }

    /// Re-establish the cursor invariant after a mutation, keeping the
    /// cursor where it is when it is still valid.
    pub(crate) fn revalidate_cursor(&mut self) {
        if !self.cursor.is_valid_in(&self.panels) {
            self.focus_panel(self.cursor.panel);
        }
    }

    // ── Editing the focused field ────────────────────────────────────

    fn focused_field_mut(&mut self) -> Option<&mut Field> {
        match self.cursor.position {
            Position::Field(i) => self.panels.get_mut(self.cursor.panel).fields.get_mut(i),
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.input.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.input.backspace();
        }
    }

    pub fn cycle_choice_forward(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.input.cycle_forward();
        }
    }

    pub fn cycle_choice_backward(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.input.cycle_backward();
        }
    }

    /// Overwrite a text field's value. Returns false if the field is absent.
    pub fn set_field_text(&mut self, panel: PanelId, label: &str, text: &str) -> bool {
        match self.panels.get_mut(panel).field_mut(label) {
            Some(field) => {
                field.input.clear();
                for c in text.chars() {
                    field.input.insert_char(c);
                }
                true
            }
            None => false,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
