use crate::cursor::Position;

// ── Panel identity ───────────────────────────────────────────────────

/// One of the five on-screen panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Request,
    Auth,
    Headers,
    Response,
    Status,
}

/// The two families of panels. Navigation never mixes them except through
/// the Forward/Back jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Forms,
    Output,
}

impl PanelId {
    pub const ALL: [PanelId; 5] = [
        PanelId::Request,
        PanelId::Auth,
        PanelId::Headers,
        PanelId::Response,
        PanelId::Status,
    ];

    pub fn index(self) -> usize {
        match self {
            PanelId::Request => 0,
            PanelId::Auth => 1,
            PanelId::Headers => 2,
            PanelId::Response => 3,
            PanelId::Status => 4,
        }
    }

    pub fn group(self) -> Group {
        match self {
            PanelId::Request | PanelId::Auth | PanelId::Headers => Group::Forms,
            PanelId::Response | PanelId::Status => Group::Output,
        }
    }

    pub fn is_output(self) -> bool {
        self.group() == Group::Output
    }

    pub fn title(self) -> &'static str {
        match self {
            PanelId::Request => "Request Form",
            PanelId::Auth => "Authentication",
            PanelId::Headers => "Headers",
            PanelId::Response => "Response",
            PanelId::Status => "Status",
        }
    }
}

// ── Fixed request form contents ──────────────────────────────────────

pub const METHOD_LABEL: &str = "Request Method";
pub const URL_LABEL: &str = "URL";
pub const CONTENT_TYPE_LABEL: &str = "Content Type";

pub const METHOD_OPTIONS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD"];

pub const CONTENT_TYPE_OPTIONS: &[&str] = &[
    "none",
    "application/json",
    "application/graphql",
    "application/xml",
    "text/html",
    "text/plain",
];

// ── Items ────────────────────────────────────────────────────────────

/// Whether an item is a field or a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Field,
    Button,
}

/// What a field holds: free text, or one option out of a fixed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

impl FieldInput {
    pub fn empty_text() -> Self {
        FieldInput::Text(String::new())
    }

    pub fn choice(options: &'static [&'static str]) -> Self {
        FieldInput::Choice {
            options,
            selected: 0,
        }
    }

    /// The displayed value: the text itself, or the selected option.
    pub fn value(&self) -> &str {
        match self {
            FieldInput::Text(text) => text,
            FieldInput::Choice { options, selected } => options.get(*selected).copied().unwrap_or(""),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, FieldInput::Choice { .. })
    }

    pub fn clear(&mut self) {
        match self {
            FieldInput::Text(text) => text.clear(),
            FieldInput::Choice { selected, .. } => *selected = 0,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let FieldInput::Text(text) = self {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let FieldInput::Text(text) = self {
            text.pop();
        }
    }

    pub fn cycle_forward(&mut self) {
        if let FieldInput::Choice { options, selected } = self {
            if !options.is_empty() {
                *selected = (*selected + 1) % options.len();
            }
        }
    }

    pub fn cycle_backward(&mut self) {
        if let FieldInput::Choice { options, selected } = self {
            if !options.is_empty() {
                *selected = if *selected == 0 {
                    options.len() - 1
                } else {
                    *selected - 1
                };
            }
        }
    }
}

/// A focusable input. The label doubles as the lookup key for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub input: FieldInput,
}

impl Field {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            input: FieldInput::empty_text(),
        }
    }

    pub fn choice(label: impl Into<String>, options: &'static [&'static str]) -> Self {
        Self {
            label: label.into(),
            input: FieldInput::choice(options),
        }
    }
}

/// What pressing a button asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    FocusHeaders,
    FocusAuth,
    FocusRequest,
    EditBody,
    Send,
    AddHeader,
    RemoveHeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
}

impl Button {
    const fn new(label: &'static str, action: ButtonAction) -> Self {
        Self { label, action }
    }
}

const REQUEST_BUTTONS: [Button; 4] = [
    Button::new("Headers", ButtonAction::FocusHeaders),
    Button::new("Body", ButtonAction::EditBody),
    Button::new("Authorization", ButtonAction::FocusAuth),
    Button::new("Send", ButtonAction::Send),
];

const AUTH_BUTTONS: [Button; 2] = [
    Button::new("Headers", ButtonAction::FocusHeaders),
    Button::new("Request", ButtonAction::FocusRequest),
];

const HEADERS_BUTTONS: [Button; 2] = [
    Button::new("Add Header", ButtonAction::AddHeader),
    Button::new("Remove Header", ButtonAction::RemoveHeader),
];

// ── Panel ────────────────────────────────────────────────────────────

/// An ordered container of fields followed by buttons.
///
/// Navigation sees `fields ++ buttons` as one list. Output panels hold no
/// items; the panel itself takes focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: PanelId,
    pub fields: Vec<Field>,
    pub buttons: Vec<Button>,
}

impl Panel {
    /// Build a panel with its startup contents.
    pub fn new(id: PanelId) -> Self {
        let (fields, buttons) = match id {
            PanelId::Request => (
                vec![
                    Field::choice(METHOD_LABEL, METHOD_OPTIONS),
                    Field::text(URL_LABEL),
                    Field::choice(CONTENT_TYPE_LABEL, CONTENT_TYPE_OPTIONS),
                ],
                REQUEST_BUTTONS.to_vec(),
            ),
            PanelId::Auth => (Vec::new(), AUTH_BUTTONS.to_vec()),
            PanelId::Headers => (Vec::new(), HEADERS_BUTTONS.to_vec()),
            PanelId::Response | PanelId::Status => (Vec::new(), Vec::new()),
        };
        Self {
            id,
            fields,
            buttons,
        }
    }

    /// Number of focusable items (fields plus buttons).
    pub fn len(&self) -> usize {
        self.fields.len() + self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map a flat index in `fields ++ buttons` to a position.
    pub fn position_at(&self, index: usize) -> Option<Position> {
        if index < self.fields.len() {
            Some(Position::Field(index))
        } else if index < self.len() {
            Some(Position::Button(index - self.fields.len()))
        } else {
            None
        }
    }

    /// Inverse of [`Panel::position_at`]. `None` if the position does not
    /// name an item of this panel.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        match position {
            Position::Field(i) if i < self.fields.len() => Some(i),
            Position::Button(i) if i < self.buttons.len() => Some(self.fields.len() + i),
            _ => None,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        match position {
            Position::View => self.id.is_output(),
            _ => self.index_of(position).is_some(),
        }
    }

    pub fn first_position(&self) -> Option<Position> {
        self.position_at(0)
    }

    pub fn last_position(&self) -> Option<Position> {
        self.len().checked_sub(1).and_then(|i| self.position_at(i))
    }

    pub fn field_index(&self, label: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.label == label)
    }

    pub fn field(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }

    pub fn field_mut(&mut self, label: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.label == label)
    }

    /// Display label of the item at a position.
    pub fn label_at(&self, position: Position) -> Option<&str> {
        match position {
            Position::Field(i) => self.fields.get(i).map(|f| f.label.as_str()),
            Position::Button(i) => self.buttons.get(i).map(|b| b.label),
            Position::View => self.id.is_output().then(|| self.id.title()),
        }
    }
}

/// All five panels, indexed by [`PanelId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels([Panel; 5]);

impl Panels {
    pub fn new() -> Self {
        Self(PanelId::ALL.map(Panel::new))
    }

    pub fn get(&self, id: PanelId) -> &Panel {
        &self.0[id.index()]
    }

    pub fn get_mut(&mut self, id: PanelId) -> &mut Panel {
        &mut self.0[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.0.iter()
    }
}

impl Default for Panels {
    fn default() -> Self {
        Self::new()
    }
}
