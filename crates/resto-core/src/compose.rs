//! Runtime composition of the auth and headers panels.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cursor::{FocusCursor, Position};
use crate::panel::{Field, PanelId};
use crate::state::FormState;

pub const USERNAME_LABEL: &str = "Username";
pub const PASSWORD_LABEL: &str = "Password";
pub const TOKEN_LABEL: &str = "Token";

/// Authentication scheme. Determines the auth panel's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthMode {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "bearer")]
    BearerToken,
}

impl AuthMode {
    pub const ALL: [AuthMode; 3] = [AuthMode::None, AuthMode::Basic, AuthMode::BearerToken];

    pub fn label(self) -> &'static str {
        match self {
            AuthMode::None => "none",
            AuthMode::Basic => "basic auth",
            AuthMode::BearerToken => "bearer token",
        }
    }

    /// The auth panel's fields for this mode, in display order.
    pub fn field_labels(self) -> &'static [&'static str] {
        match self {
            AuthMode::None => &[],
            AuthMode::Basic => &[USERNAME_LABEL, PASSWORD_LABEL],
            AuthMode::BearerToken => &[TOKEN_LABEL],
        }
    }
}

/// Failure of a header composition action. State is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("invalid header name `{label}`")]
    InvalidLabel { label: String },
    #[error("no header named `{label}`")]
    NotFound { label: String },
}

/// Header names must be non-empty tokens: no whitespace, colons or control
/// characters.
fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == ':' || c.is_whitespace() || c.is_control())
}

impl FormState {
    /// Recompose the auth panel for `mode`.
    ///
    /// Fields that belong to the new mode keep their text; all others are
    /// dropped along with what was typed into them. A cursor on a dropped
    /// field moves to the auth panel's first remaining item.
    pub fn set_auth_mode(&mut self, mode: AuthMode) {
        let focused_label = match (self.cursor.panel, self.cursor.position) {
            (PanelId::Auth, Position::Field(i)) => self
                .panels
                .get(PanelId::Auth)
                .fields
                .get(i)
                .map(|f| f.label.clone()),
            _ => None,
        };

        let auth = self.panels.get_mut(PanelId::Auth);
        let mut previous = std::mem::take(&mut auth.fields);
        auth.fields = mode
            .field_labels()
            .iter()
            .map(|&label| match previous.iter().position(|f| f.label == label) {
                Some(i) => previous.remove(i),
                None => Field::text(label),
            })
            .collect();
        let dropped = previous.len();

        if let Some(label) = focused_label {
            match self.panels.get(PanelId::Auth).field_index(&label) {
                Some(i) => self.cursor = FocusCursor::new(PanelId::Auth, Position::Field(i)),
                None => self.focus_panel(PanelId::Auth),
            }
        }

        self.auth_mode = mode;
        info!(mode = mode.label(), dropped, "auth mode set");
    }

    /// Append a header field before the headers panel's buttons.
    pub fn add_header(&mut self, name: &str) -> Result<(), ComposeError> {
        let label = name.trim();
        if !is_valid_header_name(label) {
            warn!(label = name, "rejected header name");
            return Err(ComposeError::InvalidLabel {
                label: name.to_string(),
            });
        }

        self.panels
            .get_mut(PanelId::Headers)
            .fields
            .push(Field::text(label));
        info!(label, count = self.header_count(), "header added");
        Ok(())
    }

    /// Remove the first header field labelled `name`.
    pub fn remove_header(&mut self, name: &str) -> Result<(), ComposeError> {
        let label = name.trim();
        let headers = self.panels.get_mut(PanelId::Headers);
        let Some(index) = headers.field_index(label) else {
            warn!(label = name, "no such header to remove");
            return Err(ComposeError::NotFound {
                label: name.to_string(),
            });
        };
        headers.fields.remove(index);

        if self.cursor.panel == PanelId::Headers {
            match self.cursor.position {
                Position::Field(i) if i == index => {
                    self.cursor = FocusCursor::new(PanelId::Headers, Position::Button(0));
                }
                Position::Field(i) if i > index => {
                    self.cursor = FocusCursor::new(PanelId::Headers, Position::Field(i - 1));
                }
                _ => {}
            }
            self.revalidate_cursor();
        }

        info!(label, count = self.header_count(), "header removed");
        Ok(())
    }
}
