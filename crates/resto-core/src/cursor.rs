use crate::panel::{ItemKind, PanelId, Panels};

/// Where inside a panel the focus sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Field(usize),
    Button(usize),
    /// The whole panel. Only output panels are focused this way.
    View,
}

impl Position {
    pub fn kind(self) -> Option<ItemKind> {
        match self {
            Position::Field(_) => Some(ItemKind::Field),
            Position::Button(_) => Some(ItemKind::Button),
            Position::View => None,
        }
    }

    pub fn ordinal(self) -> Option<usize> {
        match self {
            Position::Field(i) | Position::Button(i) => Some(i),
            Position::View => None,
        }
    }
}

/// The single pointer to the focused item.
///
/// Invariant: `position` names an item that exists in `panel`'s current
/// contents. Every mutation of the panels is followed by a relocation that
/// restores this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCursor {
    pub panel: PanelId,
    pub position: Position,
}

impl FocusCursor {
    pub const fn new(panel: PanelId, position: Position) -> Self {
        Self { panel, position }
    }

    /// Startup focus: the request form's first field.
    pub const fn start() -> Self {
        Self::new(PanelId::Request, Position::Field(0))
    }

    pub const fn view(panel: PanelId) -> Self {
        Self::new(panel, Position::View)
    }

    pub fn is_valid_in(&self, panels: &Panels) -> bool {
        panels.get(self.panel).contains(self.position)
    }
}

impl Default for FocusCursor {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_cursor_is_valid() {
        let panels = Panels::new();
        assert!(FocusCursor::start().is_valid_in(&panels));
    }

    #[test]
    fn test_cursor_validity_checks_panel_contents() {
        let panels = Panels::new();
        assert!(FocusCursor::view(PanelId::Status).is_valid_in(&panels));
        assert!(!FocusCursor::view(PanelId::Request).is_valid_in(&panels));
        assert!(!FocusCursor::new(PanelId::Auth, Position::Field(0)).is_valid_in(&panels));
        assert!(FocusCursor::new(PanelId::Headers, Position::Button(1)).is_valid_in(&panels));
        assert!(!FocusCursor::new(PanelId::Headers, Position::Button(2)).is_valid_in(&panels));
    }

    #[test]
    fn test_position_kind_and_ordinal() {
        assert_eq!(Position::Field(2).kind(), Some(ItemKind::Field));
        assert_eq!(Position::Button(1).ordinal(), Some(1));
        assert_eq!(Position::View.kind(), None);
    }
}
