//! Focus navigation and panel composition for the resto request builder.

pub mod chooser;
pub mod compose;
pub mod cursor;
pub mod help_popup;
pub mod keybinds;
pub mod navigation;
pub mod panel;
pub mod prompt;
pub mod settings;
pub mod state;
pub mod ui;

pub use compose::{AuthMode, ComposeError};
pub use cursor::{FocusCursor, Position};
pub use navigation::Direction;
pub use panel::{ButtonAction, PanelId};
pub use state::FormState;
