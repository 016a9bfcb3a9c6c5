//! Directional focus navigation.
//!
//! The forms panels form one ring (Request → Auth → Headers → Request) and
//! the output panels a toggling pair. Down/Up walk the ring item by item;
//! Forward/Back jump between the groups through fixed per-panel tables.
//! Every transition is total: when a target panel has no fields the first
//! button is used, and when it has no items at all the next ring member is.

use crate::cursor::{FocusCursor, Position};
use crate::panel::{PanelId, Panels};

/// The four directional commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
    Forward,
    Back,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Forward => "forward",
            Direction::Back => "back",
        }
    }
}

/// Where a cross-group jump lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JumpTarget {
    View(PanelId),
    FirstField(PanelId),
    FirstButton(PanelId),
}

const FORMS_RING: [PanelId; 3] = [PanelId::Request, PanelId::Auth, PanelId::Headers];

// Indexed by `PanelId::index()`.
const FORWARD_JUMPS: [JumpTarget; 5] = [
    JumpTarget::View(PanelId::Response),
    JumpTarget::View(PanelId::Response),
    JumpTarget::View(PanelId::Status),
    JumpTarget::FirstField(PanelId::Request),
    JumpTarget::FirstButton(PanelId::Headers),
];

// Same as FORWARD_JUMPS except Status re-enters the auth fields.
const BACK_JUMPS: [JumpTarget; 5] = [
    JumpTarget::View(PanelId::Response),
    JumpTarget::View(PanelId::Response),
    JumpTarget::View(PanelId::Status),
    JumpTarget::FirstField(PanelId::Request),
    JumpTarget::FirstField(PanelId::Auth),
];

/// Compute the cursor after applying `direction`.
pub fn navigate(cursor: FocusCursor, panels: &Panels, direction: Direction) -> FocusCursor {
    match direction {
        Direction::Down => step_down(cursor, panels),
        Direction::Up => step_up(cursor, panels),
        Direction::Forward => jump(&FORWARD_JUMPS, cursor, panels),
        Direction::Back => jump(&BACK_JUMPS, cursor, panels),
    }
}

/// First item of `panel`, or of the next non-empty ring member.
pub fn entry_point(panels: &Panels, panel: PanelId) -> Option<FocusCursor> {
    if panel.is_output() {
        return Some(FocusCursor::view(panel));
    }
    ring_from(panel, ring_next).find_map(|id| {
        panels
            .get(id)
            .first_position()
            .map(|pos| FocusCursor::new(id, pos))
    })
}

/// Last item of `panel`, or of the previous non-empty ring member.
pub fn exit_point(panels: &Panels, panel: PanelId) -> Option<FocusCursor> {
    if panel.is_output() {
        return Some(FocusCursor::view(panel));
    }
    ring_from(panel, ring_prev).find_map(|id| {
        panels
            .get(id)
            .last_position()
            .map(|pos| FocusCursor::new(id, pos))
    })
}

/// Number of items across the whole forms ring.
pub fn forms_item_count(panels: &Panels) -> usize {
    FORMS_RING.iter().map(|&id| panels.get(id).len()).sum()
}

fn step_down(cursor: FocusCursor, panels: &Panels) -> FocusCursor {
    if cursor.panel.is_output() {
        return FocusCursor::view(output_partner(cursor.panel));
    }
    let panel = panels.get(cursor.panel);
    let Some(index) = panel.index_of(cursor.position) else {
        return entry_point(panels, cursor.panel).unwrap_or(cursor);
    };
    match panel.position_at(index + 1) {
        Some(next) => FocusCursor::new(cursor.panel, next),
        None => entry_point(panels, ring_next(cursor.panel)).unwrap_or(cursor),
    }
}

fn step_up(cursor: FocusCursor, panels: &Panels) -> FocusCursor {
    if cursor.panel.is_output() {
        return FocusCursor::view(output_partner(cursor.panel));
    }
    let panel = panels.get(cursor.panel);
    let Some(index) = panel.index_of(cursor.position) else {
        return entry_point(panels, cursor.panel).unwrap_or(cursor);
    };
    match index.checked_sub(1).and_then(|i| panel.position_at(i)) {
        Some(prev) => FocusCursor::new(cursor.panel, prev),
        None => exit_point(panels, ring_prev(cursor.panel)).unwrap_or(cursor),
    }
}

fn jump(table: &[JumpTarget; 5], cursor: FocusCursor, panels: &Panels) -> FocusCursor {
    let resolved = match table[cursor.panel.index()] {
        JumpTarget::View(id) => Some(FocusCursor::view(id)),
        JumpTarget::FirstField(id) => {
            if panels.get(id).fields.is_empty() {
                entry_point(panels, id)
            } else {
                Some(FocusCursor::new(id, Position::Field(0)))
            }
        }
        JumpTarget::FirstButton(id) => {
            if panels.get(id).buttons.is_empty() {
                entry_point(panels, id)
            } else {
                Some(FocusCursor::new(id, Position::Button(0)))
            }
        }
    };
    resolved.unwrap_or(cursor)
}

fn output_partner(panel: PanelId) -> PanelId {
    match panel {
        PanelId::Response => PanelId::Status,
        _ => PanelId::Response,
    }
}

fn ring_slot(panel: PanelId) -> usize {
    FORMS_RING.iter().position(|&id| id == panel).unwrap_or(0)
}

fn ring_next(panel: PanelId) -> PanelId {
    FORMS_RING[(ring_slot(panel) + 1) % FORMS_RING.len()]
}

fn ring_prev(panel: PanelId) -> PanelId {
    FORMS_RING[(ring_slot(panel) + FORMS_RING.len() - 1) % FORMS_RING.len()]
}

/// Every ring member once, starting at `start` and stepping with `step`.
fn ring_from(start: PanelId, step: fn(PanelId) -> PanelId) -> impl Iterator<Item = PanelId> {
    std::iter::successors(Some(start), move |&id| Some(step(id))).take(FORMS_RING.len())
}
