//! Top-level app shell: a tab switcher in front of the board view.

use crate::view::BoardView;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Board,
    Statistics,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Board, Tab::Statistics];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Board => "Board",
            Tab::Statistics => "Statistics",
        }
    }
}

/// Owns the active tab and the board view state.
///
/// The statistics tab shares nothing with the board; switching tabs never
/// touches board state, so a half-filled form survives a round trip.
#[derive(Debug, Default)]
pub struct AppShell {
    active: Tab,
    board: BoardView,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut BoardView {
        &mut self.board
    }
}
