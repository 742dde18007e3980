use serde::{Deserialize, Serialize};

/// Per-cell board state, owned exclusively by [`Board`](crate::Board).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    flagged: bool,
    covered: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub fn set_mine(&mut self, mine: bool) {
        self.mine = mine;
    }

    pub const fn is_covered(self) -> bool {
        self.covered
    }

    /// One-way: a cell never becomes covered again until the grid is rebuilt.
    pub fn uncover(&mut self) {
        self.covered = false;
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }

    pub const fn is_covered_mine(self) -> bool {
        self.covered && self.mine
    }

    /// Empty cells are the only ones a cascade expands through.
    pub const fn is_empty(self) -> bool {
        !self.mine && self.adjacent_mines == 0
    }

    /// Defined only for non-mine cells; mines keep the initial zero.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            mine: false,
            flagged: false,
            covered: true,
            adjacent_mines: 0,
        }
    }
}

/// Render symbol for one cell, derived from cell state and game status.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellDisplay {
    Covered,
    Flag,
    WrongFlag,
    Mine,
    /// Revealed cell carrying its adjacency count; `Open(0)` renders blank.
    Open(u8),
}

impl CellDisplay {
    /// Whether the symbol is visually closed.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Covered | Self::Flag | Self::WrongFlag)
    }
}
