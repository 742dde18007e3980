use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions: `InProgress -> Won`, `InProgress -> Lost`, and back to
/// `InProgress` only through [`Board::new_game`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome of a reveal command.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have changed the visible board.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag command.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// One game instance: the cell grid, the mine budget, and the status state
/// machine. Commands are total; out-of-range coordinates are ignored so a
/// pointer-driven frontend can forward clicks unchecked.
#[derive(Clone, Debug)]
pub struct Board {
    config: GameConfig,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    flag_count: CellCount,
    status: GameStatus,
    placer: RandomGenerator,
}

impl Board {
    /// Validates the config and starts the first game immediately; the grid
    /// never exists half-built.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomGenerator::new())
    }

    /// Deterministic board: this and every later `new_game` draw from the
    /// seeded stream.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomGenerator::with_seed(seed))
    }

    fn with_generator(config: GameConfig, placer: RandomGenerator) -> Result<Self> {
        config.validate()?;

        let mut board = Self {
            config,
            grid: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flag_count: 0,
            status: Default::default(),
            placer,
        };
        board.new_game();
        Ok(board)
    }

    /// Fixed mine layout, mainly for scripted scenarios. Duplicates collapse;
    /// the budget is the distinct mined-cell count. Unlike the random
    /// constructors this may fill the whole grid.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let (rows, columns) = size;
        if rows == 0 || columns == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= rows || coords.1 >= columns {
                return Err(GameError::InvalidCoords);
            }
            mask[coords.to_nd_index()] = true;
        }
        let mines = mask.iter().filter(|&&is_mine| is_mine).count();

        let mut board = Self {
            config: GameConfig::new(rows, columns, mines.try_into().unwrap()),
            grid: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flag_count: 0,
            status: Default::default(),
            placer: RandomGenerator::new(),
        };
        board.install_mines(&mask);
        Ok(board)
    }

    /// Rebuilds the grid for a fresh game: every cell covered and unflagged,
    /// a new random layout, adjacency counts recomputed.
    pub fn new_game(&mut self) {
        let mask = self.placer.generate(self.config);
        self.install_mines(&mask);
    }

    fn install_mines(&mut self, mask: &Array2<bool>) {
        self.grid = Array2::default(self.config.size().to_nd_index());
        self.revealed_count = 0;
        self.flag_count = 0;
        self.status = GameStatus::InProgress;

        for (index, &is_mine) in mask.indexed_iter() {
            if is_mine {
                self.grid[index].set_mine(true);
            }
        }
        self.compute_adjacency();
        log::debug!(
            "new game: {}x{} with {} mines",
            self.config.rows, self.config.columns, self.config.mines
        );
    }

    fn compute_adjacency(&mut self) {
        for row in 0..self.config.rows {
            for col in 0..self.config.columns {
                let coords = (row, col);
                if self.grid[coords.to_nd_index()].is_mine() {
                    continue;
                }

                let count: u8 = self
                    .grid
                    .iter_moore(coords)
                    .filter(|&pos| self.grid[pos.to_nd_index()].is_mine())
                    .count()
                    .try_into()
                    .unwrap();
                self.grid[coords.to_nd_index()].set_adjacent_mines(count);
            }
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn columns(&self) -> Coord {
        self.config.columns
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mine budget minus placed flags; negative when over-flagged.
    pub fn remaining_flags(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    /// Pure render projection, queried every frame by the drawing layer.
    pub fn cell_display(&self, coords: Coord2) -> CellDisplay {
        use CellDisplay::*;

        let cell = self.grid[coords.to_nd_index()];
        match self.status {
            GameStatus::Lost => match (cell.is_mine(), cell.is_flagged()) {
                (true, true) => Flag,
                (true, false) => Mine,
                (false, true) => WrongFlag,
                (false, false) if cell.is_covered() => Covered,
                (false, false) => Open(cell.adjacent_mines()),
            },
            // flag checked before cover: a cascade can uncover a flagged
            // cell and the flag keeps showing until the game ends
            _ => {
                if cell.is_flagged() {
                    Flag
                } else if cell.is_covered() {
                    Covered
                } else {
                    Open(cell.adjacent_mines())
                }
            }
        }
    }

    /// Uncovers a cell. Out-of-bounds targets, finished games, flags, and
    /// already-open cells are all ignored.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.in_bounds(coords) || self.status.is_finished() {
            return NoChange;
        }

        let cell = self.grid[coords.to_nd_index()];
        if cell.is_flagged() || !cell.is_covered() {
            return NoChange;
        }

        self.grid[coords.to_nd_index()].uncover();

        if cell.is_mine() {
            log::debug!("hit mine at {coords:?}");
            self.status = GameStatus::Lost;
            self.apply_loss_reveal();
            return HitMine;
        }

        self.revealed_count += 1;
        if cell.is_empty() {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.config.safe_cells() {
            log::debug!("all safe cells revealed, game won");
            self.status = GameStatus::Won;
            Won
        } else {
            Revealed
        }
    }

    /// Flips the flag on a covered cell. No clamp on the budget: the
    /// remaining-flag count goes negative when the player over-flags.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        use FlagOutcome::*;

        if !self.in_bounds(coords) || self.status.is_finished() {
            return NoChange;
        }

        let index = coords.to_nd_index();
        if !self.grid[index].is_covered() {
            return NoChange;
        }

        if self.grid[index].is_flagged() {
            self.grid[index].set_flagged(false);
            self.flag_count -= 1;
        } else {
            self.grid[index].set_flagged(true);
            self.flag_count += 1;
        }
        Changed
    }

    /// Classic cascade: expands orthogonally through the connected region of
    /// empty cells, uncovering the numbered Moore border of each one.
    /// Iterative so the work never touches the call stack; the visited set
    /// is scoped to this single pass.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut visited = HashSet::from([origin]);
        let mut to_visit = VecDeque::from([origin]);

        while let Some(coords) = to_visit.pop_front() {
            log::trace!("cascade visiting {coords:?}");

            // numbered cells border the region: shown, never expanded
            for pos in self.grid.iter_moore(coords) {
                let cell = self.grid[pos.to_nd_index()];
                if cell.is_covered() && !cell.is_mine() && !cell.is_empty() {
                    self.uncover_counted(pos);
                }
            }

            for pos in self.grid.iter_orthogonal(coords) {
                if !visited.insert(pos) {
                    continue;
                }
                if self.grid[pos.to_nd_index()].is_empty() {
                    self.uncover_counted(pos);
                    to_visit.push_back(pos);
                }
            }
        }
    }

    /// Idempotent uncover that keeps the safe-cell tally accurate.
    fn uncover_counted(&mut self, coords: Coord2) {
        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.is_covered() {
            cell.uncover();
            self.revealed_count += 1;
        }
    }

    /// One-time transition into `Lost`: every covered mine becomes visible,
    /// so later display queries stay read-only.
    fn apply_loss_reveal(&mut self) {
        for cell in self.grid.iter_mut() {
            if cell.is_covered_mine() {
                cell.uncover();
            }
        }
    }

    fn in_bounds(&self, coords: Coord2) -> bool {
        coords.0 < self.config.rows && coords.1 < self.config.columns
    }
}
