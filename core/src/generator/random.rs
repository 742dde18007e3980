use ndarray::Array2;
use rand::prelude::*;

use super::*;
use crate::{CellCount, ToNdIndex};

/// Uniform rejection sampling: draw `(row, col)` pairs, skip already-mined
/// cells, stop once the budget is placed. Termination requires
/// `mines < rows * columns`, which board construction enforces.
#[derive(Clone, Debug)]
pub struct RandomGenerator {
    rng: SmallRng,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MinefieldGenerator for RandomGenerator {
    fn generate(&mut self, config: GameConfig) -> Array2<bool> {
        let total_cells = config.total_cells();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        // full boards need no sampling; only fixed-layout boards get here
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "minefield already full, requested {} mines but only {} fit",
                    config.mines,
                    total_cells
                );
            }
            mines.fill(true);
            return mines;
        }

        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;
        while placed < config.mines {
            draws += 1;
            let row = self.rng.random_range(0..config.rows);
            let col = self.rng.random_range(0..config.columns);

            let slot = &mut mines[(row, col).to_nd_index()];
            if !*slot {
                *slot = true;
                placed += 1;
            }
        }
        log::debug!("placed {placed} mines in {draws} draws");

        mines
    }
}
