use ndarray::Array2;

use crate::GameConfig;

pub use random::*;

mod random;

/// Placement strategy producing the mine mask a new game is built from.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Array2<bool>;
}
