use crate::*;
pub use scatter::*;

mod scatter;

/// Strategy seam for producing the hidden mine layout of a new game.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineField;
}
