use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Tile {
    Hidden,
    Revealed(u8),
    Flagged,
    /// The mine the player stepped on.
    Exploded,
}

impl Tile {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Hidden
    }
}
