use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;
mod view;

/// Board edge length of the default game.
pub const BOARD_SIZE: Coord = 8;

/// Mines requested for the default game.
pub const MINE_COUNT: CellCount = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the requested mine count into the board capacity.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.max(1);
        let size_y = size_y.max(1);
        let mines = mines.min(mult(size_x, size_y));
        Self::new_unchecked((size_x, size_y), mines)
    }

    /// Validating constructor for hosts that prefer an error over clamping.
    pub fn checked(size: Coord2, mines: CellCount) -> Result<Self> {
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((BOARD_SIZE, BOARD_SIZE), MINE_COUNT)
    }
}

/// Hidden ground-truth layer: which cells hold mines. Fixed at generation
/// time, never shown to the player directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    size: Coord2,
    mines: HashSet<Coord2>,
}

impl MineField {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines = HashSet::with_capacity(mine_coords.len());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines.insert(coords);
        }
        Ok(Self { size, mines })
    }

    pub(crate) fn from_mine_set(size: Coord2, mines: HashSet<Coord2>) -> Self {
        Self { size, mines }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            mines: self.mine_count(),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines.contains(&coords)
    }

    pub fn mine_coords(&self) -> &HashSet<Coord2> {
        &self.mines
    }

    /// Mines among the up-to-8 in-bounds neighbors, computed on demand.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap()
    }

    pub(crate) fn validate_coords(&self, coords: Coord2) -> Option<Coord2> {
        (coords.0 < self.size.0 && coords.1 < self.size.1).then_some(coords)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }
}

/// Outcome of a reveal action.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    /// The cell was safe; carries the adjacency count now showing on it.
    Revealed(u8),
    /// The cell was a mine; the loss fuse is burning.
    Detonated,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_shipped_board() {
        let config = GameConfig::default();
        assert_eq!(config.size, (8, 8));
        assert_eq!(config.mines, 10);
        assert_eq!(config.total_cells(), 64);
    }

    #[test]
    fn new_clamps_mines_to_board_capacity() {
        let config = GameConfig::new((3, 3), 100);
        assert_eq!(config.mines, 9);
    }

    #[test]
    fn checked_rejects_overfull_boards() {
        assert_eq!(
            GameConfig::checked((3, 3), 10),
            Err(GameError::TooManyMines)
        );
        assert!(GameConfig::checked((3, 3), 9).is_ok());
    }

    #[test]
    fn from_mine_coords_rejects_positions_off_the_board() {
        assert_eq!(
            MineField::from_mine_coords((4, 4), &[(1, 1), (4, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn duplicate_mine_coords_collapse_into_the_set() {
        let field = MineField::from_mine_coords((4, 4), &[(1, 1), (1, 1), (2, 2)]).unwrap();
        assert_eq!(field.mine_count(), 2);
    }

    #[test]
    fn corner_adjacency_counts_only_the_three_in_bounds_neighbors() {
        // 8x8 board: of (0,0)'s possible neighbors (0,1), (1,0), (1,1), two
        // hold mines; the far mine must not leak into the count.
        let field = MineField::from_mine_coords((8, 8), &[(0, 1), (1, 1), (5, 5)]).unwrap();
        assert_eq!(field.adjacent_mine_count((0, 0)), 2);
    }

    #[test]
    fn adjacency_count_excludes_the_cell_itself() {
        let field = MineField::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        assert_eq!(field.adjacent_mine_count((1, 1)), 0);
        assert_eq!(field.adjacent_mine_count((0, 0)), 1);
    }

    #[test]
    fn full_board_adjacency_is_bounded_by_neighbor_count() {
        let all: Vec<Coord2> = (0..3)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .collect();
        let field = MineField::from_mine_coords((3, 3), &all).unwrap();
        assert_eq!(field.adjacent_mine_count((0, 0)), 3);
        assert_eq!(field.adjacent_mine_count((1, 0)), 5);
        assert_eq!(field.adjacent_mine_count((1, 1)), 8);
    }
}
