use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable snapshot of everything the presentation layer may draw. Taken
/// per frame or per update; the engine itself is never handed out mutably.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub mines_left: isize,
    pub status: GameStatus,
    pub tiles: Array2<Tile>,
}

impl BoardView {
    pub fn from_game(game: &Game) -> Self {
        let size = game.size();
        let mut tiles = Array2::default(size.to_nd_index());

        let (x_end, y_end) = size;
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                tiles[coords.to_nd_index()] = game.cell_at(coords);
            }
        }

        Self {
            size,
            mine_count: game.total_mines(),
            mines_left: game.mines_left(),
            status: game.status(),
            tiles,
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_game_maps_revealed_and_flagged_cells() {
        let field = MineField::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut game = Game::from_mine_field(field);

        game.reveal((1, 1));
        game.toggle_flag((0, 0));

        let view = game.view();

        assert_eq!(view.size, (2, 2));
        assert_eq!(view.mine_count, 1);
        assert_eq!(view.mines_left, 0);
        assert_eq!(view.status, GameStatus::Won);
        assert_eq!(view.tile_at((1, 1)), Tile::Revealed(1));
        assert_eq!(view.tile_at((0, 0)), Tile::Flagged);
        assert_eq!(view.tile_at((0, 1)), Tile::Hidden);
    }

    #[test]
    fn a_snapshot_does_not_follow_later_mutations() {
        let field = MineField::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut game = Game::from_mine_field(field);

        let before = game.view();
        game.reveal((1, 0));

        assert_eq!(before.tile_at((1, 0)), Tile::Hidden);
        assert_eq!(game.view().tile_at((1, 0)), Tile::Revealed(1));
    }
}
