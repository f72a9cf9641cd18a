use hashbrown::HashSet;

use super::*;

/// Scatters mines by drawing uniformly random cells. A draw that lands on an
/// already-mined cell is not retried, so the placed count can fall short of
/// the request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScatterGenerator {
    seed: u64,
}

impl ScatterGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for ScatterGenerator {
    fn generate(self, config: GameConfig) -> MineField {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        if config.mines > total_cells {
            log::warn!(
                "requested {} mines but the board only fits {}",
                config.mines,
                total_cells
            );
        }

        let (size_x, size_y) = config.size;
        let mut mines: HashSet<Coord2> = HashSet::with_capacity(config.mines as usize);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut remaining = config.mines;
        while remaining > 0 {
            let x = rng.random_range(0..size_x);
            let y = rng.random_range(0..size_y);
            mines.insert((x, y));
            remaining -= 1;
        }

        // double check mine count
        let placed: CellCount = mines.len().try_into().unwrap();
        if placed != config.mines {
            log::warn!(
                "mine placement collided, requested {} but placed {}",
                config.mines,
                placed
            );
        }
        log::debug!("generated {}x{} minefield, {} mines", size_x, size_y, placed);

        MineField::from_mine_set(config.size, mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64, size: Coord2, mines: CellCount) -> MineField {
        ScatterGenerator::new(seed).generate(GameConfig::new_unchecked(size, mines))
    }

    #[test]
    fn every_mine_lands_on_the_board() {
        for seed in 0..32 {
            let field = generate(seed, (8, 8), 10);
            for &(x, y) in field.mine_coords() {
                assert!(x < 8 && y < 8, "mine ({x}, {y}) off an 8x8 board");
            }
        }
    }

    #[test]
    fn collisions_may_place_fewer_mines_but_never_more() {
        for seed in 0..32 {
            let field = generate(seed, (8, 8), 10);
            assert!(field.mine_count() <= 10);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_layout() {
        let a = generate(7, (8, 8), 10);
        let b = generate(7, (8, 8), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_mines_yields_an_empty_field() {
        let field = generate(1, (8, 8), 0);
        assert_eq!(field.mine_count(), 0);
    }

    #[test]
    fn saturated_request_cannot_overfill_the_board() {
        // 2x2 board, 4 requested: collisions are near-certain, the quirk is
        // that the shortfall is kept rather than re-rolled.
        let field = generate(3, (2, 2), 4);
        assert!(field.mine_count() <= 4);
        assert!(field.mine_count() >= 1);
    }
}
