use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use web_time::Instant;

use crate::*;

/// How long the board keeps accepting input after a mine is revealed before
/// the loss locks in. The beat exists so the host can play its losing sound
/// before the board freezes.
pub const LOSS_LOCK_DELAY: Duration = Duration::from_millis(1000);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
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
        Self::Playing
    }
}

/// Host notifications, drained with [`Game::poll_event`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mine was revealed; the losing sound should play now.
    Detonated { coords: Coord2 },
    /// The flag set matched the mine set exactly.
    Won,
    /// The loss fuse burned down and the board is locked.
    Lost,
}

/// Represents a game from start to finish: the hidden mine layout, the
/// player-visible grid, the flag set, and the global status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    mine_field: MineField,
    grid: Array2<Tile>,
    flags: HashSet<Coord2>,
    state: GameStatus,
    triggered_mine: Option<Coord2>,
    #[serde(skip)]
    fuse: Option<Instant>,
    loss_delay: Duration,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// New game with an entropy seed.
    pub fn new(config: GameConfig) -> Self {
        use rand::prelude::*;
        let seed: u64 = SmallRng::from_os_rng().random();
        Self::with_seed(config, seed)
    }

    /// Deterministic constructor; the same seed reproduces the same layout.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mine_field = ScatterGenerator::new(seed).generate(config);
        Self::from_parts(config, seed, mine_field)
    }

    /// Builds a game over a hand-placed layout.
    pub fn from_mine_field(mine_field: MineField) -> Self {
        let config = mine_field.game_config();
        Self::from_parts(config, 0, mine_field)
    }

    fn from_parts(config: GameConfig, seed: u64, mine_field: MineField) -> Self {
        let size = mine_field.size();
        Self {
            config,
            seed,
            mine_field,
            grid: Array2::default(size.to_nd_index()),
            flags: HashSet::new(),
            state: GameStatus::default(),
            triggered_mine: None,
            fuse: None,
            loss_delay: LOSS_LOCK_DELAY,
            events: VecDeque::new(),
        }
    }

    /// Overrides the loss-lock beat, for hosts that pace their own audio.
    pub fn with_loss_delay(mut self, delay: Duration) -> Self {
        self.loss_delay = delay;
        self
    }

    /// Global status with an elapsed loss fuse already accounted for.
    pub fn status(&self) -> GameStatus {
        if matches!(self.state, GameStatus::Playing) && self.loss_due() {
            GameStatus::Lost
        } else {
            self.state
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_field.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_field.mine_count()
    }

    /// How many mines have not been flagged yet.
    pub fn mines_left(&self) -> isize {
        (self.mine_field.mine_count() as isize) - (self.flags.len() as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Tile {
        self.grid[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_field.contains_mine(coords)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_field.adjacent_mine_count(coords)
    }

    pub fn flagged_coords(&self) -> &HashSet<Coord2> {
        &self.flags
    }

    pub fn can_interact_at(&self, coords: Coord2) -> bool {
        !self.is_game_over()
            && self.mine_field.validate_coords(coords).is_some()
            && self.cell_at(coords).is_unrevealed()
    }

    /// Drains one pending host notification. Also settles an elapsed loss
    /// fuse, so a host polling every frame observes `Lost` exactly once.
    pub fn poll_event(&mut self) -> Option<GameEvent> {
        self.settle_fuse();
        self.events.pop_front()
    }

    /// Reveals a hidden cell. Safe cells get their adjacency count; a mine
    /// marks the cell exploded and lights the loss fuse. Finished games,
    /// out-of-range coordinates, and non-hidden cells are no-ops.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        self.settle_fuse();

        let Some(coords) = self.mine_field.validate_coords(coords) else {
            return RevealOutcome::NoChange;
        };
        if self.state.is_finished() || !matches!(self.cell_at(coords), Tile::Hidden) {
            return RevealOutcome::NoChange;
        }

        if self.mine_field.contains_mine(coords) {
            self.grid[coords.to_nd_index()] = Tile::Exploded;
            // A second mine hit inside the window re-notifies but never
            // extends the already-lit fuse.
            if self.triggered_mine.is_none() {
                self.triggered_mine = Some(coords);
                self.fuse = Some(Instant::now());
            }
            log::debug!("mine hit at {:?}, loss locks in {:?}", coords, self.loss_delay);
            self.events.push_back(GameEvent::Detonated { coords });
            RevealOutcome::Detonated
        } else {
            let count = self.mine_field.adjacent_mine_count(coords);
            self.grid[coords.to_nd_index()] = Tile::Revealed(count);
            log::debug!("revealed tile at {:?}, mine count: {}", coords, count);
            RevealOutcome::Revealed(count)
        }
    }

    /// Toggles a flag. Placing a flag evaluates the win condition; removing
    /// one returns early without checking. Finished games, out-of-range
    /// coordinates, and revealed cells are no-ops.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        self.settle_fuse();

        let Some(coords) = self.mine_field.validate_coords(coords) else {
            return FlagOutcome::NoChange;
        };
        if self.state.is_finished() {
            return FlagOutcome::NoChange;
        }

        match self.cell_at(coords) {
            Tile::Flagged => {
                self.grid[coords.to_nd_index()] = Tile::Hidden;
                self.flags.remove(&coords);
                FlagOutcome::Unflagged
            }
            Tile::Hidden => {
                self.grid[coords.to_nd_index()] = Tile::Flagged;
                self.flags.insert(coords);
                if self.flags == *self.mine_field.mine_coords() {
                    log::debug!("flag set matches mine set, game won");
                    self.state = GameStatus::Won;
                    self.events.push_back(GameEvent::Won);
                }
                FlagOutcome::Flagged
            }
            Tile::Revealed(_) | Tile::Exploded => FlagOutcome::NoChange,
        }
    }

    /// Starts a new round: fresh layout, cleared board and flags, status back
    /// to playing. The next seed derives from the current one, so a session
    /// stays reproducible end to end.
    pub fn reset(&mut self) {
        use rand::prelude::*;
        self.seed = SmallRng::seed_from_u64(self.seed).random();
        self.mine_field = ScatterGenerator::new(self.seed).generate(self.config);
        self.grid = Array2::default(self.mine_field.size().to_nd_index());
        self.flags.clear();
        self.state = GameStatus::default();
        self.triggered_mine = None;
        self.fuse = None;
        self.events.clear();
        log::debug!("board reset, {} mines placed", self.mine_field.mine_count());
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_game(self)
    }

    fn loss_due(&self) -> bool {
        match (self.triggered_mine, self.fuse) {
            (Some(_), Some(lit_at)) => lit_at.elapsed() >= self.loss_delay,
            // A restored game carries no live fuse; a pending detonation
            // resolves immediately.
            (Some(_), None) => true,
            _ => false,
        }
    }

    fn settle_fuse(&mut self) {
        if matches!(self.state, GameStatus::Playing) && self.loss_due() {
            log::debug!("loss fuse burned down, locking the board");
            self.state = GameStatus::Lost;
            self.events.push_back(GameEvent::Lost);
        }
    }
}
