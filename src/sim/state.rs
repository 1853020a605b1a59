//! Game state and lifecycle
//!
//! Everything the tick pipeline touches lives in one `GameState` that is passed
//! by reference, so tests can build isolated instances and step them
//! deterministically.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, Tick};
use super::formation::Formation;
use super::player::Player;
use super::projectile::ProjectilePool;
use crate::consts::*;

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A full reset ran; `game` counts starts since the process began
    GameStarted { game: u32 },
    PlayerShot,
    PlayerHit { lives: u8 },
    PlayerExploded,
    AlienKilled { row: usize, col: usize, points: u32 },
    AliensHidden { count: usize },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub clock: Clock,
    pub player: Player,
    pub formation: Formation,
    pub projectiles: ProjectilePool,
    /// Score of the current game
    pub score: u32,
    /// Number of game starts, including respawns
    pub games_started: u32,
    /// Formation speed applied on every game start
    pub formation_speed: u8,
    /// Events produced by the last tick (cleared at the start of each tick)
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and start the first game
    pub fn new(seed: u64) -> Self {
        Self::with_formation_speed(seed, ALIENS_INITIAL_SPEED)
    }

    pub fn with_formation_speed(seed: u64, formation_speed: u8) -> Self {
        let mut state = Self {
            seed,
            clock: Clock::new(),
            player: Player::spawn(),
            formation: Formation::new(formation_speed),
            projectiles: ProjectilePool::default(),
            score: 0,
            games_started: 0,
            formation_speed,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.start_game();
        state
    }

    /// Current tick
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Full reset: fresh ship, every unit alive, every projectile slot freed.
    ///
    /// The clock and RNG keep running across games.
    pub fn start_game(&mut self) {
        self.player = Player::spawn();
        self.formation = Formation::new(self.formation_speed);
        self.projectiles.clear();
        self.score = 0;
        self.games_started += 1;
        self.events.push(GameEvent::GameStarted {
            game: self.games_started,
        });
        log::info!(
            "Game {} started at tick {}",
            self.games_started,
            self.clock.now()
        );
    }

    /// Record a kill and its score
    pub(super) fn award(&mut self, row: usize, col: usize) {
        let points = self.formation.units[row][col].points();
        self.score += points;
        self.events.push(GameEvent::AlienKilled { row, col, points });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::Owner;
    use glam::IVec2;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345);
        assert_eq!(state.now(), 0);
        assert_eq!(state.games_started, 1);
        assert_eq!(state.player, Player::spawn());
        assert_eq!(state.formation, Formation::default());
        assert_eq!(state.projectiles.occupied(), 0);
        assert_eq!(state.events, vec![GameEvent::GameStarted { game: 1 }]);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut state = GameState::new(7);
        // Dirty every part of the state
        state.player.pos.x = 12;
        state.player.lives = 1;
        state.player.last_hit = Some(3);
        state.formation.kill(1, 1, 4);
        state.formation.offset = IVec2::new(80, 50);
        state.formation.edges.left = 57;
        state.projectiles.spawn(Owner::Enemy, IVec2::new(5, 5));
        state.score = 90;

        state.start_game();
        let first = state.clone();
        state.start_game();

        assert_eq!(state.player, first.player);
        assert_eq!(state.formation, first.formation);
        assert_eq!(state.projectiles, first.projectiles);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::spawn());
        assert_eq!(state.formation, Formation::default());
        assert_eq!(state.projectiles.occupied(), 0);
        assert_eq!(state.projectiles.active_count(), 0);
    }

    #[test]
    fn test_award_scores_by_species() {
        let mut state = GameState::new(1);
        state.award(0, 0);
        state.award(4, 5);
        assert_eq!(state.score, 50);
        assert!(state.events.contains(&GameEvent::AlienKilled {
            row: 0,
            col: 0,
            points: 40
        }));
    }
}
