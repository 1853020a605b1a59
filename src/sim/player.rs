//! Player ship: movement, shot cadence, lives and the death/respawn timer

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::clock::{Tick, elapsed, expired};
use crate::consts::*;

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    None,
    Left,
    Right,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the sprite
    pub pos: IVec2,
    pub movement: Movement,
    pub shooting: bool,
    pub last_shot: Option<Tick>,
    /// Start of the current (or last) invincibility window
    pub last_hit: Option<Tick>,
    pub lives: u8,
    pub death_tick: Option<Tick>,
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn()
    }
}

/// What a player update asks the orchestrator to do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStep {
    /// Origin of a new player shot
    pub shot: Option<IVec2>,
    /// The ship ran out of lives this tick
    pub exploded: bool,
    /// The death animation finished; start a new game
    pub respawn: bool,
}

impl Player {
    /// Fresh ship at the bottom centre with full lives
    pub fn spawn() -> Self {
        Self {
            pos: IVec2::new(SCREEN_W / 2 - PLAYER_W / 2, SCREEN_H - PLAYER_H),
            movement: Movement::None,
            shooting: false,
            last_shot: None,
            last_hit: None,
            lives: PLAYER_MAX_LIVES,
            death_tick: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.death_tick.is_none()
    }

    /// Within the invincibility window that follows a hit
    pub fn is_invincible(&self, now: Tick) -> bool {
        !expired(now, self.last_hit, PLAYER_INVINCIBLE_TIME)
    }

    /// Can an enemy shot hurt the ship right now
    pub fn is_vulnerable(&self, now: Tick) -> bool {
        self.is_alive() && !self.is_invincible(now)
    }

    /// Decode this tick's intent. Left wins over right; a dead ship does not steer.
    pub fn set_intent(&mut self, move_left: bool, move_right: bool, shoot: bool) {
        if self.is_alive() {
            self.movement = match (move_left, move_right) {
                (true, _) => Movement::Left,
                (false, true) => Movement::Right,
                (false, false) => Movement::None,
            };
        }
        self.shooting = shoot;
    }

    /// Where a player shot starts: centred on the ship, above the player row
    pub fn shot_origin(&self) -> IVec2 {
        IVec2::new(
            self.pos.x + PLAYER_W / 2 - PROJECTILE_W / 2,
            SCREEN_H - PLAYER_H - PROJECTILE_H - PLAYER_SHOT_GAP,
        )
    }

    pub fn update(&mut self, now: Tick) -> PlayerStep {
        let mut step = PlayerStep::default();

        if self.is_alive() {
            // Moves that would leave the screen are dropped, not clamped
            match self.movement {
                Movement::Left if self.pos.x - PLAYER_SPEED >= 0 => {
                    self.pos.x -= PLAYER_SPEED;
                }
                Movement::Right if self.pos.x + PLAYER_W + PLAYER_SPEED <= SCREEN_W => {
                    self.pos.x += PLAYER_SPEED;
                }
                _ => {}
            }
        }

        // Firing keeps its cadence through the explosion window
        if self.shooting && expired(now, self.last_shot, PLAYER_SHOOT_DELAY) {
            step.shot = Some(self.shot_origin());
            self.last_shot = Some(now);
        }

        if self.lives == 0 && self.death_tick.is_none() {
            self.death_tick = Some(now);
            self.movement = Movement::None;
            step.exploded = true;
            log::info!("Player destroyed at tick {}", now);
        } else if elapsed(now, self.death_tick).is_some_and(|e| e > PLAYER_EXPLOSION_TIME) {
            step.respawn = true;
        }

        step
    }

    /// Apply an enemy hit. Returns false if the ship is dead or invincible.
    pub fn hit(&mut self, now: Tick) -> bool {
        if !self.is_vulnerable(now) || self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.last_hit = Some(now);
        log::debug!("Player hit at tick {}, {} lives left", now, self.lives);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_position() {
        let player = Player::spawn();
        assert_eq!(player.pos, IVec2::new(304, 460));
        assert_eq!(player.lives, PLAYER_MAX_LIVES);
        assert!(player.is_alive());
        assert!(!player.is_invincible(0));
    }

    #[test]
    fn test_move_right_until_screen_edge() {
        let mut player = Player::spawn();
        player.set_intent(false, true, false);
        for now in 0..4 {
            player.update(now);
        }
        assert_eq!(player.pos.x, 320);

        player.pos.x = SCREEN_W - PLAYER_W;
        player.update(4);
        assert_eq!(player.pos.x, SCREEN_W - PLAYER_W);
    }

    #[test]
    fn test_move_is_suppressed_not_clamped() {
        let mut player = Player::spawn();
        player.pos.x = 2;
        player.set_intent(true, false, false);
        player.update(0);
        assert_eq!(player.pos.x, 2);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut player = Player::spawn();
        player.set_intent(true, true, false);
        assert_eq!(player.movement, Movement::Left);
    }

    #[test]
    fn test_shoot_delay() {
        let mut player = Player::spawn();
        player.set_intent(false, false, true);
        // First shot at tick 0 is allowed
        assert!(player.update(0).shot.is_some());
        for now in 1..=PLAYER_SHOOT_DELAY {
            assert!(player.update(now).shot.is_none(), "shot too early at {now}");
        }
        assert!(player.update(PLAYER_SHOOT_DELAY + 1).shot.is_some());
    }

    #[test]
    fn test_shot_origin() {
        let player = Player::spawn();
        assert_eq!(player.shot_origin(), IVec2::new(318, 433));
    }

    #[test]
    fn test_death_and_respawn_timer() {
        let mut player = Player::spawn();
        player.set_intent(false, true, false);
        player.lives = 0;

        let step = player.update(500);
        assert!(step.exploded);
        assert_eq!(player.death_tick, Some(500));
        assert_eq!(player.movement, Movement::None);

        // A dead ship ignores steering but keeps firing on its cadence
        player.set_intent(true, false, true);
        assert_eq!(player.movement, Movement::None);
        let x = player.pos.x;
        let mut shots = Vec::new();
        for now in 501..=500 + PLAYER_EXPLOSION_TIME {
            let step = player.update(now);
            assert!(!step.respawn && !step.exploded);
            if step.shot.is_some() {
                shots.push(now);
            }
        }
        assert_eq!(player.pos.x, x);
        assert_eq!(shots, vec![501, 532, 563, 594]);
        assert!(player.update(501 + PLAYER_EXPLOSION_TIME).respawn);
    }

    #[test]
    fn test_dead_player_still_fires() {
        let mut player = Player::spawn();
        player.lives = 0;
        player.update(10);
        assert!(!player.is_alive());

        player.set_intent(false, false, true);
        let step = player.update(50);
        assert_eq!(step.shot, Some(player.shot_origin()));
        assert_eq!(player.last_shot, Some(50));
        assert!(player.update(51).shot.is_none());
    }

    #[test]
    fn test_invincibility_window() {
        let mut player = Player::spawn();
        assert!(player.hit(200));
        assert_eq!(player.lives, PLAYER_MAX_LIVES - 1);
        for now in 201..=200 + PLAYER_INVINCIBLE_TIME {
            assert!(!player.hit(now), "hit landed during window at {now}");
        }
        assert!(player.hit(201 + PLAYER_INVINCIBLE_TIME));
        assert_eq!(player.lives, PLAYER_MAX_LIVES - 2);
    }

    #[test]
    fn test_dead_player_cannot_be_hit() {
        let mut player = Player::spawn();
        player.lives = 0;
        player.update(10);
        assert!(!player.hit(1000));
        assert_eq!(player.lives, 0);
    }

    proptest! {
        #[test]
        fn prop_hits_respect_window(first in 0u64..10_000, offsets in prop::collection::vec(1u64..300, 1..20)) {
            let mut player = Player::spawn();
            prop_assert!(player.hit(first));
            let mut last_hit = first;
            let mut now = first;
            for offset in offsets {
                now += offset;
                let before = player.lives;
                let landed = player.hit(now);
                let allowed = now - last_hit > PLAYER_INVINCIBLE_TIME && before > 0;
                prop_assert_eq!(landed, allowed);
                if landed {
                    prop_assert_eq!(player.lives, before - 1);
                    last_hit = now;
                } else {
                    prop_assert_eq!(player.lives, before);
                }
            }
        }
    }
}
