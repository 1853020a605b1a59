//! Demo autopilot
//!
//! Produces a `TickInput` from the current state: dodge enemy shots that are
//! about to land, otherwise line up under the nearest column that still has a
//! live unit and fire.

use crate::consts::*;
use crate::sim::{GameState, Owner, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autopilot {
    /// How far above the ship an enemy shot counts as incoming
    pub lookahead: i32,
    /// Extra horizontal clearance around the ship when judging threats
    pub margin: i32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead: 96,
            margin: 6,
        }
    }
}

impl Autopilot {
    pub fn next_input(&self, state: &GameState) -> TickInput {
        let player = &state.player;
        if !player.is_alive() {
            return TickInput::default();
        }
        let center = player.pos.x + PLAYER_W / 2;

        if let Some(threat_x) = self.nearest_threat(state) {
            let mut left = threat_x >= center;
            // Cornered: run the other way
            if left && player.pos.x - PLAYER_SPEED < 0 {
                left = false;
            } else if !left && player.pos.x + PLAYER_W + PLAYER_SPEED > SCREEN_W {
                left = true;
            }
            log::trace!("autopilot dodging shot at x={}", threat_x);
            return TickInput {
                move_left: left,
                move_right: !left,
                ..Default::default()
            };
        }

        let Some(target) = self.target_column_x(state, center) else {
            return TickInput::default();
        };
        let dx = target - center;
        if dx.abs() <= PLAYER_SPEED / 2 {
            TickInput {
                shoot: true,
                ..Default::default()
            }
        } else {
            TickInput {
                move_left: dx < 0,
                move_right: dx > 0,
                ..Default::default()
            }
        }
    }

    /// Center x of the closest enemy shot heading into the ship
    fn nearest_threat(&self, state: &GameState) -> Option<i32> {
        let player = &state.player;
        let span = (player.pos.x - self.margin)..=(player.pos.x + PLAYER_W + self.margin);
        state
            .projectiles
            .iter()
            .map(|(_, p)| p)
            .filter(|p| p.owner == Owner::Enemy && span.contains(&p.center_x()))
            .filter(|p| {
                p.pos.y + PROJECTILE_H >= player.pos.y - self.lookahead
                    && p.pos.y < player.pos.y + PLAYER_H
            })
            // Lowest shot lands first
            .max_by_key(|p| p.pos.y)
            .map(|p| p.center_x())
    }

    /// Center x of the live column closest to `center`
    fn target_column_x(&self, state: &GameState, center: i32) -> Option<i32> {
        state
            .formation
            .iter()
            .filter(|(_, _, unit)| unit.is_alive())
            .map(|(row, col, _)| state.formation.cell_origin(row, col).x + ALIEN_W / 2)
            .min_by_key(|x| (x - center).abs())
    }
}
