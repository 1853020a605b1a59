//! Fixed timestep simulation tick
//!
//! Core game loop step: Player → Formation → Projectiles/Collision → Clock.

use super::collision::{resolve_enemy_shot, resolve_player_shot};
use super::projectile::Owner;
use super::state::{GameEvent, GameState};

/// Decoded input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub shoot: bool,
    /// Ends the frame loop after the current frame; the simulation ignores it
    pub quit: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    let now = state.clock.now();

    // Player
    state
        .player
        .set_intent(input.move_left, input.move_right, input.shoot);
    let step = state.player.update(now);
    if let Some(origin) = step.shot {
        state.events.push(GameEvent::PlayerShot);
        state.projectiles.spawn(Owner::Player, origin);
    }
    if step.exploded {
        state.events.push(GameEvent::PlayerExploded);
    }
    if step.respawn {
        state.start_game();
    }

    // Formation
    let formation_step = state.formation.update(now, &mut state.rng);
    if let Some(origin) = formation_step.shot {
        state.projectiles.spawn(Owner::Enemy, origin);
    }
    if formation_step.hidden > 0 {
        state.events.push(GameEvent::AliensHidden {
            count: formation_step.hidden,
        });
    }

    // Projectiles and collisions
    let mut kills = Vec::new();
    let GameState {
        projectiles,
        formation,
        player,
        events,
        ..
    } = &mut *state;
    projectiles.sweep(|_, shot| {
        shot.advance();
        match shot.owner {
            Owner::Player => {
                if let Some(cell) = resolve_player_shot(shot, formation, now) {
                    kills.push(cell);
                }
            }
            Owner::Enemy => {
                if resolve_enemy_shot(shot, player, now) {
                    events.push(GameEvent::PlayerHit {
                        lives: player.lives,
                    });
                }
            }
        }
    });
    for (row, col) in kills {
        state.award(row, col);
    }

    state.clock.advance();
}
