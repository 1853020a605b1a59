//! Read-only per-frame snapshot for a renderer
//!
//! The renderer blits sprites; everything it needs to pick a sprite and a
//! position is computed here from the simulation state, including the
//! animation frame indices.

use glam::IVec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::{GameState, Owner, Player, Tick, UnitPhase};
use crate::sim::clock::{elapsed, expired};

/// Which sprite to draw for the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShipSprite {
    Ship,
    Explosion { frame: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub pos: IVec2,
    pub sprite: ShipSprite,
    /// False on the "off" half of the invincibility blink
    pub visible: bool,
    pub lives: u8,
    pub death_tick: Option<Tick>,
    pub last_hit: Option<Tick>,
}

impl PlayerView {
    pub fn capture(player: &Player, now: Tick) -> Self {
        let sprite = match elapsed(now, player.death_tick) {
            Some(e) => ShipSprite::Explosion {
                frame: ((e / PLAYER_EXPLOSION_FRAME_TICKS) % EXPLOSION_FRAMES) as u8,
            },
            None => ShipSprite::Ship,
        };
        let visible = expired(now, player.last_hit, PLAYER_INVINCIBLE_TIME)
            || elapsed(now, player.last_hit)
                .is_some_and(|e| (e / PLAYER_BLINK_TICKS) % 2 == 0);
        Self {
            pos: player.pos,
            sprite,
            visible,
            lives: player.lives,
            death_tick: player.death_tick,
            last_hit: player.last_hit,
        }
    }
}

/// Sprite choice for a formation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnitSprite {
    /// Species sprite, alternating between two poses
    Alive { species: u8, frame: u8 },
    /// Explosion animation; `elapsed` ticks since the kill
    Dying { elapsed: Tick, frame: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitView {
    pub row: usize,
    pub col: usize,
    pub pos: IVec2,
    pub sprite: UnitSprite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectileView {
    pub owner: Owner,
    pub pos: IVec2,
}

/// Everything a renderer reads for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameView {
    pub tick: Tick,
    pub score: u32,
    pub player: PlayerView,
    /// Spare-ship icons in the life bar
    pub life_icons: u8,
    /// Non-hidden units, row-major
    pub units: Vec<UnitView>,
    /// Visible projectiles in slot order
    pub projectiles: Vec<ProjectileView>,
}

impl FrameView {
    /// Snapshot the state after a tick
    pub fn capture(state: &GameState) -> Self {
        let now = state.now();
        let alive_frame = ((now / ALIEN_ANIM_PERIOD) % 2) as u8;
        let dying_frame_ticks = (ALIEN_EXPLOSION_TIME / EXPLOSION_FRAMES).max(1);

        let units = state
            .formation
            .iter()
            .filter_map(|(row, col, unit)| {
                let sprite = match unit.phase(now) {
                    UnitPhase::Hidden => return None,
                    UnitPhase::Alive => UnitSprite::Alive {
                        species: unit.species,
                        frame: alive_frame,
                    },
                    UnitPhase::Dying { elapsed } => UnitSprite::Dying {
                        elapsed,
                        frame: ((elapsed / dying_frame_ticks) % EXPLOSION_FRAMES) as u8,
                    },
                };
                Some(UnitView {
                    row,
                    col,
                    pos: state.formation.cell_origin(row, col),
                    sprite,
                })
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .map(|(_, p)| ProjectileView {
                owner: p.owner,
                pos: p.pos,
            })
            .collect();

        Self {
            tick: now,
            score: state.score,
            player: PlayerView::capture(&state.player, now),
            life_icons: state.player.lives.saturating_sub(1),
            units,
            projectiles,
        }
    }
}
