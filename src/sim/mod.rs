//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick counts only, no wall-clock time
//! - Seeded RNG only
//! - Fixed update order: Player, Formation, Projectiles/Collision, Clock
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod formation;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use clock::{Clock, Tick, elapsed, every, expired};
pub use collision::{Rect, first_hit, player_rect, resolve_enemy_shot, resolve_player_shot, unit_rect};
pub use formation::{Direction, Edges, Formation, FormationStep, Unit, UnitPhase};
pub use player::{Movement, Player, PlayerStep};
pub use projectile::{Owner, Projectile, ProjectilePool, SlotId};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
