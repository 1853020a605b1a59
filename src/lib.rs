//! Grid Invaders - simulation core of a formation shooter
//!
//! Core modules:
//! - `sim`: Deterministic tick simulation (player, formation, projectiles, collisions)
//! - `view`: Read-only per-frame snapshot for a renderer
//! - `audio`: Fire-and-forget sound cue plumbing
//! - `autopilot`: Demo intent generator
//! - `settings`: JSON-backed configuration

pub mod audio;
pub mod autopilot;
pub mod settings;
pub mod sim;
pub mod view;

pub use audio::{AudioManager, CueSink, LogSink, SoundCue};
pub use settings::{Settings, SettingsError};
pub use view::FrameView;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_W: i32 = 640;
    pub const SCREEN_H: i32 = 480;

    /// Every sprite cell on the sheet is the same size
    pub const SPRITE_CELL_W: i32 = 32;
    pub const SPRITE_CELL_H: i32 = 20;

    /// Player defaults
    pub const PLAYER_W: i32 = SPRITE_CELL_W;
    pub const PLAYER_H: i32 = SPRITE_CELL_H;
    pub const PLAYER_SPEED: i32 = 4;
    pub const PLAYER_SHOOT_DELAY: u64 = 30;
    pub const PLAYER_MAX_LIVES: u8 = 4;
    pub const PLAYER_INVINCIBLE_TIME: u64 = 96;
    pub const PLAYER_EXPLOSION_TIME: u64 = 96;
    /// Gap between the top of the player sprite and a fresh shot
    pub const PLAYER_SHOT_GAP: i32 = 15;

    /// Formation layout
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIEN_COLS: usize = 6;
    pub const ALIEN_W: i32 = SPRITE_CELL_W;
    pub const ALIEN_H: i32 = SPRITE_CELL_H;
    pub const ALIENS_PADDING_LEFT: i32 = 42;
    pub const ALIENS_PADDING_TOP: i32 = 60;
    pub const ALIENS_COL_SPACING: i32 = 25;
    pub const ALIENS_ROW_SPACING: i32 = 20;
    /// Distance between the left sides of neighbouring columns
    pub const ALIENS_COL_PITCH: i32 = ALIEN_W + ALIENS_COL_SPACING;
    /// Distance between the tops of neighbouring rows
    pub const ALIENS_ROW_PITCH: i32 = ALIEN_H + ALIENS_ROW_SPACING;
    /// Initial block extent (all units alive)
    pub const ALIENS_BLOCK_W: i32 = ALIEN_COLS as i32 * ALIENS_COL_PITCH - ALIENS_COL_SPACING;
    pub const ALIENS_BLOCK_H: i32 = ALIEN_ROWS as i32 * ALIENS_ROW_PITCH - ALIENS_ROW_SPACING;

    /// Formation movement
    pub const ALIENS_INITIAL_SPEED: u8 = 3;
    /// Step cadence is `ALIENS_MOVE_PERIOD / speed` ticks
    pub const ALIENS_MOVE_PERIOD: u64 = 40;
    pub const ALIENS_MOVE_STEP: i32 = 8;
    pub const ALIENS_DESCEND_STEP: i32 = 25;
    /// Formation stops descending once its bottom reaches this far above the screen bottom
    pub const ALIENS_DESCEND_FLOOR: i32 = 100;
    pub const ALIENS_SHOOT_PERIOD: u64 = 40;
    pub const ALIEN_EXPLOSION_TIME: u64 = 32;
    /// Gap between the bottom of a unit and its fresh shot
    pub const ALIEN_SHOT_GAP: i32 = 10;

    /// Projectiles
    pub const PROJECTILE_W: i32 = 4;
    pub const PROJECTILE_H: i32 = 12;
    pub const PROJECTILE_SPEED: i32 = 8;
    pub const MAX_PROJECTILES: usize = 50;

    /// Animation cadence used by the frame view
    pub const ALIEN_ANIM_PERIOD: u64 = 40;
    pub const PLAYER_EXPLOSION_FRAME_TICKS: u64 = 8;
    pub const PLAYER_BLINK_TICKS: u64 = 12;
    pub const EXPLOSION_FRAMES: u64 = 4;
}
