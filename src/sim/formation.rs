//! Enemy formation: the unit grid and its shared movement state
//!
//! The formation marches sideways on a fixed cadence and descends each time it
//! reaches a screen bound. The bounds it tests are the dynamic edges: the
//! tightest box around columns/rows that still hold a non-hidden unit.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::{Tick, elapsed, every};
use crate::consts::*;

/// Horizontal marching direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Life phase of a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitPhase {
    Alive,
    /// Death animation playing, `elapsed` ticks since the kill
    Dying { elapsed: Tick },
    Hidden,
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Sprite species (the row it started in)
    pub species: u8,
    /// Tick of the killing hit
    pub death_tick: Option<Tick>,
    /// Set once the death animation has finished
    pub hidden: bool,
}

impl Unit {
    pub fn new(species: u8) -> Self {
        Self {
            species,
            death_tick: None,
            hidden: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.death_tick.is_none()
    }

    pub fn phase(&self, now: Tick) -> UnitPhase {
        match (self.hidden, elapsed(now, self.death_tick)) {
            (true, _) => UnitPhase::Hidden,
            (false, Some(elapsed)) => UnitPhase::Dying { elapsed },
            (false, None) => UnitPhase::Alive,
        }
    }

    /// Points for killing this species; upper rows pay more
    pub fn points(&self) -> u32 {
        match self.species {
            0 => 40,
            1 => 30,
            2 | 3 => 20,
            _ => 10,
        }
    }
}

/// Bounding offsets of the non-hidden units, relative to the initial block's top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Default for Edges {
    fn default() -> Self {
        Self {
            left: 0,
            right: ALIENS_BLOCK_W,
            bottom: ALIENS_BLOCK_H,
        }
    }
}

/// The enemy grid and its group movement state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub units: [[Unit; ALIEN_COLS]; ALIEN_ROWS],
    pub direction: Direction,
    /// Step cadence: the group moves every `ALIENS_MOVE_PERIOD / speed` ticks
    pub speed: u8,
    /// Group offset from the padded origin
    pub offset: IVec2,
    pub edges: Edges,
}

impl Default for Formation {
    fn default() -> Self {
        Self::new(ALIENS_INITIAL_SPEED)
    }
}

impl Formation {
    /// Fresh formation: every unit alive, edges at the full block extent
    pub fn new(speed: u8) -> Self {
        Self {
            units: std::array::from_fn(|row| [Unit::new(row as u8); ALIEN_COLS]),
            direction: Direction::Right,
            speed: speed.max(1),
            offset: IVec2::ZERO,
            edges: Edges::default(),
        }
    }

    /// Ticks between group steps
    pub fn step_interval(&self) -> Tick {
        (ALIENS_MOVE_PERIOD / Tick::from(self.speed.max(1))).max(1)
    }

    /// Absolute top-left of the cell at (row, col)
    pub fn cell_origin(&self, row: usize, col: usize) -> IVec2 {
        IVec2::new(
            ALIENS_PADDING_LEFT + self.offset.x + col as i32 * ALIENS_COL_PITCH,
            ALIENS_PADDING_TOP + self.offset.y + row as i32 * ALIENS_ROW_PITCH,
        )
    }

    /// Absolute x of the leftmost non-hidden column
    pub fn left_extent(&self) -> i32 {
        ALIENS_PADDING_LEFT + self.offset.x + self.edges.left
    }

    /// Absolute x of the right side of the rightmost non-hidden column
    pub fn right_extent(&self) -> i32 {
        ALIENS_PADDING_LEFT + self.offset.x + self.edges.right
    }

    /// Bottom edge projection used for the descent check
    pub fn bottom_projection(&self) -> i32 {
        self.offset.y + self.edges.bottom
    }

    pub fn alive_count(&self) -> usize {
        self.iter().filter(|(_, _, u)| u.is_alive()).count()
    }

    pub fn any_alive(&self) -> bool {
        self.iter().any(|(_, _, u)| u.is_alive())
    }

    /// All units with their grid coordinates, row-major from the top-left
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Unit)> {
        self.units
            .iter()
            .enumerate()
            .flat_map(|(row, cols)| cols.iter().enumerate().map(move |(col, u)| (row, col, u)))
    }

    /// Start the death animation of a unit. Returns false if it was already dead.
    pub fn kill(&mut self, row: usize, col: usize, now: Tick) -> bool {
        let unit = &mut self.units[row][col];
        if unit.death_tick.is_some() {
            return false;
        }
        unit.death_tick = Some(now);
        log::debug!("Unit ({}, {}) killed at tick {}", row, col, now);
        true
    }

    /// Advance one tick: march, maybe pick a shooter, hide finished explosions.
    ///
    /// Returns the origin of an enemy shot if one was fired this tick.
    pub fn update<R: Rng + ?Sized>(&mut self, now: Tick, rng: &mut R) -> FormationStep {
        if every(now, self.step_interval()) {
            self.march();
        }

        let shot = if every(now, ALIENS_SHOOT_PERIOD) {
            self.pick_shooter(rng).map(|(row, col)| self.shot_origin(row, col))
        } else {
            None
        };

        let hidden = self.hide_finished(now);
        if hidden > 0 {
            self.recompute_edges();
        }

        FormationStep { shot, hidden }
    }

    /// One group step plus bound checks
    fn march(&mut self) {
        match self.direction {
            Direction::Right => self.offset.x += ALIENS_MOVE_STEP,
            Direction::Left => self.offset.x -= ALIENS_MOVE_STEP,
        }

        let flip = if self.right_extent() >= SCREEN_W - ALIENS_PADDING_LEFT {
            Some(Direction::Left)
        } else if self.left_extent() <= ALIENS_PADDING_LEFT {
            Some(Direction::Right)
        } else {
            None
        };

        if let Some(direction) = flip {
            self.direction = direction;
            if self.bottom_projection() < SCREEN_H - ALIENS_DESCEND_FLOOR {
                self.offset.y += ALIENS_DESCEND_STEP;
            }
            log::trace!(
                "Formation turned {:?} at offset ({}, {})",
                direction,
                self.offset.x,
                self.offset.y
            );
        }
    }

    /// Uniformly random alive unit by rejection sampling, or `None` if all are dead
    pub fn pick_shooter<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if !self.any_alive() {
            return None;
        }
        loop {
            let row = rng.random_range(0..ALIEN_ROWS);
            let col = rng.random_range(0..ALIEN_COLS);
            if self.units[row][col].is_alive() {
                return Some((row, col));
            }
        }
    }

    /// Where an enemy shot fired by (row, col) starts: centred, just below the unit
    pub fn shot_origin(&self, row: usize, col: usize) -> IVec2 {
        let cell = self.cell_origin(row, col);
        IVec2::new(
            cell.x + ALIEN_W / 2 - PROJECTILE_W / 2,
            cell.y + ALIEN_H + ALIEN_SHOT_GAP,
        )
    }

    /// Mark units whose explosion finished as hidden; returns how many changed
    fn hide_finished(&mut self, now: Tick) -> usize {
        let mut hidden = 0;
        for unit in self.units.iter_mut().flatten() {
            if unit.hidden {
                continue;
            }
            if elapsed(now, unit.death_tick).is_some_and(|e| e > ALIEN_EXPLOSION_TIME) {
                unit.hidden = true;
                hidden += 1;
            }
        }
        if hidden > 0 {
            log::debug!("{} unit(s) hidden at tick {}", hidden, now);
        }
        hidden
    }

    fn column_hidden(&self, col: usize) -> bool {
        self.units.iter().all(|row| row[col].hidden)
    }

    fn row_hidden(&self, row: usize) -> bool {
        self.units[row].iter().all(|u| u.hidden)
    }

    /// Edges computed from scratch over the whole grid
    pub fn measure_edges(&self) -> Edges {
        let left_cols = (0..ALIEN_COLS).take_while(|&c| self.column_hidden(c)).count() as i32;
        let right_cols = (0..ALIEN_COLS)
            .rev()
            .take_while(|&c| self.column_hidden(c))
            .count() as i32;
        let bottom_rows = (0..ALIEN_ROWS)
            .rev()
            .take_while(|&r| self.row_hidden(r))
            .count() as i32;

        Edges {
            left: left_cols * ALIENS_COL_PITCH,
            right: ALIENS_BLOCK_W - right_cols * ALIENS_COL_PITCH,
            bottom: ALIENS_BLOCK_H - bottom_rows * ALIENS_ROW_PITCH,
        }
    }

    /// Re-measure the edges and keep each one only if it got tighter
    pub fn recompute_edges(&mut self) {
        let measured = self.measure_edges();
        let before = self.edges;
        self.edges.left = self.edges.left.max(measured.left);
        self.edges.right = self.edges.right.min(measured.right);
        self.edges.bottom = self.edges.bottom.min(measured.bottom);
        if self.edges != before {
            log::debug!("Formation edges {:?} -> {:?}", before, self.edges);
        }
    }
}

/// What a formation update produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormationStep {
    /// Origin of an enemy shot fired this tick
    pub shot: Option<IVec2>,
    /// Units that finished their death animation this tick
    pub hidden: usize,
}
