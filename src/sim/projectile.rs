//! Fixed-capacity projectile pool
//!
//! Slots are reused lowest-index first through an explicit free list. The
//! pool also tracks `active_count`, the high-water mark of occupied slots in the
//! current game session: every slot below it is visited on each sweep, so the
//! per-tick cost follows the peak number of concurrent shots, not the capacity.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A shot in flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    /// Top-left corner of the hit box
    pub pos: IVec2,
    /// Cleared when the shot leaves the screen or hits something; the slot is
    /// freed at the end of the sweep that cleared it
    pub visible: bool,
}

impl Projectile {
    pub fn new(owner: Owner, pos: IVec2) -> Self {
        Self {
            owner,
            pos,
            visible: true,
        }
    }

    /// Horizontal centre, used as the x collision point
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.pos.x + PROJECTILE_W / 2
    }

    /// True once the shot is further than two of its own lengths past either vertical bound
    pub fn is_off_screen(&self) -> bool {
        let margin = PROJECTILE_H * 2;
        self.pos.y < -margin || self.pos.y > SCREEN_H + margin
    }

    /// Move one tick, or mark invisible if already far off screen
    pub fn advance(&mut self) {
        if self.is_off_screen() {
            self.visible = false;
            return;
        }
        match self.owner {
            Owner::Player => self.pos.y -= PROJECTILE_SPEED,
            Owner::Enemy => self.pos.y += PROJECTILE_SPEED,
        }
    }
}

/// Index of an occupied pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub usize);

/// Slot array with a free list and a monotonic active count
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Option<Projectile>>,
    free: BinaryHeap<Reverse<usize>>,
    active_count: usize,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::with_capacity(MAX_PROJECTILES)
    }
}

impl PartialEq for ProjectilePool {
    fn eq(&self, other: &Self) -> bool {
        // The heap's internal layout is not observable; compare slot contents only
        self.slots == other.slots && self.active_count == other.active_count
    }
}

impl ProjectilePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            free: (0..capacity).map(Reverse).collect(),
            active_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// High-water mark of occupied slots since the last `clear`
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn get(&self, id: SlotId) -> Option<&Projectile> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Occupy the lowest free slot. Returns `None` (shot dropped) when the pool is full.
    pub fn spawn(&mut self, owner: Owner, origin: IVec2) -> Option<SlotId> {
        let Some(Reverse(index)) = self.free.pop() else {
            log::debug!("Projectile pool full, dropping {:?} shot", owner);
            return None;
        };
        self.slots[index] = Some(Projectile::new(owner, origin));
        if index == self.active_count {
            self.active_count += 1;
        }
        Some(SlotId(index))
    }

    /// Release a slot back to the free list (no-op if already free)
    pub fn release(&mut self, id: SlotId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            if slot.take().is_some() {
                self.free.push(Reverse(id.0));
            }
        }
    }

    /// Free every slot and reset the active count (game start)
    pub fn clear(&mut self) {
        let capacity = self.slots.len();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.free = (0..capacity).map(Reverse).collect();
        self.active_count = 0;
    }

    /// Visit every visible projectile below the active count, then free the
    /// ones that ended the visit invisible.
    ///
    /// The visitor is expected to move the shot and resolve its collisions, so
    /// a shot's last tick still takes part in collision checks before removal.
    pub fn sweep<F>(&mut self, mut visit: F)
    where
        F: FnMut(SlotId, &mut Projectile),
    {
        for index in 0..self.active_count {
            let Some(shot) = self.slots[index].as_mut() else {
                continue;
            };
            if shot.visible {
                visit(SlotId(index), shot);
            }
            if !shot.visible {
                self.release(SlotId(index));
            }
        }
    }

    /// Visible projectiles in slot order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Projectile)> {
        self.slots[..self.active_count]
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (SlotId(i), p)))
            .filter(|(_, p)| p.visible)
    }
}
