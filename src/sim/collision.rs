//! Projectile hit tests and their resolution
//!
//! Shots are tested point-wise: the x collision point is the shot's horizontal
//! centre, and the y point is its leading edge (player shots) or trailing edge
//! (enemy shots). Entity counts are small, so there is no broad phase.

use glam::IVec2;

use super::clock::Tick;
use super::formation::Formation;
use super::player::Player;
use super::projectile::Projectile;
use crate::consts::*;

/// Axis-aligned box in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub fn from_origin_size(origin: IVec2, size: IVec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Strictly inside the horizontal span
    #[inline]
    pub fn spans_x(&self, x: i32) -> bool {
        x > self.min.x && x < self.max.x
    }

    /// Strictly inside the vertical span
    #[inline]
    pub fn spans_y(&self, y: i32) -> bool {
        y > self.min.y && y < self.max.y
    }
}

/// Bounding box of the unit at (row, col)
pub fn unit_rect(formation: &Formation, row: usize, col: usize) -> Rect {
    Rect::from_origin_size(formation.cell_origin(row, col), IVec2::new(ALIEN_W, ALIEN_H))
}

/// Bounding box of the player ship
pub fn player_rect(player: &Player) -> Rect {
    Rect::from_origin_size(player.pos, IVec2::new(PLAYER_W, PLAYER_H))
}

/// Player shot against a unit box: centre x and top edge must both be inside
pub fn player_shot_hits(shot: &Projectile, target: &Rect) -> bool {
    target.spans_x(shot.center_x()) && target.spans_y(shot.pos.y)
}

/// Enemy shot against the ship: centre x inside and the shot's bottom below the ship's top
pub fn enemy_shot_hits(shot: &Projectile, target: &Rect) -> bool {
    target.spans_x(shot.center_x()) && shot.pos.y + PROJECTILE_H > target.min.y
}

/// First target a player shot hits, in iteration order. Stops scanning at the hit.
pub fn first_hit<K>(
    shot: &Projectile,
    targets: impl IntoIterator<Item = (K, Rect)>,
) -> Option<K> {
    targets
        .into_iter()
        .find(|(_, rect)| player_shot_hits(shot, rect))
        .map(|(key, _)| key)
}

/// Test a player shot against every alive unit, killing at most one.
///
/// Returns the grid cell that was hit.
pub fn resolve_player_shot(
    shot: &mut Projectile,
    formation: &mut Formation,
    now: Tick,
) -> Option<(usize, usize)> {
    let targets = formation
        .iter()
        .filter(|(_, _, unit)| unit.is_alive())
        .map(|(row, col, _)| ((row, col), unit_rect(formation, row, col)));
    let (row, col) = first_hit(shot, targets)?;

    shot.visible = false;
    formation.kill(row, col, now);
    Some((row, col))
}

/// Test an enemy shot against the ship. The shot is only consumed if the hit
/// actually costs a life; dead or invincible ships let it pass through.
pub fn resolve_enemy_shot(shot: &mut Projectile, player: &mut Player, now: Tick) -> bool {
    if !enemy_shot_hits(shot, &player_rect(player)) {
        return false;
    }
    if !player.hit(now) {
        return false;
    }
    shot.visible = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::Owner;

    fn player_shot_at(x: i32, y: i32) -> Projectile {
        Projectile::new(Owner::Player, IVec2::new(x, y))
    }

    #[test]
    fn test_player_shot_uses_centre_and_top() {
        let formation = Formation::default();
        let rect = unit_rect(&formation, 0, 0);
        assert_eq!(rect.min, IVec2::new(42, 60));
        assert_eq!(rect.max, IVec2::new(74, 80));

        // Centre x = 44 is inside, top inside
        assert!(player_shot_hits(&player_shot_at(42, 70), &rect));
        // Centre x exactly on the left edge is a miss
        assert!(!player_shot_hits(&player_shot_at(40, 70), &rect));
        // Top edge on the unit's bottom is a miss
        assert!(!player_shot_hits(&player_shot_at(50, 80), &rect));
    }

    #[test]
    fn test_single_kill_per_shot() {
        let mut formation = Formation::default();
        let x = formation.cell_origin(0, 1).x + 10;
        let y = formation.cell_origin(3, 1).y + 5;
        let mut shot = player_shot_at(x, y);

        assert_eq!(resolve_player_shot(&mut shot, &mut formation, 50), Some((3, 1)));
        assert!(!shot.visible);
        assert_eq!(formation.alive_count(), ALIEN_ROWS * ALIEN_COLS - 1);
        assert_eq!(formation.units[3][1].death_tick, Some(50));
    }

    #[test]
    fn test_stacked_units_lose_one() {
        let mut formation = Formation::default();
        let mut shot = player_shot_at(formation.cell_origin(0, 2).x + 4, 0);
        let first = unit_rect(&formation, 0, 2);
        let second = unit_rect(&formation, 1, 2);
        shot.pos.y = first.min.y + 5;
        assert!(player_shot_hits(&shot, &first));
        assert!(!player_shot_hits(&shot, &second));

        let hit = resolve_player_shot(&mut shot, &mut formation, 10);
        assert_eq!(hit, Some((0, 2)));
        assert_eq!(formation.alive_count(), ALIEN_ROWS * ALIEN_COLS - 1);

        // Dying units are skipped
        let mut again = player_shot_at(shot.pos.x, shot.pos.y);
        assert_eq!(resolve_player_shot(&mut again, &mut formation, 11), None);
        assert!(again.visible);
    }

    #[test]
    fn test_overlapping_targets_yield_one_hit() {
        let shot = player_shot_at(50, 70);
        let a = Rect::from_origin_size(IVec2::new(40, 60), IVec2::new(ALIEN_W, ALIEN_H));
        let b = Rect::from_origin_size(IVec2::new(45, 65), IVec2::new(ALIEN_W, ALIEN_H));
        assert!(player_shot_hits(&shot, &a) && player_shot_hits(&shot, &b));

        let mut visited = Vec::new();
        let hit = first_hit(
            &shot,
            [("miss", Rect::from_origin_size(IVec2::ZERO, IVec2::ONE)), ("a", a), ("b", b)]
                .into_iter()
                .inspect(|(key, _)| visited.push(*key)),
        );
        assert_eq!(hit, Some("a"));
        assert_eq!(visited, vec!["miss", "a"]);
    }

    #[test]
    fn test_enemy_shot_trailing_edge() {
        let mut player = Player::spawn();
        let rect = player_rect(&player);
        // Bottom of the shot one pixel above the ship top: miss
        let mut shot = Projectile::new(Owner::Enemy, IVec2::new(310, rect.min.y - PROJECTILE_H));
        assert!(!resolve_enemy_shot(&mut shot, &mut player, 100));
        shot.pos.y += 1;
        assert!(resolve_enemy_shot(&mut shot, &mut player, 100));
        assert!(!shot.visible);
        assert_eq!(player.lives, PLAYER_MAX_LIVES - 1);
    }

    #[test]
    fn test_invincible_player_lets_shot_through() {
        let mut player = Player::spawn();
        player.hit(100);
        let mut shot = Projectile::new(Owner::Enemy, IVec2::new(310, 455));
        assert!(!resolve_enemy_shot(&mut shot, &mut player, 150));
        assert!(shot.visible);
        assert_eq!(player.lives, PLAYER_MAX_LIVES - 1);
    }
}
