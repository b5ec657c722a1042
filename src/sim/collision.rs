//! Overlap and containment geometry for the claw, prizes, and drop zone
//!
//! Grab arbitration is a strict center-distance test; zone detection is
//! circle-vs-rectangle via the closest contained point.

use glam::Vec2;

use super::state::{DropZone, Prize};

/// A floor bounce slower than this kills the rebound so prizes settle
pub const MIN_BOUNCE_SPEED: f32 = 20.0;

/// Grab tolerance test: succeeds only strictly inside the grab radius
#[inline]
pub fn claw_can_grab(claw_pos: Vec2, prize_pos: Vec2, grab_radius: f32) -> bool {
    claw_pos.distance(prize_pos) < grab_radius
}

/// Does the prize circle overlap the drop zone rectangle?
pub fn prize_in_zone(pos: Vec2, radius: f32, zone: &DropZone) -> bool {
    let closest = pos.clamp(zone.min, zone.max);
    pos.distance_squared(closest) <= radius * radius
}

/// Collide a free prize with the playfield walls, ceiling, and floor.
///
/// Reflected velocity is scaled by the bounce factor; a floor contact below
/// `MIN_BOUNCE_SPEED` zeroes the vertical velocity instead of rebounding.
/// Returns true when the prize is resting on the floor.
pub fn settle_against_bounds(prize: &mut Prize, field: Vec2, bounce: f32) -> bool {
    let r = prize.radius;

    if prize.pos.x < r {
        prize.pos.x = r;
        prize.vel.x = -prize.vel.x * bounce;
    } else if prize.pos.x > field.x - r {
        prize.pos.x = field.x - r;
        prize.vel.x = -prize.vel.x * bounce;
    }

    if prize.pos.y < r {
        prize.pos.y = r;
        prize.vel.y = -prize.vel.y * bounce;
    }

    let floor = field.y - r;
    if prize.pos.y >= floor {
        prize.pos.y = floor;
        if prize.vel.y.abs() > MIN_BOUNCE_SPEED {
            prize.vel.y = -prize.vel.y * bounce;
        } else {
            prize.vel.y = 0.0;
            // Friction so resting prizes don't drift along the floor
            prize.vel.x *= 0.9;
        }
        return prize.vel.y == 0.0;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_tolerance_boundary() {
        let claw = Vec2::new(400.0, 500.0);

        // Just under the threshold grabs
        assert!(claw_can_grab(claw, Vec2::new(449.9, 500.0), 50.0));
        // Exactly at the threshold does not
        assert!(!claw_can_grab(claw, Vec2::new(450.0, 500.0), 50.0));
        // Just over does not
        assert!(!claw_can_grab(claw, Vec2::new(450.1, 500.0), 50.0));
    }

    #[test]
    fn test_grab_uses_euclidean_distance() {
        let claw = Vec2::new(0.0, 0.0);
        // 3-4-5 triangle: distance 50 exactly
        assert!(!claw_can_grab(claw, Vec2::new(30.0, 40.0), 50.0));
        assert!(claw_can_grab(claw, Vec2::new(29.0, 40.0), 50.0));
    }

    #[test]
    fn test_prize_in_zone() {
        let zone = DropZone {
            min: Vec2::new(300.0, 560.0),
            max: Vec2::new(500.0, 600.0),
        };

        // Center well inside
        assert!(prize_in_zone(Vec2::new(400.0, 580.0), 24.0, &zone));
        // Overlapping the left edge from outside
        assert!(prize_in_zone(Vec2::new(280.0, 580.0), 24.0, &zone));
        // Clear miss
        assert!(!prize_in_zone(Vec2::new(100.0, 580.0), 24.0, &zone));
        // Above the zone, out of reach
        assert!(!prize_in_zone(Vec2::new(400.0, 500.0), 24.0, &zone));
    }

    #[test]
    fn test_floor_bounce_damps_velocity() {
        let mut prize = Prize::new(1, Vec2::new(400.0, 590.0), 24.0);
        prize.vel = Vec2::new(0.0, 100.0);

        let resting = settle_against_bounds(&mut prize, Vec2::new(800.0, 600.0), 0.3);
        assert!(!resting);
        assert_eq!(prize.pos.y, 576.0);
        assert!((prize.vel.y - (-30.0)).abs() < 0.001);
    }

    #[test]
    fn test_slow_floor_contact_comes_to_rest() {
        let mut prize = Prize::new(1, Vec2::new(400.0, 599.0), 24.0);
        prize.vel = Vec2::new(0.0, 10.0);

        let resting = settle_against_bounds(&mut prize, Vec2::new(800.0, 600.0), 0.3);
        assert!(resting);
        assert_eq!(prize.vel.y, 0.0);
    }

    #[test]
    fn test_wall_bounce() {
        let mut prize = Prize::new(1, Vec2::new(10.0, 300.0), 24.0);
        prize.vel = Vec2::new(-50.0, 0.0);

        settle_against_bounds(&mut prize, Vec2::new(800.0, 600.0), 0.3);
        assert_eq!(prize.pos.x, 24.0);
        assert!(prize.vel.x > 0.0);
    }
}
