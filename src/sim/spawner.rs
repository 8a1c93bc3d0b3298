//! Score-driven entity spawner
//!
//! Spawn pressure and bomb odds both rise with score. The special-branch
//! type checks are independent rolls taken in a fixed order, so the real
//! frequencies are the chained products, not the raw thresholds:
//! with bomb odds `b`, a special spawn is a Bomb with probability `b`,
//! a SpecialFruit with `(1-b)*0.5`, a PurpleFruit with `(1-b)*0.5*0.7`
//! and a SpeedBall with `(1-b)*0.5*0.3`.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityKind};
use crate::consts::*;

/// Chance of entering the special branch on a spawn
pub const SPECIAL_CHANCE: f64 = 0.1;
/// Second roll in the special branch
pub const SPECIAL_FRUIT_CHANCE: f64 = 0.5;
/// Third roll in the special branch
pub const PURPLE_FRUIT_CHANCE: f64 = 0.7;

/// Per-tick spawn probability
pub fn spawn_rate(score: u64) -> f64 {
    (0.03 + score as f64 / 6000.0).min(0.2)
}

/// Bomb odds within the special branch
pub fn bomb_probability(score: u64) -> f64 {
    (0.05 + score as f64 / 100_000.0).min(0.3)
}

/// Horizontal drift for new spawns: odd 1000-point bands drift the other way
pub fn drift_direction(score: u64) -> f32 {
    if (score / DRIFT_BAND) % 2 == 1 {
        -1.0
    } else {
        1.0
    }
}

/// Roll whether something spawns this tick
pub fn roll_spawn<R: Rng + ?Sized>(rng: &mut R, score: u64) -> bool {
    rng.random::<f64>() < spawn_rate(score)
}

/// Pick the kind of the next spawn
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R, score: u64) -> EntityKind {
    if rng.random::<f64>() >= SPECIAL_CHANCE {
        return EntityKind::Fruit;
    }

    if rng.random::<f64>() < bomb_probability(score) {
        EntityKind::Bomb
    } else if rng.random::<f64>() < SPECIAL_FRUIT_CHANCE {
        EntityKind::SpecialFruit
    } else if rng.random::<f64>() < PURPLE_FRUIT_CHANCE {
        EntityKind::PurpleFruit
    } else {
        EntityKind::SpeedBall
    }
}

/// Create a new entity just above the top edge
pub fn spawn_entity<R: Rng + ?Sized>(rng: &mut R, id: u32, score: u64, width: f32) -> Entity {
    let max_x = (width as i32 - SPAWN_MARGIN).max(SPAWN_MARGIN);
    let x = rng.random_range(SPAWN_MARGIN..=max_x) as f32;
    let kind = choose_kind(rng, score);

    let direction = drift_direction(score);
    let vx = rng.random_range(-2.0f32..=2.0) * SPEED_MULTIPLIER * direction;
    let vy = rng.random_range(2.0f32..=5.0) * SPEED_MULTIPLIER;
    let gravity = BASE_GRAVITY * SPEED_MULTIPLIER;

    log::debug!("Spawned {:?} #{} at x={}", kind, id, x);

    Entity::new(id, kind, Vec2::new(x, SPAWN_Y), Vec2::new(vx, vy), gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_spawn_rate() {
        assert!((spawn_rate(0) - 0.03).abs() < 1e-12);
        assert!((spawn_rate(600) - 0.13).abs() < 1e-12);
        assert_eq!(spawn_rate(6000), 0.2);
        assert_eq!(spawn_rate(1_000_000), 0.2);
    }

    #[test]
    fn test_bomb_probability() {
        assert!((bomb_probability(0) - 0.05).abs() < 1e-12);
        assert!((bomb_probability(10_000) - 0.15).abs() < 1e-12);
        assert_eq!(bomb_probability(25_000), 0.3);
        assert_eq!(bomb_probability(u64::MAX), 0.3);
    }

    #[test]
    fn test_drift_direction_bands() {
        assert_eq!(drift_direction(0), 1.0);
        assert_eq!(drift_direction(999), 1.0);
        assert_eq!(drift_direction(1000), -1.0);
        assert_eq!(drift_direction(1999), -1.0);
        assert_eq!(drift_direction(2000), 1.0);
        assert_eq!(drift_direction(3500), -1.0);
    }

    #[test]
    fn test_spawned_entity_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let e = spawn_entity(&mut rng, id, 0, 800.0);
            assert!((50.0..=750.0).contains(&e.pos.x));
            assert_eq!(e.pos.x.fract(), 0.0);
            assert_eq!(e.pos.y, -20.0);
            assert!((-1.0..=1.0).contains(&e.vel.x));
            assert!((1.0..=2.5).contains(&e.vel.y));
            assert!((e.gravity - 0.05).abs() < 1e-6);
            assert_eq!(e.radius, e.kind.radius());
            assert!(!e.sliced);
        }
    }

    #[test]
    fn test_odd_band_reverses_drift() {
        // Both scores are past the bomb cap, so the two streams consume the
        // same rolls and only the drift sign differs
        let mut rng_even = Pcg32::seed_from_u64(11);
        let mut rng_odd = Pcg32::seed_from_u64(11);
        for id in 0..100 {
            let even = spawn_entity(&mut rng_even, id, 26_000, 800.0);
            let odd = spawn_entity(&mut rng_odd, id, 27_000, 800.0);
            assert_eq!(even.kind, odd.kind);
            assert_eq!(even.pos, odd.pos);
            assert_eq!(even.vel.x, -odd.vel.x);
            assert_eq!(even.vel.y, odd.vel.y);
        }
    }

    #[test]
    fn test_kind_frequencies_follow_chained_rolls() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let samples = 200_000;
        let mut counts: HashMap<EntityKind, u32> = HashMap::new();
        for _ in 0..samples {
            *counts.entry(choose_kind(&mut rng, 0)).or_default() += 1;
        }

        let b = bomb_probability(0);
        let expected = [
            (EntityKind::Fruit, 0.9),
            (EntityKind::Bomb, 0.1 * b),
            (EntityKind::SpecialFruit, 0.1 * (1.0 - b) * 0.5),
            (EntityKind::PurpleFruit, 0.1 * (1.0 - b) * 0.5 * 0.7),
            (EntityKind::SpeedBall, 0.1 * (1.0 - b) * 0.5 * 0.3),
        ];
        for (kind, p) in expected {
            let observed = counts.get(&kind).copied().unwrap_or(0) as f64 / samples as f64;
            assert!(
                (observed - p).abs() < 0.005,
                "{kind:?}: observed {observed}, expected {p}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_spawn_rate_bounded(score in any::<u64>()) {
            let rate = spawn_rate(score);
            prop_assert!((0.03..=0.2).contains(&rate));
        }

        #[test]
        fn prop_bomb_probability_bounded(score in any::<u64>()) {
            let p = bomb_probability(score);
            prop_assert!((0.05..=0.3).contains(&p));
        }
    }
}
