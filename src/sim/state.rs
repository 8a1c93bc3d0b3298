//! Game state and the score/health/combo rules
//!
//! All mutable run state lives in one [`GameState`] threaded through `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::{CursorTrail, Projectile, ReboundPlatform, Turret};
use super::entity::{Entity, EntityKind, SliceEffect, slice_matching};
use super::frame::{Color, Drawable, Hud, RenderableFrame};
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Health ran out; the state no longer advances
    GameOver,
}

/// Complete run state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub(crate) rng: Pcg32,
    pub score: u64,
    pub health: u32,
    /// Consecutive scoring slices since the last miss or bomb
    pub combo: u32,
    pub special_charge: u8,
    /// Clock time (seconds) of the latest tick
    pub elapsed_time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub turret: Turret,
    /// At most one platform is alive at a time
    pub platform: Option<ReboundPlatform>,
    /// Active entities, in spawn order
    pub entities: Vec<Entity>,
    pub projectiles: Vec<Projectile>,
    pub cursor: Vec2,
    pub trail: CursorTrail,
    /// Horizontal drift sign used for the latest spawn
    pub drift_direction: f32,
    next_id: u32,
}

impl GameState {
    /// Start a new run. Rejects configurations the simulation can't honour.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = Vec2::new(config.width, config.height);
        log::info!(
            "New run: seed={}, play area {}x{}",
            seed,
            config.width,
            config.height
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            health: config.start_health,
            combo: 0,
            special_charge: config.start_special,
            elapsed_time: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            turret: Turret::new(bounds),
            platform: None,
            entities: Vec::new(),
            projectiles: Vec::new(),
            cursor: Vec2::ZERO,
            trail: CursorTrail::new(),
            drift_direction: 1.0,
            next_id: 1,
            config,
        })
    }

    /// Play-area size
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.config.width, self.config.height)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an entity with the standard gravity; returns its ID
    pub fn add_entity(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.entities
            .push(Entity::new(id, kind, pos, vel, BASE_GRAVITY * SPEED_MULTIPLIER));
        id
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn is_game_over(&self) -> bool {
        self.health == 0
    }

    /// Apply scoring and side effects for one freshly sliced entity
    ///
    /// Callers must only pass entities whose `slice()` just returned true.
    pub fn apply_slice(&mut self, kind: EntityKind) {
        if let Some(points) = kind.points() {
            self.score += u64::from(points);
            self.combo += 1;
            if self.combo > COMBO_BONUS_THRESHOLD {
                self.score += u64::from(self.combo);
            }
        }

        match kind.slice_effect() {
            SliceEffect::Heal => {
                self.health = self.health.saturating_add(1).min(self.config.max_health);
            }
            SliceEffect::RefillSpecial => {
                self.special_charge = (self.special_charge + 1).min(MAX_SPECIAL_CHARGE);
            }
            SliceEffect::SpawnPlatform => self.raise_platform(),
            SliceEffect::BoostFireRate => {
                self.turret.boost_fire_rate();
                log::debug!("Fire rate boosted to {:.1}", self.turret.fire_rate);
            }
            SliceEffect::Detonate => {
                log::debug!("Bomb hit at score {}", self.score);
                self.health = 0;
                self.combo = 0;
            }
        }
    }

    /// An unsliced scoring entity fell off the bottom
    pub fn register_miss(&mut self) {
        self.health = self.health.saturating_sub(1);
        self.combo = 0;
        log::debug!("Missed, health now {}", self.health);
    }

    /// Raise a fresh rebound platform, replacing any live one
    pub fn raise_platform(&mut self) {
        if self.platform.is_some() {
            log::info!("Rebound platform replaced");
        } else {
            log::info!("Rebound platform raised");
        }
        self.platform = Some(ReboundPlatform::new(self.bounds()));
    }

    /// Spend a special charge to clear every unsliced entity except bombs
    /// and special fruit. Returns how many entities were cleared.
    pub fn use_special(&mut self) -> usize {
        if self.special_charge == 0 {
            return 0;
        }
        self.special_charge -= 1;

        let cleared = slice_matching(&mut self.entities, |e| e.kind.special_clearable());
        for &kind in &cleared {
            self.apply_slice(kind);
        }

        log::info!(
            "Special used: cleared {}, {} charge(s) left",
            cleared.len(),
            self.special_charge
        );
        cleared.len()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            health: self.health,
            combo: self.combo,
            special_charge: self.special_charge,
            fire_rate: self.turret.fire_rate,
        }
    }

    /// Snapshot what the adapter should draw, back to front
    pub fn frame(&self) -> RenderableFrame {
        let mut drawables =
            Vec::with_capacity(self.entities.len() + self.projectiles.len() + 4);

        if self.trail.len() > 1 {
            drawables.push(Drawable::Trail {
                points: self.trail.points().collect(),
                color: Color::RED,
            });
        }

        drawables.extend(self.entities.iter().map(|e| Drawable::Entity {
            id: e.id,
            kind: e.kind,
            center: e.pos,
            radius: e.radius,
            color: e.color(),
            sliced: e.sliced,
        }));

        drawables.extend(self.projectiles.iter().map(|p| Drawable::Projectile {
            pos: p.pos,
            size: Vec2::new(p.width, p.height),
            color: Color::RED,
        }));

        if let Some(platform) = &self.platform {
            drawables.push(Drawable::Platform {
                pos: platform.pos,
                size: platform.size,
                color: Color::PURPLE,
            });
        }

        drawables.push(Drawable::Turret {
            pos: self.turret.pos,
            size: self.turret.size,
            color: Color::BLACK,
        });
        drawables.push(Drawable::Cursor {
            pos: self.cursor,
            color: Color::BLACK,
        });

        RenderableFrame {
            drawables,
            hud: self.hud(),
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 12345).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = new_state();
        assert_eq!(state.score, 0);
        assert_eq!(state.health, 3);
        assert_eq!(state.combo, 0);
        assert_eq!(state.special_charge, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.platform.is_none());
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = GameState::new(GameConfig::with_play_area(-1.0, 600.0), 1);
        assert!(matches!(result, Err(ConfigError::InvalidPlayArea { .. })));
    }

    #[test]
    fn test_combo_bonus_starts_at_fourth() {
        let mut state = new_state();
        let mut scores = Vec::new();
        for _ in 0..5 {
            state.apply_slice(EntityKind::SpeedBall); // 2 points, no health change
            scores.push(state.score);
        }
        // 2, 4, 6, then 8 + 4 bonus, then 14 + 5 bonus
        assert_eq!(scores, vec![2, 4, 6, 12, 19]);
        assert_eq!(state.combo, 5);
    }

    #[test]
    fn test_fruit_heals_up_to_max() {
        let mut state = new_state();
        for _ in 0..20 {
            state.apply_slice(EntityKind::Fruit);
        }
        assert_eq!(state.health, 10);
    }

    #[test]
    fn test_heal_at_largest_health_does_not_wrap() {
        let config = GameConfig {
            max_health: u32::MAX,
            start_health: u32::MAX,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, 1).unwrap();
        state.apply_slice(EntityKind::Fruit);
        assert_eq!(state.health, u32::MAX);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_special_fruit_refills_charge_capped() {
        let mut state = new_state();
        state.special_charge = 1;
        state.apply_slice(EntityKind::SpecialFruit);
        assert_eq!(state.special_charge, 2);
        state.apply_slice(EntityKind::SpecialFruit);
        state.apply_slice(EntityKind::SpecialFruit);
        assert_eq!(state.special_charge, 3);
        assert_eq!(state.score, 3 + 3 + 3);
    }

    #[test]
    fn test_speed_ball_boosts_once_per_slice() {
        let mut state = new_state();
        state.apply_slice(EntityKind::SpeedBall);
        assert_eq!(state.turret.fire_rate, 1.5);
    }

    #[test]
    fn test_bomb_ends_run_and_resets_combo() {
        let mut state = new_state();
        state.apply_slice(EntityKind::Fruit);
        state.apply_slice(EntityKind::Fruit);
        let score = state.score;
        state.apply_slice(EntityKind::Bomb);
        assert_eq!(state.health, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, score);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_miss_saturates_at_zero() {
        let mut state = new_state();
        state.combo = 7;
        for _ in 0..5 {
            state.register_miss();
        }
        assert_eq!(state.health, 0);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_purple_fruit_replaces_platform() {
        let mut state = new_state();
        state.apply_slice(EntityKind::PurpleFruit);
        let platform = state.platform.as_mut().unwrap();
        platform.bounces = 6;
        platform.pos.x = 0.0;

        state.apply_slice(EntityKind::PurpleFruit);
        let platform = state.platform.as_ref().unwrap();
        assert_eq!(platform.bounces, 0);
        assert_eq!(platform.pos.x, 300.0);
    }

    #[test]
    fn test_special_skips_bombs_and_special_fruit() {
        let mut state = new_state();
        state.special_charge = 1;
        let fruit = state.add_entity(EntityKind::Fruit, Vec2::new(100.0, 100.0), Vec2::ZERO);
        let bomb = state.add_entity(EntityKind::Bomb, Vec2::new(200.0, 100.0), Vec2::ZERO);
        let special = state.add_entity(
            EntityKind::SpecialFruit,
            Vec2::new(300.0, 100.0),
            Vec2::ZERO,
        );
        let purple = state.add_entity(EntityKind::PurpleFruit, Vec2::new(400.0, 100.0), Vec2::ZERO);
        let speed = state.add_entity(EntityKind::SpeedBall, Vec2::new(500.0, 100.0), Vec2::ZERO);

        assert_eq!(state.use_special(), 3);
        assert_eq!(state.special_charge, 0);

        assert!(state.entity(fruit).unwrap().sliced);
        assert!(!state.entity(bomb).unwrap().sliced);
        assert!(!state.entity(special).unwrap().sliced);
        assert!(state.entity(purple).unwrap().sliced);
        assert!(state.entity(speed).unwrap().sliced);

        assert_eq!(state.health, 4); // fruit healed, bomb untouched
        assert_eq!(state.score, 1 + 5 + 2);
        assert_eq!(state.combo, 3);
        assert!(state.platform.is_some());
        assert_eq!(state.turret.fire_rate, 1.5);
    }

    #[test]
    fn test_special_does_not_rescore_sliced() {
        let mut state = new_state();
        let id = state.add_entity(EntityKind::Fruit, Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert_eq!(state.use_special(), 1);
        let score = state.score;

        assert_eq!(state.use_special(), 0);
        assert_eq!(state.score, score);
        assert_eq!(state.special_charge, 1);
        assert!(state.entity(id).unwrap().sliced);
    }

    #[test]
    fn test_special_without_charge_is_noop() {
        let mut state = new_state();
        state.special_charge = 0;
        state.add_entity(EntityKind::Fruit, Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert_eq!(state.use_special(), 0);
        assert!(!state.entities[0].sliced);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_frame_mirrors_state() {
        let mut state = new_state();
        state.add_entity(EntityKind::Bomb, Vec2::new(100.0, 100.0), Vec2::ZERO);
        state.projectiles.push(Projectile::new(Vec2::new(10.0, 10.0)));
        state.raise_platform();
        state.cursor = Vec2::new(5.0, 6.0);

        let frame = state.frame();
        assert_eq!(frame.hud, state.hud());
        assert_eq!(frame.entity_count(), 1);
        // No trail yet: entity, projectile, platform, turret, cursor
        assert_eq!(frame.drawables.len(), 5);
        assert!(matches!(
            frame.drawables.last(),
            Some(Drawable::Cursor { pos, .. }) if *pos == Vec2::new(5.0, 6.0)
        ));
        assert!(matches!(
            frame.drawables[0],
            Drawable::Entity { color: Color::RED, .. }
        ));

        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"score\":0"));
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_bounds(events in proptest::collection::vec(0u8..6, 0..200)) {
            let mut state = new_state();
            for event in events {
                match event {
                    0 => state.register_miss(),
                    n => state.apply_slice(EntityKind::ALL[usize::from(n - 1)]),
                }
                prop_assert!(state.health <= state.config.max_health);
                prop_assert!(state.special_charge <= MAX_SPECIAL_CHARGE);
            }
        }

        #[test]
        fn prop_score_never_decreases(events in proptest::collection::vec(0u8..6, 0..200)) {
            let mut state = new_state();
            let mut last = 0;
            for event in events {
                match event {
                    0 => state.register_miss(),
                    n => state.apply_slice(EntityKind::ALL[usize::from(n - 1)]),
                }
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
