//! Enemy spawning, per-tick motion and off-screen pruning.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Aabb, Enemy, random_drift};

#[derive(Debug, Clone)]
pub struct EnemySpawner {
    max_enemies: usize,
    /// Enemies enter at the right edge of the world
    spawn_x: i32,
    enemy_width: u32,
    enemy_height: u32,
    enemy_step: i32,
    max_y: i32,
    resample_chance: f64,
}

impl EnemySpawner {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            max_enemies: config.max_enemies,
            spawn_x: config.world_width as i32,
            enemy_width: config.enemy_width,
            enemy_height: config.enemy_height,
            enemy_step: config.enemy_step,
            max_y: config.enemy_max_y(),
            resample_chance: config.drift_resample_chance,
        }
    }

    pub fn max_enemies(&self) -> usize {
        self.max_enemies
    }

    /// Moves every enemy one tick along its zig-zag path
    pub fn advance<R: Rng + ?Sized>(&self, enemies: &mut [Enemy], rng: &mut R) {
        for enemy in enemies.iter_mut() {
            enemy.update(self.enemy_step, self.max_y, self.resample_chance, rng);
        }
    }

    /// Spawns at most one enemy at a random height on the right edge.
    ///
    /// The attempt is dropped for this tick when the candidate would overlap
    /// an existing enemy. Returns true if an enemy was added.
    pub fn try_spawn<R: Rng + ?Sized>(&self, enemies: &mut Vec<Enemy>, rng: &mut R) -> bool {
        if enemies.len() >= self.max_enemies {
            return false;
        }

        let y = rng.random_range(0..self.max_y.max(1));
        let candidate = Aabb::new(self.spawn_x, y, self.enemy_width, self.enemy_height);
        if enemies.iter().any(|e| e.bounds().overlaps(&candidate)) {
            log::trace!("Spawn at y={} blocked", y);
            return false;
        }

        let drift = random_drift(rng);
        enemies.push(Enemy::new(
            self.spawn_x,
            y,
            self.enemy_width,
            self.enemy_height,
            drift,
        ));
        true
    }

    /// Drops enemies that have fully left the screen on the left side.
    /// Returns how many were removed.
    pub fn prune(&self, enemies: &mut Vec<Enemy>) -> usize {
        let before = enemies.len();
        enemies.retain(|e| !e.is_off_screen());
        before - enemies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawner() -> EnemySpawner {
        EnemySpawner::from_config(&GameConfig::default())
    }

    #[test]
    fn test_spawn_into_empty_world() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemies = Vec::new();
        assert!(spawner().try_spawn(&mut enemies, &mut rng));
        assert_eq!(enemies.len(), 1);

        let enemy = &enemies[0];
        assert_eq!(enemy.x, 960);
        assert!(enemy.y >= 0 && enemy.y < 505);
        assert_eq!((enemy.width, enemy.height), (35, 35));
    }

    #[test]
    fn test_spawn_respects_maximum() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut enemies: Vec<Enemy> = (0..5)
            .map(|i| Enemy::new(100 * i, 10, 35, 35, 0))
            .collect();
        assert!(!spawner().try_spawn(&mut enemies, &mut rng));
        assert_eq!(enemies.len(), 5);
    }

    #[test]
    fn test_spawn_rejected_on_overlap() {
        let mut rng = Pcg32::seed_from_u64(3);
        // A column of enemies every 36 units covers every candidate height
        let mut enemies: Vec<Enemy> = Vec::new();
        let config = GameConfig {
            max_enemies: 100,
            ..GameConfig::default()
        };
        let spawner = EnemySpawner::from_config(&config);
        let mut y = 0;
        while y <= 540 {
            enemies.push(Enemy::new(960, y, 35, 35, 0));
            y += 36;
        }
        let count = enemies.len();
        for _ in 0..50 {
            assert!(!spawner.try_spawn(&mut enemies, &mut rng));
        }
        assert_eq!(enemies.len(), count);
    }

    #[test]
    fn test_advance_moves_all_left() {
        let config = GameConfig {
            drift_resample_chance: 0.0,
            ..GameConfig::default()
        };
        let spawner = EnemySpawner::from_config(&config);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut enemies = vec![
            Enemy::new(500, 100, 35, 35, 0),
            Enemy::new(700, 300, 35, 35, 1),
        ];
        spawner.advance(&mut enemies, &mut rng);
        assert_eq!(enemies[0].x, 499);
        assert_eq!(enemies[1].x, 699);
        assert_eq!(enemies[1].y, 301);
    }

    #[test]
    fn test_prune_off_screen() {
        let mut enemies = vec![
            Enemy::new(-36, 100, 35, 35, 0),
            Enemy::new(-35, 100, 35, 35, 0),
            Enemy::new(400, 100, 35, 35, 0),
        ];
        assert_eq!(spawner().prune(&mut enemies), 1);
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[0].x, -35);
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_count_never_exceeds_max(seed in any::<u64>(), ticks in 0usize..3000) {
                let spawner = spawner();
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut enemies = Vec::new();
                for _ in 0..ticks {
                    spawner.advance(&mut enemies, &mut rng);
                    spawner.try_spawn(&mut enemies, &mut rng);
                    spawner.prune(&mut enemies);
                    prop_assert!(enemies.len() <= spawner.max_enemies());
                }
            }
        }
    }
}
