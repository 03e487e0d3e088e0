//! World constants and tuning for the simulation.
//!
//! The world is a fixed logical resolution; the renderer scales it onto the
//! terminal, so nothing here depends on the terminal size.

use std::fmt;
use std::time::Duration;

/// Tunable parameters for one run of the game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Logical world size
    pub world_width: u32,
    pub world_height: u32,

    pub player_width: u32,
    pub player_height: u32,
    /// Vertical distance covered per tick while a move key is held
    pub player_step: i32,

    pub enemy_width: u32,
    pub enemy_height: u32,
    /// Leftward distance covered per tick
    pub enemy_step: i32,
    /// Chance per tick that an enemy picks a new drift direction
    pub drift_resample_chance: f64,
    pub max_enemies: usize,

    pub projectile_width: u32,
    pub projectile_height: u32,
    pub projectile_velocity: i32,

    /// Shots per magazine before a forced reload
    pub magazine_size: u8,
    pub shot_interval: Duration,
    pub reload_time: Duration,

    /// Nominal loop period; best effort, never caught up
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 960,
            world_height: 540,
            // 131x124 sprite scaled down by 30%
            player_width: 91,
            player_height: 86,
            player_step: 10,
            enemy_width: 35,
            enemy_height: 35,
            enemy_step: 1,
            drift_resample_chance: 0.05,
            max_enemies: 5,
            projectile_width: 5,
            projectile_height: 5,
            projectile_velocity: 15,
            magazine_size: 7,
            shot_interval: Duration::from_millis(500),
            reload_time: Duration::from_millis(2000),
            tick_interval: Duration::from_millis(10),
        }
    }
}

impl GameConfig {
    /// Where the player stands at the start of a run
    pub fn player_start(&self) -> (i32, i32) {
        let x = self.world_width as i32 / 20;
        let y = self.world_height as i32 / 2 - self.player_height as i32 / 2;
        (x, y)
    }

    pub fn player_max_y(&self) -> i32 {
        self.world_height as i32 - self.player_height as i32
    }

    pub fn enemy_max_y(&self) -> i32 {
        self.world_height as i32 - self.enemy_height as i32
    }

    /// An enemy whose left edge passes this x has reached the player
    pub fn danger_line_x(&self) -> i32 {
        self.player_start().0
    }

    /// Checks that the simulation invariants can hold for this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width == 0 || self.world_height == 0 {
            return Err(ConfigError::EmptyWorld);
        }
        let entities = [
            ("player", self.player_width, self.player_height),
            ("enemy", self.enemy_width, self.enemy_height),
            ("projectile", self.projectile_width, self.projectile_height),
        ];
        for (name, width, height) in entities {
            if width == 0
                || height == 0
                || width > self.world_width
                || height > self.world_height
            {
                return Err(ConfigError::EntityTooLarge(name));
            }
        }
        if self.magazine_size == 0 {
            return Err(ConfigError::EmptyMagazine);
        }
        if self.max_enemies == 0 {
            return Err(ConfigError::NoEnemies);
        }
        if !(0.0..=1.0).contains(&self.drift_resample_chance) {
            return Err(ConfigError::BadProbability(self.drift_resample_chance));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyWorld,
    /// The named entity has a zero dimension or cannot fit inside the world
    EntityTooLarge(&'static str),
    EmptyMagazine,
    NoEnemies,
    BadProbability(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyWorld => write!(f, "world must have a non-zero size"),
            ConfigError::EntityTooLarge(name) => {
                write!(f, "{} size does not fit inside the world", name)
            }
            ConfigError::EmptyMagazine => write!(f, "magazine must hold at least one shot"),
            ConfigError::NoEnemies => write!(f, "at least one enemy must be allowed"),
            ConfigError::BadProbability(p) => {
                write!(f, "drift resample chance {} is not a probability", p)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_player_start() {
        let config = GameConfig::default();
        assert_eq!(config.player_start(), (48, 227));
        assert_eq!(config.danger_line_x(), 48);
    }

    #[test]
    fn test_vertical_limits() {
        let config = GameConfig::default();
        assert_eq!(config.player_max_y(), 454);
        assert_eq!(config.enemy_max_y(), 505);
    }

    #[test]
    fn test_rejects_oversized_enemy() {
        let config = GameConfig {
            enemy_height: 600,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EntityTooLarge("enemy")));
    }

    #[test]
    fn test_rejects_empty_magazine() {
        let config = GameConfig {
            magazine_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyMagazine));
        assert_eq!(
            ConfigError::EmptyMagazine.to_string(),
            "magazine must hold at least one shot"
        );
    }

    #[test]
    fn test_entity_size_limits_are_consistent() {
        let flat_player = GameConfig {
            player_height: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            flat_player.validate(),
            Err(ConfigError::EntityTooLarge("player"))
        );

        let flat_enemy = GameConfig {
            enemy_height: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            flat_enemy.validate(),
            Err(ConfigError::EntityTooLarge("enemy"))
        );

        // Filling the whole world height is allowed for both
        let tall = GameConfig {
            player_height: 540,
            enemy_height: 540,
            ..GameConfig::default()
        };
        assert_eq!(tall.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_resample_chance() {
        let config = GameConfig {
            drift_resample_chance: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BadProbability(1.5)));
    }
}
