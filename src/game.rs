//! The simulation core: one `Game` per run, advanced one tick at a time.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::collision::{enemy_reached_player, resolve_hits};
use crate::config::GameConfig;
use crate::entities::{Direction, Enemy, GameState, Player, Projectile};
use crate::fire_control::FireControl;
use crate::spawner::EnemySpawner;

/// Commands active for a single tick, sampled from input before the step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Level-triggered: held for this tick
    pub move_up: bool,
    pub move_down: bool,
    pub fire: bool,
    /// Edge-triggered: pressed since the previous tick
    pub start: bool,
}

impl TickInput {
    /// Movement for this tick; down wins when both are held
    pub fn direction(&self) -> Direction {
        if self.move_down {
            Direction::Down
        } else if self.move_up {
            Direction::Up
        } else {
            Direction::None
        }
    }
}

pub struct Game {
    config: GameConfig,
    state: GameState,
    player: Player,
    fire_control: FireControl,
    spawner: EnemySpawner,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    /// Single source of randomness for the whole run
    rng: Pcg32,
    seed: u64,
    tick_count: u64,
    enemies_destroyed: u32,
}

impl Game {
    /// New run with a random seed
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// New run driven by `seed`.
    ///
    /// `config` must pass [`GameConfig::validate`]; an out-of-range drift
    /// probability would otherwise panic on the first enemy update.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid game config: {:?}",
            config.validate()
        );
        let (player_x, player_y) = config.player_start();
        Self {
            player: Player::new(
                player_x,
                player_y,
                config.player_width,
                config.player_height,
            ),
            fire_control: FireControl::from_config(&config),
            spawner: EnemySpawner::from_config(&config),
            state: GameState::Menu,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tick_count: 0,
            enemies_destroyed: 0,
            config,
        }
    }

    /// Back to the menu with fresh entities, reseeded from this run's generator
    pub fn restart(&mut self) {
        let seed: u64 = self.rng.random();
        log::info!("Restarting with seed {}", seed);
        *self = Self::with_seed(self.config.clone(), seed);
    }

    /// Advances the game by one tick.
    ///
    /// In `Menu` only the start edge is considered. In `GameOver` nothing
    /// changes. In `Playing` every subsystem advances in a fixed order.
    pub fn step(&mut self, input: &TickInput, now: Instant) {
        match self.state {
            GameState::Menu => {
                if input.start {
                    log::info!("Game started (seed {})", self.seed);
                    self.state = GameState::Playing;
                }
            }
            GameState::Playing => self.update_game(input, now),
            GameState::GameOver => {}
        }
    }

    fn update_game(&mut self, input: &TickInput, now: Instant) {
        self.tick_count += 1;

        // Player movement and pose
        let direction = input.direction();
        if input.move_up {
            self.player.move_up(self.config.player_step);
        }
        if input.move_down {
            self.player
                .move_down(self.config.player_step, self.config.player_max_y());
        }
        self.player.set_animation(direction, input.fire);

        // Fire control
        self.fire_control.update(now);
        if input.fire && self.fire_control.try_fire(now) {
            let (x, y) = self.player.muzzle(self.config.projectile_height);
            self.projectiles.push(Projectile::new(
                x,
                y,
                self.config.projectile_width,
                self.config.projectile_height,
                self.config.projectile_velocity,
            ));
        }

        self.spawner.advance(&mut self.enemies, &mut self.rng);

        for projectile in &mut self.projectiles {
            projectile.update();
        }

        let destroyed = resolve_hits(&mut self.projectiles, &mut self.enemies);
        self.enemies_destroyed += destroyed as u32;

        if enemy_reached_player(&self.enemies, self.config.danger_line_x()) {
            log::info!(
                "Enemy reached the player after {} ticks, {} destroyed",
                self.tick_count,
                self.enemies_destroyed
            );
            self.state = GameState::GameOver;
            return;
        }

        self.spawner.try_spawn(&mut self.enemies, &mut self.rng);

        self.spawner.prune(&mut self.enemies);
        let max_x = self.config.world_width as i32;
        self.projectiles.retain(|p| !p.is_out_of_bounds(max_x));
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn fire_control(&self) -> &FireControl {
        &self.fire_control
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn enemies_destroyed(&self) -> u32 {
        self.enemies_destroyed
    }

    /// Mutable access to the live sets for setting up scenarios
    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn playing_game() -> (Game, Instant) {
        let mut game = Game::with_seed(GameConfig::default(), 42);
        let t0 = Instant::now();
        game.step(
            &TickInput {
                start: true,
                ..TickInput::default()
            },
            t0,
        );
        (game, t0)
    }

    #[test]
    fn test_starts_in_menu() {
        let game = Game::with_seed(GameConfig::default(), 1);
        assert_eq!(game.state(), GameState::Menu);
        assert!(game.enemies().is_empty());
        assert_eq!(game.fire_control().ammo_remaining(), 7);
    }

    #[test]
    fn test_menu_ignores_everything_but_start() {
        let mut game = Game::with_seed(GameConfig::default(), 1);
        let input = TickInput {
            move_up: true,
            fire: true,
            ..TickInput::default()
        };
        game.step(&input, Instant::now());
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.player().y, 227);
        assert!(game.projectiles().is_empty());
        assert_eq!(game.tick_count(), 0);
    }

    #[test]
    fn test_start_edge_enters_playing() {
        let (game, _) = playing_game();
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_first_playing_tick_spawns_enemy() {
        let (mut game, t0) = playing_game();
        game.step(&TickInput::default(), t0 + Duration::from_millis(10));
        assert_eq!(game.enemies().len(), 1);
        assert_eq!(game.enemies()[0].x, 960);
    }

    #[test]
    fn test_fire_spawns_projectile_at_muzzle() {
        let (mut game, t0) = playing_game();
        let fire = TickInput {
            fire: true,
            ..TickInput::default()
        };
        game.step(&fire, t0);
        assert_eq!(game.projectiles().len(), 1);
        // Spawned at the muzzle, then advanced once
        assert_eq!(game.projectiles()[0].x, 139 + 15);
        assert_eq!(game.projectiles()[0].y, 268);
        assert_eq!(game.fire_control().ammo_remaining(), 6);
    }

    #[test]
    fn test_projectiles_pruned_past_right_edge() {
        let (mut game, t0) = playing_game();
        game.projectiles_mut().push(Projectile::new(950, 10, 5, 5, 15));
        game.step(&TickInput::default(), t0);
        assert!(game.projectiles().is_empty());
    }

    #[test]
    fn test_restart_returns_to_menu() {
        let (mut game, t0) = playing_game();
        for i in 1..50 {
            game.step(&TickInput::default(), t0 + Duration::from_millis(10 * i));
        }
        assert!(!game.enemies().is_empty());

        game.restart();
        assert_eq!(game.state(), GameState::Menu);
        assert!(game.enemies().is_empty());
        assert_eq!(game.tick_count(), 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Game::with_seed(GameConfig::default(), 99);
        let mut b = Game::with_seed(GameConfig::default(), 99);
        let t0 = Instant::now();
        let start = TickInput {
            start: true,
            ..TickInput::default()
        };
        a.step(&start, t0);
        b.step(&start, t0);
        for i in 1..500 {
            let now = t0 + Duration::from_millis(10 * i);
            a.step(&TickInput::default(), now);
            b.step(&TickInput::default(), now);
        }
        let ys = |g: &Game| g.enemies().iter().map(|e| (e.x, e.y)).collect::<Vec<_>>();
        assert_eq!(ys(&a), ys(&b));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid game config")]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            drift_resample_chance: 2.0,
            ..GameConfig::default()
        };
        Game::with_seed(config, 7);
    }

    #[test]
    fn test_direction_precedence() {
        let both = TickInput {
            move_up: true,
            move_down: true,
            ..TickInput::default()
        };
        assert_eq!(both.direction(), Direction::Down);
        assert_eq!(TickInput::default().direction(), Direction::None);
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_input() -> impl Strategy<Value = TickInput> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(move_up, move_down, fire, start)| TickInput {
                    move_up,
                    move_down,
                    fire,
                    start,
                },
            )
        }

        proptest! {
            #[test]
            fn test_invariants_hold_for_any_inputs(
                seed in any::<u64>(),
                inputs in prop::collection::vec((any_input(), 0u64..200), 0..400)
            ) {
                let config = GameConfig::default();
                let max_y = config.player_max_y();
                let mut game = Game::with_seed(config, seed);
                let mut now = Instant::now();
                for (input, gap) in inputs {
                    now += Duration::from_millis(gap);
                    game.step(&input, now);
                    prop_assert!(game.player().y >= 0 && game.player().y <= max_y);
                    prop_assert!(game.enemies().len() <= 5);
                    prop_assert!(game.fire_control().ammo_remaining() <= 7);
                }
            }
        }
    }
}
