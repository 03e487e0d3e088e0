// Library exports for testing
pub use config::{ConfigError, GameConfig};
pub use entities::{
    Aabb, AnimationState, Direction, Enemy, GameState, Player, Projectile, overlaps,
    select_animation,
};
pub use fire_control::{FireControl, FireState};
pub use game::{Game, TickInput};

pub mod app;
pub mod collision;
pub mod config;
pub mod entities;
pub mod fire_control;
pub mod game;
pub mod input;
pub mod renderer;
pub mod spawner;
pub mod sprites;
