mod enemy;
mod game_state;
mod geometry;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::{Enemy, random_drift};
pub use game_state::GameState;
pub use geometry::{Aabb, overlaps};
pub use player::{AnimationState, Direction, Player, select_animation};
pub use projectile::Projectile;
