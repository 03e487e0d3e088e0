use super::geometry::Aabb;

/// Vertical movement requested this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
}

/// The six poses the player sprite can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    MovingUp,
    MovingDown,
    FiringIdle,
    FiringUp,
    FiringDown,
}

impl AnimationState {
    pub const ALL: [AnimationState; 6] = [
        AnimationState::Idle,
        AnimationState::FiringIdle,
        AnimationState::MovingUp,
        AnimationState::MovingDown,
        AnimationState::FiringUp,
        AnimationState::FiringDown,
    ];

    /// Position of this pose in the sprite sheet
    pub fn frame_index(&self) -> usize {
        match self {
            AnimationState::Idle => 0,
            AnimationState::FiringIdle => 1,
            AnimationState::MovingUp => 2,
            AnimationState::MovingDown => 3,
            AnimationState::FiringUp => 4,
            AnimationState::FiringDown => 5,
        }
    }

    /// Inverse of [`frame_index`](Self::frame_index); unknown frames fall back to idle
    pub fn from_frame_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(state) => *state,
            None => {
                log::warn!("Animation frame {} out of range, using idle", index);
                AnimationState::Idle
            }
        }
    }

    pub fn is_firing(&self) -> bool {
        matches!(
            self,
            AnimationState::FiringIdle | AnimationState::FiringUp | AnimationState::FiringDown
        )
    }
}

/// Picks the pose for a movement direction and whether the fire key is held.
/// Firing takes precedence but keeps the movement variant.
pub fn select_animation(direction: Direction, firing: bool) -> AnimationState {
    match (firing, direction) {
        (true, Direction::Up) => AnimationState::FiringUp,
        (true, Direction::Down) => AnimationState::FiringDown,
        (true, Direction::None) => AnimationState::FiringIdle,
        (false, Direction::Up) => AnimationState::MovingUp,
        (false, Direction::Down) => AnimationState::MovingDown,
        (false, Direction::None) => AnimationState::Idle,
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub animation: AnimationState,
}

impl Player {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            animation: AnimationState::Idle,
        }
    }

    pub fn move_up(&mut self, step: i32) {
        self.y = (self.y - step).max(0);
    }

    pub fn move_down(&mut self, step: i32, max_y: i32) {
        self.y = (self.y + step).min(max_y.max(0));
    }

    pub fn set_animation(&mut self, direction: Direction, firing: bool) {
        self.animation = select_animation(direction, firing);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Spawn point for projectiles: right edge, vertically centred
    pub fn muzzle(&self, projectile_height: u32) -> (i32, i32) {
        let x = self.x + self.width as i32;
        let y = self.y + self.height as i32 / 2 - projectile_height as i32 / 2;
        (x, y)
    }
}
