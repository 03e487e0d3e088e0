use rand::Rng;

use super::geometry::Aabb;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Sticky vertical drift: -1 up, 0 level, 1 down
    pub drift: i32,
}

/// Uniform pick from {-1, 0, 1}
pub fn random_drift<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(-1..=1)
}

impl Enemy {
    pub fn new(x: i32, y: i32, width: u32, height: u32, drift: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            drift: drift.clamp(-1, 1),
        }
    }

    /// Advances one tick of zig-zag motion.
    ///
    /// Moves left by `step`, applies the drift, bounces off the vertical
    /// limits of `[0, max_y]` and occasionally picks a fresh drift.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        step: i32,
        max_y: i32,
        resample_chance: f64,
        rng: &mut R,
    ) {
        self.x -= step;

        self.y += self.drift;
        if self.y < 0 || self.y > max_y {
            self.drift = -self.drift;
            self.y = self.y.clamp(0, max_y.max(0));
        }

        if rng.random_bool(resample_chance) {
            self.drift = random_drift(rng);
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// True once the right edge has passed the left side of the screen
    pub fn is_off_screen(&self) -> bool {
        self.x + (self.width as i32) < 0
    }
}
