use super::geometry::Aabb;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Horizontal units per tick; positive travels right
    pub velocity_x: i32,
}

impl Projectile {
    pub fn new(x: i32, y: i32, width: u32, height: u32, velocity_x: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            velocity_x,
        }
    }

    pub fn update(&mut self) {
        self.x += self.velocity_x;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Outside the horizontal span `[0, max_x]` of the world
    pub fn is_out_of_bounds(&self, max_x: i32) -> bool {
        self.x > max_x || self.x + (self.width as i32) < 0
    }
}
