/// Axis-aligned bounding box in world units.
///
/// Sizes are unsigned so no entity can ever carry a negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Aabb {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Rectangle intersection; boxes that only touch along an edge count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }
}

pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.x <= b.right() && b.x <= a.right() && a.y <= b.bottom() && b.y <= a.bottom()
}
