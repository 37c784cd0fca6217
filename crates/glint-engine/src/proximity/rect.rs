use glam::Vec2;

/// Axis-aligned bounding rectangle in page coordinates (CSS pixels, y-down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from the DOMRect convention: origin + extent.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Euclidean distance from `point` to the nearest edge. Zero inside.
    pub fn distance_to(&self, point: Vec2) -> f32 {
        let clamped = point.clamp(self.min, self.max);
        point.distance(clamped)
    }
}
