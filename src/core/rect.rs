use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Axis-aligned box given by its bottom-left corner and its size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    /// Smallest box containing both points
    pub fn from_points(a: Vec2, b: Vec2) -> Self {
        let left = a.x.min(b.x);
        let bottom = a.y.min(b.y);
        Self {
            left,
            bottom,
            width: a.x.max(b.x) - left,
            height: a.y.max(b.y) - bottom,
        }
    }

    pub fn from_bottom_left(bottom_left: Vec2, size: Vec2) -> Self {
        Self::new(bottom_left.x, bottom_left.y, size.x, size.y)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left, self.bottom)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.bottom + self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Closed intersection test: touching edges count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right()
            && other.left <= self.right()
            && self.bottom <= other.top()
            && other.bottom <= self.top()
    }

    /// Common part of the two boxes; a zero-sized box when they are disjoint
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.left.max(other.left);
        let bottom = self.bottom.max(other.bottom);
        let right = self.right().min(other.right());
        let top = self.top().min(other.top());

        if right <= left || top <= bottom {
            Rect::new(left, bottom, 0.0, 0.0)
        } else {
            Rect::new(left, bottom, right - left, top - bottom)
        }
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        self.intersection(other).area()
    }

    pub fn includes(&self, p: Vec2) -> bool {
        self.left <= p.x && p.x <= self.right() && self.bottom <= p.y && p.y <= self.top()
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect::new(self.left + delta.x, self.bottom + delta.y, self.width, self.height)
    }
}

/// Set of rectangles making the active part of the world
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region(pub Vec<Rect>);

impl Region {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, r: Rect) {
        self.0.push(r);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn intersects(&self, r: &Rect) -> bool {
        self.0.iter().any(|a| a.intersects(r))
    }

    pub fn includes(&self, p: Vec2) -> bool {
        self.0.iter().any(|a| a.includes(p))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rect> {
        self.0.iter()
    }
}

impl From<Vec<Rect>> for Region {
    fn from(rects: Vec<Rect>) -> Self {
        Self(rects)
    }
}

impl From<Rect> for Region {
    fn from(r: Rect) -> Self {
        Self(vec![r])
    }
}
