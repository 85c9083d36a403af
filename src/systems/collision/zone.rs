use crate::core::Rect;

/// Position of a box relative to a reference box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    TopLeft,
    Top,
    TopRight,
    MiddleLeft,
    Middle,
    MiddleRight,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Zone {
    pub const ALL: [Zone; 9] = [
        Zone::TopLeft,
        Zone::Top,
        Zone::TopRight,
        Zone::MiddleLeft,
        Zone::Middle,
        Zone::MiddleRight,
        Zone::BottomLeft,
        Zone::Bottom,
        Zone::BottomRight,
    ];

    /// Zone of `that` around `reference`. Touching edges count as outside.
    pub fn find(that: &Rect, reference: &Rect) -> Zone {
        let above = that.bottom >= reference.top();
        let below = that.top() <= reference.bottom;
        let left = that.right() <= reference.left;
        let right = that.left >= reference.right();

        match (above, below, left, right) {
            (true, _, true, _) => Zone::TopLeft,
            (true, _, _, true) => Zone::TopRight,
            (true, _, _, _) => Zone::Top,
            (_, true, true, _) => Zone::BottomLeft,
            (_, true, _, true) => Zone::BottomRight,
            (_, true, _, _) => Zone::Bottom,
            (_, _, true, _) => Zone::MiddleLeft,
            (_, _, _, true) => Zone::MiddleRight,
            _ => Zone::Middle,
        }
    }

    pub fn opposite(self) -> Zone {
        match self {
            Zone::TopLeft => Zone::BottomRight,
            Zone::Top => Zone::Bottom,
            Zone::TopRight => Zone::BottomLeft,
            Zone::MiddleLeft => Zone::MiddleRight,
            Zone::Middle => Zone::Middle,
            Zone::MiddleRight => Zone::MiddleLeft,
            Zone::BottomLeft => Zone::TopRight,
            Zone::Bottom => Zone::Top,
            Zone::BottomRight => Zone::TopLeft,
        }
    }

    /// Corners fold onto the top or bottom side
    pub fn to_side(self) -> Zone {
        match self {
            Zone::TopLeft | Zone::TopRight => Zone::Top,
            Zone::BottomLeft | Zone::BottomRight => Zone::Bottom,
            z => z,
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Zone::TopLeft | Zone::TopRight | Zone::BottomLeft | Zone::BottomRight
        )
    }
}
