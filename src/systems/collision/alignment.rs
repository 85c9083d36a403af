//! Position of the other box at the moment it touched the reference box.
//!
//! The other box is moved back along the line joining its previous
//! bottom-left corner to its current one, until it lies on the edge of the
//! reference box selected by the zone it came from.

use crate::core::{Line, Rect, Vec2};

use super::zone::Zone;

/// Aligns `that` on `reference`, knowing that it came from `zone` and that
/// its bottom-left corner was at `previous_bottom_left`. Returns the aligned
/// box and the side of `reference` that was hit.
pub fn align(zone: Zone, reference: &Rect, previous_bottom_left: Vec2, that: &Rect) -> (Rect, Zone) {
    let trajectory = Line::new(previous_bottom_left, that.bottom_left() - previous_bottom_left);
    let on_top = reference.top();
    let on_bottom = reference.bottom - that.height;
    let on_left = reference.left - that.width;
    let on_right = reference.right();

    let (bottom_left, side) = match zone {
        Zone::Top => (horizontal(&trajectory, that, on_top), Zone::Top),
        Zone::Bottom => (horizontal(&trajectory, that, on_bottom), Zone::Bottom),
        Zone::MiddleLeft => (vertical(&trajectory, that, on_left), Zone::MiddleLeft),
        Zone::MiddleRight => (vertical(&trajectory, that, on_right), Zone::MiddleRight),
        Zone::TopLeft => {
            let p = horizontal(&trajectory, that, on_top);
            if p.x + that.width > reference.left {
                (p, Zone::Top)
            } else {
                (vertical(&trajectory, that, on_left), Zone::MiddleLeft)
            }
        }
        Zone::TopRight => {
            let p = horizontal(&trajectory, that, on_top);
            if p.x < reference.right() {
                (p, Zone::Top)
            } else {
                (vertical(&trajectory, that, on_right), Zone::MiddleRight)
            }
        }
        Zone::BottomLeft => {
            let p = horizontal(&trajectory, that, on_bottom);
            if p.x + that.width > reference.left {
                (p, Zone::Bottom)
            } else {
                (vertical(&trajectory, that, on_left), Zone::MiddleLeft)
            }
        }
        Zone::BottomRight => {
            let p = horizontal(&trajectory, that, on_bottom);
            if p.x < reference.right() {
                (p, Zone::Bottom)
            } else {
                (vertical(&trajectory, that, on_right), Zone::MiddleRight)
            }
        }
        Zone::Middle => (that.bottom_left(), Zone::Middle),
    };

    (Rect::from_bottom_left(bottom_left, that.size()), side)
}

/// Point of the trajectory at height `y`
fn horizontal(trajectory: &Line, that: &Rect, y: f64) -> Vec2 {
    let edge = Line::new(Vec2::new(0.0, y), Vec2::new(1.0, 0.0));
    match trajectory.intersection(&edge) {
        Some(p) => Vec2::new(p.x, y),
        None => Vec2::new(that.left, y),
    }
}

/// Point of the trajectory at abscissa `x`
fn vertical(trajectory: &Line, that: &Rect, x: f64) -> Vec2 {
    let edge = Line::new(Vec2::new(x, 0.0), Vec2::new(0.0, 1.0));
    match trajectory.intersection(&edge) {
        Some(p) => Vec2::new(x, p.y),
        None => Vec2::new(x, that.bottom),
    }
}
