//! Core geometry and error types shared by every layer.

pub mod error;
pub mod rect;
pub mod vec2;

pub use error::{Result, UniverseError};
pub use rect::{Rect, Region};
pub use vec2::{Line, Vec2};

/// Time, in seconds
pub type TimeType = f64;
