//! Pairwise collision description and repair.
//!
//! When two boxes overlap at the end of a move, each item receives a
//! `CollisionInfo` telling from which side the other one came and where it
//! stood when the boxes first touched. The hooks may realign the items and
//! choose a contact normal, then the `CollisionRepair` exchanges momentum
//! along that normal.

mod alignment;
mod context;
mod info;
mod repair;
mod zone;

pub use alignment::align;
pub use context::{CollisionContext, ContactMode};
pub use info::CollisionInfo;
pub use repair::{restitution, CollisionRepair};
pub use zone::Zone;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
