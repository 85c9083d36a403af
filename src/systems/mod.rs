//! Physics systems driven by the world: environment queries, movements,
//! links and collisions.

pub mod collision;
pub mod environment;
pub mod forced_movement;
pub mod link;
pub mod reference_point;

pub use collision::{CollisionContext, CollisionInfo, CollisionRepair, ContactMode, Zone};
pub use environment::{PhysicsEnvironment, RuleId};
pub use forced_movement::{ForcedMovement, MovementKind, MovementScope};
pub use link::{Link, LinkKind};
pub use reference_point::ReferencePoint;
