pub mod behavior;
pub mod commands;
pub mod environment;
pub mod handle;
pub mod item;
pub mod progress;
pub mod settings;
pub mod state;

pub use behavior::{ItemBehavior, ItemContext, MoveContext, Solid};
pub use commands::{CommandQueue, WorldCommand};
pub use environment::Environment;
pub use handle::{ItemArena, ItemHandle, ItemId, LinkId};
pub use item::PhysicalItem;
pub use progress::ProgressStructure;
pub use settings::WorldSettings;
pub use state::{ContactRange, Contacts, ItemState};
