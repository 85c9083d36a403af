use super::handle::ItemId;
use super::item::PhysicalItem;

/// Structural change requested while the world is locked
pub enum WorldCommand {
    Register(PhysicalItem),
    AddStatic(PhysicalItem),
    Release(ItemId),
}

/// Changes buffered during a tick, applied once it completes
#[derive(Default)]
pub struct CommandQueue {
    commands: Vec<WorldCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, item: PhysicalItem) {
        self.commands.push(WorldCommand::Register(item));
    }

    pub fn add_static(&mut self, item: PhysicalItem) {
        self.commands.push(WorldCommand::AddStatic(item));
    }

    pub fn release(&mut self, id: ItemId) {
        self.commands.push(WorldCommand::Release(id));
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub(crate) fn drain(&mut self) -> Vec<WorldCommand> {
        std::mem::take(&mut self.commands)
    }
}
