use crate::core::TimeType;
use crate::domain::{ItemArena, ItemId};

use super::{ForcedMovement, Mover};

/// Movements played one after the other, possibly several times
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    sub_sequence: Vec<ForcedMovement>,
    index: usize,
    loops: u32,
    play_count: u32,
    finished: bool,
    has_changed: bool,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut movement: ForcedMovement) {
        movement.set_auto_remove(false);
        self.sub_sequence.push(movement);
    }

    pub fn with(mut self, movement: ForcedMovement) -> Self {
        self.push(movement);
        self
    }

    /// Number of plays, zero meaning forever
    pub fn with_loops(mut self, loops: u32) -> Self {
        self.loops = loops;
        self
    }

    pub fn len(&self) -> usize {
        self.sub_sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_sequence.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub(super) fn current_reference_item(&self, items: &ItemArena) -> Option<ItemId> {
        self.sub_sequence
            .get(self.index)
            .and_then(|m| m.reference_item(items))
    }

    pub(super) fn is_finished(&self) -> bool {
        (self.loops != 0 && self.play_count == self.loops) || self.finished
    }

    pub(super) fn init(&mut self, m: &mut Mover<'_, '_>) {
        self.play_count = 0;
        self.index = 0;
        self.has_changed = false;
        self.finished = false;

        for sub in &mut self.sub_sequence {
            sub.set_moving_item_gap(m.gap());
            sub.set_moving_item_ratio(m.ratio());
        }

        if !self.sub_sequence.is_empty() {
            self.init_current(m);
        }
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        if self.is_finished() || self.sub_sequence.is_empty() {
            return elapsed;
        }

        let mut remaining = self.sub_sequence[self.index].next_position(m.scope(), elapsed);

        if self.sub_sequence[self.index].is_finished(m.scope().items) {
            self.next_sequence(m);
            self.has_changed = self.has_changed || remaining != elapsed;

            if remaining > 0.0 && !self.is_finished() {
                remaining = self.next_position(m, remaining);
            }
        }

        remaining
    }

    fn next_sequence(&mut self, m: &mut Mover<'_, '_>) {
        self.sub_sequence[self.index].clear_item();
        self.index += 1;

        if self.index == self.sub_sequence.len() {
            self.play_count += 1;
            self.index = 0;

            if !self.has_changed && self.loops == 0 {
                log::warn!("forced sequence loop has no effect, stopping");
                self.finished = true;
            } else {
                self.has_changed = false;
            }
        }

        if !self.is_finished() {
            self.init_current(m);
        }
    }

    fn init_current(&mut self, m: &mut Mover<'_, '_>) {
        let sub = &mut self.sub_sequence[self.index];
        sub.set_item(m.id());
        sub.init(m.scope());
    }
}
