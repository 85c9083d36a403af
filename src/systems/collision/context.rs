//! What an item's collision hook sees, and the default reaction that pushes
//! the other item out along the side it came from.

use crate::core::Vec2;
use crate::domain::{CommandQueue, ContactRange, ItemArena, ItemId, ItemState, PhysicalItem};

use super::info::CollisionInfo;
use super::repair::CollisionRepair;
use super::zone::Zone;

/// How contacts are recorded when an item is aligned
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContactMode {
    /// Each item is in contact on the whole side
    #[default]
    Full,
    /// Each item is in contact on the extent of the other item
    Range,
    None,
}

pub struct CollisionContext<'a> {
    pub(crate) items: &'a mut ItemArena,
    pub(crate) id: ItemId,
    pub(crate) info: &'a CollisionInfo,
    pub(crate) repair: &'a mut CollisionRepair,
    pub(crate) align_epsilon: f64,
    pub commands: &'a mut CommandQueue,
}

impl<'a> CollisionContext<'a> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn item(&self) -> &PhysicalItem {
        &self.items[self.id]
    }

    pub fn item_mut(&mut self) -> &mut PhysicalItem {
        &mut self.items[self.id]
    }

    pub fn other_id(&self) -> ItemId {
        self.info.other()
    }

    pub fn other_item(&self) -> &PhysicalItem {
        &self.items[self.info.other()]
    }

    pub fn other_item_mut(&mut self) -> &mut PhysicalItem {
        &mut self.items[self.info.other()]
    }

    pub fn info(&self) -> &CollisionInfo {
        self.info
    }

    pub fn side(&self) -> Zone {
        self.info.side()
    }

    pub fn position_on_contact(&self) -> Vec2 {
        self.info.position_on_contact()
    }

    pub fn reference_previous_state(&self) -> &ItemState {
        self.info.reference_previous_state()
    }

    pub fn other_previous_state(&self) -> &ItemState {
        self.info.other_previous_state()
    }

    pub fn repair(&self) -> &CollisionRepair {
        self.repair
    }

    /// Normal of the other item's contact surface, pointing away from this item
    pub fn set_contact_normal(&mut self, normal: Vec2) {
        self.repair.set_contact_normal(self.info.other(), normal);
    }

    /// Pushes the other item out of this one, on the side it came from
    pub fn default_collision(&mut self) -> bool {
        self.default_collision_with(ContactMode::Full)
    }

    pub fn default_collision_with(&mut self, mode: ContactMode) -> bool {
        let mut p = self.info.position_on_contact();
        let eps = self.align_epsilon;

        match self.info.side() {
            Zone::Bottom => {
                p.y -= eps;
                self.align_bottom_at(p, mode)
            }
            Zone::Top => {
                p.y += eps;
                self.align_top_at(p, mode)
            }
            Zone::MiddleLeft => {
                p.x -= eps;
                self.align_left_at(p, mode)
            }
            Zone::MiddleRight => {
                p.x += eps;
                self.align_right_at(p, mode)
            }
            _ => self.collision_middle(mode),
        }
    }

    /// Puts the other item against the left side of this one
    pub fn align_left(&mut self, mode: ContactMode) -> bool {
        let mut p = if self.info.side() == Zone::MiddleLeft {
            self.info.position_on_contact()
        } else {
            let other = self.other_item().state();
            Vec2::new(self.item().state().left() - other.width(), other.bottom())
        };
        p.x -= self.align_epsilon;
        self.align_left_at(p, mode)
    }

    pub fn align_right(&mut self, mode: ContactMode) -> bool {
        let mut p = if self.info.side() == Zone::MiddleRight {
            self.info.position_on_contact()
        } else {
            Vec2::new(self.item().state().right(), self.other_item().state().bottom())
        };
        p.x += self.align_epsilon;
        self.align_right_at(p, mode)
    }

    pub fn align_top(&mut self, mode: ContactMode) -> bool {
        let mut p = if self.info.side() == Zone::Top {
            self.info.position_on_contact()
        } else {
            Vec2::new(self.other_item().state().left(), self.item().state().top())
        };
        p.y += self.align_epsilon;
        self.align_top_at(p, mode)
    }

    pub fn align_bottom(&mut self, mode: ContactMode) -> bool {
        let mut p = if self.info.side() == Zone::Bottom {
            self.info.position_on_contact()
        } else {
            let other = self.other_item().state();
            Vec2::new(other.left(), self.item().state().bottom() - other.height())
        };
        p.y -= self.align_epsilon;
        self.align_bottom_at(p, mode)
    }

    /// Records a contact in the middle of both items, without moving them
    pub fn collision_middle(&mut self, mode: ContactMode) -> bool {
        if self.other_item().state().is_phantom() || !self.item().state().can_move_items() {
            return false;
        }

        if mode != ContactMode::None {
            self.other_item_mut().state_mut().set_middle_contact();
            self.item_mut().state_mut().set_middle_contact();
        }

        false
    }

    pub fn align_left_at(&mut self, p: Vec2, mode: ContactMode) -> bool {
        if !self.align_at(p) {
            return false;
        }

        self.set_contacts(
            mode,
            Axis::Vertical,
            |that, range| that.set_right_contact(range),
            |this, range| this.set_left_contact(range),
        );
        self.set_contact_normal(Vec2::new(-1.0, 0.0));
        true
    }

    pub fn align_right_at(&mut self, p: Vec2, mode: ContactMode) -> bool {
        if !self.align_at(p) {
            return false;
        }

        self.set_contacts(
            mode,
            Axis::Vertical,
            |that, range| that.set_left_contact(range),
            |this, range| this.set_right_contact(range),
        );
        self.set_contact_normal(Vec2::new(1.0, 0.0));
        true
    }

    pub fn align_top_at(&mut self, p: Vec2, mode: ContactMode) -> bool {
        if !self.align_at(p) {
            return false;
        }

        self.set_contacts(
            mode,
            Axis::Horizontal,
            |that, range| that.set_bottom_contact(range),
            |this, range| this.set_top_contact(range),
        );
        self.set_contact_normal(Vec2::new(0.0, 1.0));
        true
    }

    pub fn align_bottom_at(&mut self, p: Vec2, mode: ContactMode) -> bool {
        if !self.align_at(p) {
            return false;
        }

        self.set_contacts(
            mode,
            Axis::Horizontal,
            |that, range| that.set_top_contact(range),
            |this, range| this.set_bottom_contact(range),
        );
        self.set_contact_normal(Vec2::new(0.0, -1.0));
        true
    }

    /// Moves the other item's bottom-left corner to `p`, when this item is
    /// allowed to push it
    fn align_at(&mut self, p: Vec2) -> bool {
        if self.other_item().state().is_phantom() || !self.item().state().can_move_items() {
            return false;
        }

        self.other_item_mut().state_mut().set_bottom_left(p);
        true
    }

    fn set_contacts(
        &mut self,
        mode: ContactMode,
        axis: Axis,
        that: impl FnOnce(&mut ItemState, ContactRange),
        this: impl FnOnce(&mut ItemState, ContactRange),
    ) {
        let range_of = |s: &ItemState| match axis {
            Axis::Vertical => s.vertical_range(),
            Axis::Horizontal => s.horizontal_range(),
        };

        let this_range = range_of(self.item().state());
        let that_range = range_of(self.other_item().state());

        let (for_that, for_this) = match mode {
            ContactMode::Full => (that_range, this_range),
            ContactMode::Range => (this_range, that_range),
            ContactMode::None => return,
        };

        that(self.other_item_mut().state_mut(), for_that);
        this(self.item_mut().state_mut(), for_this);
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}
