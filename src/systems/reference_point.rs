//! Points computed from an item, used as anchors by movements and links.

use crate::core::Vec2;
use crate::domain::{ItemArena, ItemHandle, ItemId};

#[derive(Clone, Debug, PartialEq)]
pub enum ReferencePoint {
    /// A position that does not depend on any item
    Fixed(Vec2),
    CenterOfMass(ItemHandle),
    /// `left + width * ratio.x + gap.x`, `bottom + height * ratio.y + gap.y`
    Ratio { item: ItemHandle, ratio: Vec2, gap: Vec2 },
    /// A named mark of the item
    Mark { item: ItemHandle, mark: String },
}

impl ReferencePoint {
    pub fn center_of(id: ItemId) -> Self {
        ReferencePoint::CenterOfMass(ItemHandle::new(id))
    }

    pub fn ratio_of(id: ItemId, ratio: Vec2, gap: Vec2) -> Self {
        ReferencePoint::Ratio { item: ItemHandle::new(id), ratio, gap }
    }

    pub fn mark_of(id: ItemId, mark: impl Into<String>) -> Self {
        ReferencePoint::Mark { item: ItemHandle::new(id), mark: mark.into() }
    }

    /// Tells if the point can be computed
    pub fn is_valid(&self, items: &ItemArena) -> bool {
        self.get_point(items).is_some()
    }

    pub fn get_point(&self, items: &ItemArena) -> Option<Vec2> {
        match self {
            ReferencePoint::Fixed(p) => Some(*p),
            ReferencePoint::CenterOfMass(h) => h.get(items).map(|i| i.center_of_mass()),
            ReferencePoint::Ratio { item, ratio, gap } => item.get(items).map(|i| {
                let s = i.state();
                Vec2::new(
                    s.left() + s.width() * ratio.x + gap.x,
                    s.bottom() + s.height() * ratio.y + gap.y,
                )
            }),
            ReferencePoint::Mark { item, mark } => {
                item.get(items).and_then(|i| i.mark_position(mark))
            }
        }
    }

    /// Tells if the point is computed from an item
    pub fn has_item(&self, items: &ItemArena) -> bool {
        self.get_item(items).is_some()
    }

    /// The item the point is computed from, while it is alive
    pub fn get_item(&self, items: &ItemArena) -> Option<ItemId> {
        self.handle().and_then(|h| h.live_id(items))
    }

    fn handle(&self) -> Option<&ItemHandle> {
        match self {
            ReferencePoint::Fixed(_) => None,
            ReferencePoint::CenterOfMass(h) => Some(h),
            ReferencePoint::Ratio { item, .. } | ReferencePoint::Mark { item, .. } => Some(item),
        }
    }
}
