//! Physical state of an item: geometry, kinematics and material.
//!
//! Every mutator respects the item's constraints: a fixed item never moves
//! nor gets speed, and an axis with a position constraint keeps its
//! coordinate and speed component.

use crate::core::{Rect, Vec2};

/// Extent of a contact along one side of an item
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactRange {
    pub min: f64,
    pub max: f64,
}

/// Contacts established during the current tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contacts {
    pub left: Option<ContactRange>,
    pub right: Option<ContactRange>,
    pub top: Option<ContactRange>,
    pub bottom: Option<ContactRange>,
    pub middle: bool,
}

impl Contacts {
    pub fn has_contact(&self) -> bool {
        self.left.is_some()
            || self.right.is_some()
            || self.top.is_some()
            || self.bottom.is_some()
            || self.middle
    }

    pub fn has_side_contact(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemState {
    bounding_box: Rect,
    speed: Vec2,
    acceleration: Vec2,
    internal_force: Vec2,
    external_force: Vec2,
    system_angle: f64,
    angular_speed: f64,
    mass: f64,
    density: f64,
    friction: f64,
    contact_friction: f64,
    elasticity: f64,
    hardness: f64,
    fixed: bool,
    x_constraints: u32,
    y_constraints: u32,
    can_move_items: bool,
    global: bool,
    phantom: bool,
    artificial: bool,
    weak_collisions: bool,
    free_system_angle: bool,
    contacts: Contacts,
}

impl Default for ItemState {
    fn default() -> Self {
        Self {
            bounding_box: Rect::default(),
            speed: Vec2::zero(),
            acceleration: Vec2::zero(),
            internal_force: Vec2::zero(),
            external_force: Vec2::zero(),
            system_angle: 0.0,
            angular_speed: 0.0,
            mass: 1.0,
            density: 1.0,
            friction: 1.0,
            contact_friction: 1.0,
            elasticity: 0.0,
            hardness: 1.0,
            fixed: false,
            x_constraints: 0,
            y_constraints: 0,
            can_move_items: true,
            global: false,
            phantom: false,
            artificial: false,
            weak_collisions: false,
            free_system_angle: false,
            contacts: Contacts::default(),
        }
    }
}

impl ItemState {
    pub fn new(bounding_box: Rect) -> Self {
        Self { bounding_box, ..Self::default() }
    }

    // Geometry

    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    pub fn left(&self) -> f64 {
        self.bounding_box.left
    }

    pub fn bottom(&self) -> f64 {
        self.bounding_box.bottom
    }

    pub fn right(&self) -> f64 {
        self.bounding_box.right()
    }

    pub fn top(&self) -> f64 {
        self.bounding_box.top()
    }

    pub fn width(&self) -> f64 {
        self.bounding_box.width
    }

    pub fn height(&self) -> f64 {
        self.bounding_box.height
    }

    pub fn size(&self) -> Vec2 {
        self.bounding_box.size()
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.bounding_box.bottom_left()
    }

    pub fn center_of_mass(&self) -> Vec2 {
        self.bounding_box.center()
    }

    pub fn set_left(&mut self, x: f64) {
        if !self.fixed && self.x_constraints == 0 {
            self.bounding_box.left = x;
        }
    }

    pub fn set_bottom(&mut self, y: f64) {
        if !self.fixed && self.y_constraints == 0 {
            self.bounding_box.bottom = y;
        }
    }

    pub fn set_right(&mut self, x: f64) {
        self.set_left(x - self.width());
    }

    pub fn set_top(&mut self, y: f64) {
        self.set_bottom(y - self.height());
    }

    pub fn set_bottom_left(&mut self, p: Vec2) {
        self.set_left(p.x);
        self.set_bottom(p.y);
    }

    pub fn set_center_of_mass(&mut self, p: Vec2) {
        self.set_bottom_left(p - self.size() / 2.0);
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.bounding_box.width = size.x;
        self.bounding_box.height = size.y;
    }

    // Kinematics

    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Vec2) {
        if self.fixed {
            return;
        }

        if self.x_constraints == 0 {
            self.speed.x = speed.x;
        }
        if self.y_constraints == 0 {
            self.speed.y = speed.y;
        }
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, a: Vec2) {
        if !self.fixed {
            self.acceleration = a;
        }
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn set_angular_speed(&mut self, s: f64) {
        if !self.fixed {
            self.angular_speed = s;
        }
    }

    pub fn system_angle(&self) -> f64 {
        self.system_angle
    }

    pub fn set_system_angle(&mut self, a: f64) {
        self.system_angle = a;
    }

    pub fn has_free_system_angle(&self) -> bool {
        self.free_system_angle
    }

    pub fn set_free_system_angle(&mut self, b: bool) {
        self.free_system_angle = b;
    }

    /// Force applied by the item on itself, kept across ticks
    pub fn internal_force(&self) -> Vec2 {
        self.internal_force
    }

    pub fn add_internal_force(&mut self, f: Vec2) {
        if !self.fixed {
            self.internal_force += self.mask_constrained(f);
        }
    }

    pub fn set_internal_force(&mut self, f: Vec2) {
        if !self.fixed {
            self.internal_force = self.mask_constrained(f);
        }
    }

    /// Force applied by other items, consumed by the next integration
    pub fn external_force(&self) -> Vec2 {
        self.external_force
    }

    pub fn add_external_force(&mut self, f: Vec2) {
        if !self.fixed {
            self.external_force += self.mask_constrained(f);
        }
    }

    pub fn set_external_force(&mut self, f: Vec2) {
        if !self.fixed {
            self.external_force = self.mask_constrained(f);
        }
    }

    pub fn force(&self) -> Vec2 {
        self.internal_force + self.external_force
    }

    pub fn clear_forces(&mut self) {
        self.internal_force = Vec2::zero();
        self.external_force = Vec2::zero();
    }

    fn mask_constrained(&self, mut v: Vec2) -> Vec2 {
        if self.x_constraints != 0 {
            v.x = 0.0;
        }
        if self.y_constraints != 0 {
            v.y = 0.0;
        }
        v
    }

    // Material

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, m: f64) {
        self.mass = m;
    }

    pub fn has_infinite_mass(&self) -> bool {
        self.mass.is_infinite()
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn set_density(&mut self, d: f64) {
        self.density = d;
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn set_friction(&mut self, f: f64) {
        self.friction = f;
    }

    /// Friction applied by the items in contact with this one
    pub fn contact_friction(&self) -> f64 {
        self.contact_friction
    }

    pub fn set_contact_friction(&mut self, f: f64) {
        self.contact_friction = f;
    }

    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    pub fn set_elasticity(&mut self, e: f64) {
        self.elasticity = e;
    }

    pub fn hardness(&self) -> f64 {
        self.hardness
    }

    pub fn set_hardness(&mut self, h: f64) {
        self.hardness = h;
    }

    // Constraints and flags

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Fixes the item forever; speed and acceleration drop to zero
    pub fn fix(&mut self) {
        self.speed = Vec2::zero();
        self.acceleration = Vec2::zero();
        self.fixed = true;
    }

    pub fn add_position_constraint_x(&mut self) {
        self.x_constraints += 1;
    }

    pub fn add_position_constraint_y(&mut self) {
        self.y_constraints += 1;
    }

    pub fn add_position_constraints(&mut self) {
        self.add_position_constraint_x();
        self.add_position_constraint_y();
    }

    pub fn remove_position_constraint_x(&mut self) {
        assert!(self.x_constraints > 0, "no x position constraint to remove");
        self.x_constraints -= 1;
    }

    pub fn remove_position_constraint_y(&mut self) {
        assert!(self.y_constraints > 0, "no y position constraint to remove");
        self.y_constraints -= 1;
    }

    pub fn remove_position_constraints(&mut self) {
        self.remove_position_constraint_x();
        self.remove_position_constraint_y();
    }

    pub fn has_x_constraint(&self) -> bool {
        self.x_constraints != 0
    }

    pub fn has_y_constraint(&self) -> bool {
        self.y_constraints != 0
    }

    pub fn can_move_items(&self) -> bool {
        self.can_move_items
    }

    pub fn set_can_move_items(&mut self, b: bool) {
        self.can_move_items = b;
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn set_global(&mut self, b: bool) {
        self.global = b;
    }

    pub fn is_phantom(&self) -> bool {
        self.phantom
    }

    pub fn set_phantom(&mut self, b: bool) {
        self.phantom = b;
    }

    pub fn is_artificial(&self) -> bool {
        self.artificial
    }

    pub fn set_artificial(&mut self, b: bool) {
        self.artificial = b;
    }

    pub fn has_weak_collisions(&self) -> bool {
        self.weak_collisions
    }

    pub fn set_weak_collisions(&mut self, b: bool) {
        self.weak_collisions = b;
    }

    // Contacts

    pub fn contacts(&self) -> &Contacts {
        &self.contacts
    }

    pub fn has_contact(&self) -> bool {
        self.contacts.has_contact()
    }

    pub fn has_bottom_contact(&self) -> bool {
        self.contacts.bottom.is_some()
    }

    pub fn has_top_contact(&self) -> bool {
        self.contacts.top.is_some()
    }

    pub fn has_left_contact(&self) -> bool {
        self.contacts.left.is_some()
    }

    pub fn has_right_contact(&self) -> bool {
        self.contacts.right.is_some()
    }

    pub fn has_middle_contact(&self) -> bool {
        self.contacts.middle
    }

    pub fn set_left_contact(&mut self, range: ContactRange) {
        self.contacts.left = Some(range);
    }

    pub fn set_right_contact(&mut self, range: ContactRange) {
        self.contacts.right = Some(range);
    }

    pub fn set_top_contact(&mut self, range: ContactRange) {
        self.contacts.top = Some(range);
    }

    pub fn set_bottom_contact(&mut self, range: ContactRange) {
        self.contacts.bottom = Some(range);
    }

    pub fn set_middle_contact(&mut self) {
        self.contacts.middle = true;
    }

    pub fn clear_contacts(&mut self) {
        self.contacts = Contacts::default();
    }

    /// Range covering the full vertical extent of the item
    pub fn vertical_range(&self) -> ContactRange {
        ContactRange { min: self.bottom(), max: self.top() }
    }

    /// Range covering the full horizontal extent of the item
    pub fn horizontal_range(&self) -> ContactRange {
        ContactRange { min: self.left(), max: self.right() }
    }

    /// Snaps speed components and angular speed below the epsilons to zero
    pub fn adjust_cinetic(&mut self, speed_epsilon: Vec2, angular_speed_epsilon: f64) {
        if self.speed.x.abs() < speed_epsilon.x {
            self.speed.x = 0.0;
        }
        if self.speed.y.abs() < speed_epsilon.y {
            self.speed.y = 0.0;
        }
        if self.angular_speed.abs() < angular_speed_epsilon {
            self.angular_speed = 0.0;
        }
    }

    /// Restores a snapshot, unless the item is fixed
    pub fn set_physical_state(&mut self, s: &ItemState) {
        if self.fixed {
            return;
        }

        *self = s.clone();
        if s.fixed {
            self.fix();
        }
    }
}
