//! Physical parameters of the world and the rectangles overriding them.
//!
//! Friction, density and force are area-weighted averages of the rules
//! covering a query box. The part of the box covered by no rule takes the
//! default value (force has no default, it counts as zero).

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{Rect, Vec2};
use crate::domain::settings::{WorldSettings, ZoneRuleDef};
use crate::domain::Environment;

/// Rule lists at least this long are summed on the rayon pool
#[cfg(feature = "parallel")]
const PARALLEL_RULES_THRESHOLD: usize = 256;

/// Value applying inside a rectangle of the world
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneRule<T> {
    pub rectangle: Rect,
    pub value: T,
}

pub type FrictionRectangle = ZoneRule<f64>;
pub type ForceRectangle = ZoneRule<Vec2>;
pub type DensityRectangle = ZoneRule<f64>;
pub type EnvironmentRectangle = ZoneRule<Environment>;

/// Position of a rule in its list, valid for the lifetime of the world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleId(pub(crate) usize);

#[derive(Clone, Debug)]
pub struct PhysicsEnvironment {
    pub(crate) unit: f64,
    pub(crate) gravity: Vec2,
    pub(crate) default_friction: f64,
    pub(crate) default_density: f64,
    pub(crate) default_environment: Environment,
    pub(crate) position_epsilon: f64,
    pub(crate) speed_epsilon: Vec2,
    pub(crate) angular_speed_epsilon: f64,
    pub(crate) friction_rectangles: Vec<FrictionRectangle>,
    pub(crate) force_rectangles: Vec<ForceRectangle>,
    pub(crate) density_rectangles: Vec<DensityRectangle>,
    pub(crate) environment_rectangles: Vec<EnvironmentRectangle>,
}

impl Default for PhysicsEnvironment {
    fn default() -> Self {
        Self::from_settings(&WorldSettings::default())
    }
}

impl PhysicsEnvironment {
    pub fn from_settings(settings: &WorldSettings) -> Self {
        Self {
            unit: settings.unit,
            gravity: settings.gravity(),
            default_friction: settings.default_friction,
            default_density: settings.default_density,
            default_environment: settings.default_environment,
            position_epsilon: settings.position_epsilon,
            speed_epsilon: settings.speed_epsilon,
            angular_speed_epsilon: settings.angular_speed_epsilon,
            friction_rectangles: rules(&settings.friction_rectangles),
            force_rectangles: rules(&settings.force_rectangles),
            density_rectangles: rules(&settings.density_rectangles),
            environment_rectangles: rules(&settings.environment_rectangles),
        }
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn position_epsilon(&self) -> f64 {
        self.position_epsilon
    }

    pub fn speed_epsilon(&self) -> Vec2 {
        self.speed_epsilon
    }

    pub fn angular_speed_epsilon(&self) -> f64 {
        self.angular_speed_epsilon
    }

    /// Distance kept between two aligned items
    pub fn align_epsilon(&self) -> f64 {
        self.position_epsilon
    }

    pub fn default_friction(&self) -> f64 {
        self.default_friction
    }

    pub fn default_density(&self) -> f64 {
        self.default_density
    }

    pub fn default_environment(&self) -> Environment {
        self.default_environment
    }

    // Zone rules

    pub fn add_friction_rectangle(&mut self, rectangle: Rect, friction: f64) -> RuleId {
        push_rule(&mut self.friction_rectangles, rectangle, friction)
    }

    pub fn friction_rectangle_mut(&mut self, id: RuleId) -> Option<&mut FrictionRectangle> {
        self.friction_rectangles.get_mut(id.0)
    }

    pub fn add_force_rectangle(&mut self, rectangle: Rect, force: Vec2) -> RuleId {
        push_rule(&mut self.force_rectangles, rectangle, force)
    }

    pub fn force_rectangle_mut(&mut self, id: RuleId) -> Option<&mut ForceRectangle> {
        self.force_rectangles.get_mut(id.0)
    }

    pub fn add_density_rectangle(&mut self, rectangle: Rect, density: f64) -> RuleId {
        push_rule(&mut self.density_rectangles, rectangle, density)
    }

    pub fn density_rectangle_mut(&mut self, id: RuleId) -> Option<&mut DensityRectangle> {
        self.density_rectangles.get_mut(id.0)
    }

    pub fn add_environment_rectangle(&mut self, rectangle: Rect, environment: Environment) -> RuleId {
        push_rule(&mut self.environment_rectangles, rectangle, environment)
    }

    pub fn environment_rectangle_mut(&mut self, id: RuleId) -> Option<&mut EnvironmentRectangle> {
        self.environment_rectangles.get_mut(id.0)
    }

    pub fn average_friction(&self, r: &Rect) -> f64 {
        let (sum, covered) = weighted_sum(&self.friction_rectangles, r, |f| *f, 0.0);
        with_default(sum, covered, r, self.default_friction)
    }

    pub fn average_density(&self, r: &Rect) -> f64 {
        let (sum, covered) = weighted_sum(&self.density_rectangles, r, |d| *d, 0.0);
        with_default(sum, covered, r, self.default_density)
    }

    pub fn average_force(&self, r: &Rect) -> Vec2 {
        let area = r.area();
        if area == 0.0 {
            return Vec2::zero();
        }

        let (sum, _) = weighted_sum(&self.force_rectangles, r, |f| *f, Vec2::zero());
        sum / area
    }

    /// Environments touching `r`, plus the default one if part of `r` is uncovered
    pub fn environments(&self, r: &Rect) -> BTreeSet<Environment> {
        let mut result = BTreeSet::new();
        let area = r.area();

        if area == 0.0 {
            result.insert(self.environment_at(r.bottom_left()));
            return result;
        }

        let mut covered = 0.0;
        for rule in self.environment_rectangles.iter().filter(|e| e.rectangle.intersects(r)) {
            result.insert(rule.value);
            covered += r.intersection_area(&rule.rectangle);
        }

        if covered < area {
            result.insert(self.default_environment);
        }

        result
    }

    pub fn is_in_environment(&self, p: Vec2, environment: Environment) -> bool {
        let in_rule = self
            .environment_rectangles
            .iter()
            .any(|e| e.value == environment && e.rectangle.includes(p));

        in_rule
            || (environment == self.default_environment
                && !self.environment_rectangles.iter().any(|e| e.rectangle.includes(p)))
    }

    fn environment_at(&self, p: Vec2) -> Environment {
        self.environment_rectangles
            .iter()
            .find(|e| e.rectangle.includes(p))
            .map_or(self.default_environment, |e| e.value)
    }
}

fn push_rule<T>(list: &mut Vec<ZoneRule<T>>, rectangle: Rect, value: T) -> RuleId {
    list.push(ZoneRule { rectangle, value });
    RuleId(list.len() - 1)
}

fn rules<T: Copy>(defs: &[ZoneRuleDef<T>]) -> Vec<ZoneRule<T>> {
    defs.iter()
        .map(|d| ZoneRule { rectangle: d.rectangle, value: d.value })
        .collect()
}

fn with_default(sum: f64, covered: f64, r: &Rect, default: f64) -> f64 {
    let area = r.area();
    if area == 0.0 {
        return default;
    }

    let mut result = sum / area;
    if covered < area {
        result += (area - covered) / area * default;
    }
    result
}

/// Sum of `value * intersection area` over the rules, and the covered area
fn weighted_sum<T, V, F>(rules: &[ZoneRule<T>], r: &Rect, value: F, zero: V) -> (V, f64)
where
    T: Sync,
    V: Copy + Send + Sync + std::ops::Add<Output = V> + std::ops::Mul<f64, Output = V>,
    F: Fn(&T) -> V + Sync,
{
    let contribution = |rule: &ZoneRule<T>| {
        let area = r.intersection_area(&rule.rectangle);
        (value(&rule.value) * area, area)
    };

    #[cfg(feature = "parallel")]
    {
        if rules.len() >= PARALLEL_RULES_THRESHOLD {
            return rules
                .par_iter()
                .filter(|rule| rule.rectangle.intersects(r))
                .map(contribution)
                .reduce(|| (zero, 0.0), |a, b| (a.0 + b.0, a.1 + b.1));
        }
    }

    rules
        .iter()
        .filter(|rule| rule.rectangle.intersects(r))
        .map(contribution)
        .fold((zero, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> PhysicsEnvironment {
        PhysicsEnvironment::default()
    }

    #[test]
    fn friction_mixes_rule_and_default_by_area() {
        let mut e = env();
        e.friction_rectangles.push(ZoneRule { rectangle: Rect::new(0.0, 0.0, 5.0, 10.0), value: 0.5 });

        let f = e.average_friction(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!((f - 0.75).abs() < 1e-9);
    }

    #[test]
    fn rules_stay_editable_through_their_id() {
        let mut e = env();
        let id = e.add_density_rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        let r = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(e.average_density(&r), 2.0);

        if let Some(rule) = e.density_rectangle_mut(id) {
            rule.value = 3.0;
        }
        assert_eq!(e.average_density(&r), 3.0);
        assert!(e.friction_rectangle_mut(id).is_none());
    }

    #[test]
    fn force_has_no_default() {
        let mut e = env();
        e.force_rectangles.push(ZoneRule {
            rectangle: Rect::new(0.0, 0.0, 5.0, 10.0),
            value: Vec2::new(10.0, 0.0),
        });

        let f = e.average_force(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(f, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn environments_include_default_when_partly_uncovered() {
        let mut e = env();
        e.environment_rectangles.push(ZoneRule {
            rectangle: Rect::new(0.0, 0.0, 5.0, 10.0),
            value: Environment::Water,
        });

        let partial = e.environments(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(partial.contains(&Environment::Water));
        assert!(partial.contains(&Environment::Air));

        let inside = e.environments(&Rect::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(inside.len(), 1);
        assert!(inside.contains(&Environment::Water));

        assert!(e.is_in_environment(Vec2::new(2.0, 2.0), Environment::Water));
        assert!(!e.is_in_environment(Vec2::new(2.0, 2.0), Environment::Air));
        assert!(e.is_in_environment(Vec2::new(20.0, 2.0), Environment::Air));
    }
}
