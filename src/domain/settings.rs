//! World tunables, loadable from a JSON document.
//!
//! ```json
//! {
//!   "unit": 50,
//!   "gravity": { "x": 0, "y": -490.5 },
//!   "defaultFriction": 0.98,
//!   "frictionRectangles": [
//!     { "rectangle": { "left": 0, "bottom": 0, "width": 100, "height": 20 }, "value": 0.5 }
//!   ]
//! }
//! ```
//!
//! Missing fields take their default value. `gravity`, when absent, is
//! derived from `unit`.

use serde::{Deserialize, Serialize};

use crate::core::{Rect, Result, UniverseError, Vec2};

use super::environment::Environment;

pub const DEFAULT_UNIT: f64 = 50.0;
pub const EARTH_GRAVITY: f64 = 9.81;
pub const DEFAULT_STATIC_CELL_SIZE: u32 = 256;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRuleDef<T> {
    pub rectangle: Rect,
    pub value: T,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldSettings {
    /// Length of one meter, in world coordinates
    pub unit: f64,
    pub gravity: Option<Vec2>,
    pub default_friction: f64,
    pub default_density: f64,
    pub default_environment: Environment,
    pub position_epsilon: f64,
    pub speed_epsilon: Vec2,
    pub angular_speed_epsilon: f64,
    pub static_cell_size: u32,
    pub friction_rectangles: Vec<ZoneRuleDef<f64>>,
    pub force_rectangles: Vec<ZoneRuleDef<Vec2>>,
    pub density_rectangles: Vec<ZoneRuleDef<f64>>,
    pub environment_rectangles: Vec<ZoneRuleDef<Environment>>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT,
            gravity: None,
            default_friction: 1.0,
            default_density: 0.0,
            default_environment: Environment::Air,
            position_epsilon: 0.001,
            speed_epsilon: Vec2::new(1.0, 1.0),
            angular_speed_epsilon: 0.01,
            static_cell_size: DEFAULT_STATIC_CELL_SIZE,
            friction_rectangles: Vec::new(),
            force_rectangles: Vec::new(),
            density_rectangles: Vec::new(),
            environment_rectangles: Vec::new(),
        }
    }
}

impl WorldSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: WorldSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
            .unwrap_or_else(|| Vec2::new(0.0, -EARTH_GRAVITY * self.unit))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.unit > 0.0) || !self.unit.is_finite() {
            return Err(UniverseError::InvalidSettings(format!(
                "unit must be a positive number, got {}",
                self.unit
            )));
        }

        if self.position_epsilon < 0.0
            || self.speed_epsilon.x < 0.0
            || self.speed_epsilon.y < 0.0
            || self.angular_speed_epsilon < 0.0
        {
            return Err(UniverseError::InvalidSettings(
                "epsilons must not be negative".to_string(),
            ));
        }

        if self.static_cell_size == 0 {
            return Err(UniverseError::InvalidSettings(
                "staticCellSize must be greater than zero".to_string(),
            ));
        }

        let rectangles = self
            .friction_rectangles
            .iter()
            .map(|r| &r.rectangle)
            .chain(self.force_rectangles.iter().map(|r| &r.rectangle))
            .chain(self.density_rectangles.iter().map(|r| &r.rectangle))
            .chain(self.environment_rectangles.iter().map(|r| &r.rectangle));

        for r in rectangles {
            if r.width < 0.0 || r.height < 0.0 {
                return Err(UniverseError::InvalidSettings(format!(
                    "rectangle {:?} has a negative size",
                    r
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let s = WorldSettings::from_json("{}").unwrap();
        assert_eq!(s, WorldSettings::default());
        assert_eq!(s.gravity(), Vec2::new(0.0, -9.81 * 50.0));
    }

    #[test]
    fn gravity_follows_unit_unless_given() {
        let s = WorldSettings::from_json(r#"{ "unit": 10 }"#).unwrap();
        assert_eq!(s.gravity(), Vec2::new(0.0, -98.1));

        let s = WorldSettings::from_json(r#"{ "unit": 10, "gravity": { "x": 1, "y": 2 } }"#).unwrap();
        assert_eq!(s.gravity(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(WorldSettings::from_json(r#"{ "unit": 0 }"#).is_err());
        assert!(WorldSettings::from_json(r#"{ "positionEpsilon": -1 }"#).is_err());
        assert!(WorldSettings::from_json(r#"{ "staticCellSize": 0 }"#).is_err());
        assert!(WorldSettings::from_json("not json").is_err());
    }

    #[test]
    fn parses_rectangles() {
        let json = r#"{
            "environmentRectangles": [
                { "rectangle": { "left": 0, "bottom": 0, "width": 10, "height": 10 }, "value": "water" }
            ]
        }"#;
        let s = WorldSettings::from_json(json).unwrap();
        assert_eq!(s.environment_rectangles.len(), 1);
        assert_eq!(s.environment_rectangles[0].value, Environment::Water);
    }
}
