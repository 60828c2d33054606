//! World configuration and engine-wide constants.
//!
//! All quantities are in metres, kilograms and seconds. Rendering code that
//! works in pixels converts at the world boundary through
//! [`WorldConfig::pixels_per_meter`].

use crate::error::PhysicsError;
use crate::math::Vec2;

/// Smallest allowed body area, in square metres.
pub const MIN_BODY_SIZE: f64 = 0.01 * 0.01;
/// Largest allowed body area, in square metres.
pub const MAX_BODY_SIZE: f64 = 64.0 * 64.0;
/// Smallest allowed density, in g/cm³.
pub const MIN_DENSITY: f64 = 0.5;
/// Largest allowed density, in g/cm³ (roughly platinum).
pub const MAX_DENSITY: f64 = 21.4;

pub const MIN_ITERATIONS: usize = 1;
pub const MAX_ITERATIONS: usize = 128;

pub const DEFAULT_PIXELS_PER_METER: f64 = 32.0;

/// Area and density bounds every body must satisfy to enter a world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLimits {
    pub min_area: f64,
    pub max_area: f64,
    pub min_density: f64,
    pub max_density: f64,
}

impl BodyLimits {
    /// Checks `area` and `density` against the bounds.
    pub fn validate(&self, area: f64, density: f64) -> Result<(), PhysicsError> {
        if !(self.min_area..=self.max_area).contains(&area) {
            return Err(PhysicsError::AreaOutOfRange {
                area,
                min: self.min_area,
                max: self.max_area,
            });
        }
        if !(self.min_density..=self.max_density).contains(&density) {
            return Err(PhysicsError::DensityOutOfRange {
                density,
                min: self.min_density,
                max: self.max_density,
            });
        }
        Ok(())
    }
}

impl Default for BodyLimits {
    fn default() -> Self {
        Self {
            min_area: MIN_BODY_SIZE,
            max_area: MAX_BODY_SIZE,
            min_density: MIN_DENSITY,
            max_density: MAX_DENSITY,
        }
    }
}

/// Configuration supplied when a [`PhysicsWorld`](crate::PhysicsWorld) is built.
///
/// ```
/// use impulse2d::config::WorldConfig;
/// use impulse2d::math::Vec2;
///
/// let config = WorldConfig::new()
///     .with_gravity(Vec2::new(0.0, -9.81))
///     .with_iterations(16)
///     .with_air_resistance(0.01);
/// assert_eq!(config.iterations, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Gravity acceleration in m/s². Default: (0, -9.81).
    pub gravity: Vec2,
    /// Sub-steps per call to `step`, within `[MIN_ITERATIONS, MAX_ITERATIONS]`. Default: 8.
    pub iterations: usize,
    /// Fraction of velocity lost per frame, spread across the sub-steps. Default: 0.
    pub air_resistance: f64,
    pub limits: BodyLimits,
    // Always finite and positive; only set through `with_pixels_per_meter`.
    pixels_per_meter: f64,
    /// Resolve contacts with angular impulses at the contact points instead of
    /// purely linear impulses along the normal. Default: false.
    pub angular_impulses: bool,
}

impl WorldConfig {
    pub fn new() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            iterations: 8,
            air_resistance: 0.0,
            limits: BodyLimits::default(),
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            angular_impulses: false,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the sub-step count, clamped into `[MIN_ITERATIONS, MAX_ITERATIONS]`.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS);
        self
    }

    /// Sets the per-frame damping, clamped into `[0, 1]`.
    pub fn with_air_resistance(mut self, air_resistance: f64) -> Self {
        self.air_resistance = air_resistance.clamp(0.0, 1.0);
        self
    }

    pub fn with_limits(mut self, limits: BodyLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Conversion between engine metres and rendering pixels. Default: 32.
    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    /// Ignored unless `pixels_per_meter` is finite and positive.
    pub fn with_pixels_per_meter(mut self, pixels_per_meter: f64) -> Self {
        if pixels_per_meter.is_finite() && pixels_per_meter > 0.0 {
            self.pixels_per_meter = pixels_per_meter;
        }
        self
    }

    pub fn with_angular_impulses(mut self, enabled: bool) -> Self {
        self.angular_impulses = enabled;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.gravity, Vec2::new(0.0, -9.81));
        assert_eq!(config.iterations, 8);
        assert_eq!(config.air_resistance, 0.0);
        assert_eq!(config.limits, BodyLimits::default());
        assert!(!config.angular_impulses);
    }

    #[test]
    fn test_iterations_are_clamped() {
        assert_eq!(WorldConfig::new().with_iterations(0).iterations, MIN_ITERATIONS);
        assert_eq!(WorldConfig::new().with_iterations(1000).iterations, MAX_ITERATIONS);
        assert_eq!(WorldConfig::new().with_iterations(20).iterations, 20);
    }

    #[test]
    fn test_pixels_per_meter_rejects_non_positive() {
        for bad in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            let config = WorldConfig::new().with_pixels_per_meter(bad);
            assert_eq!(config.pixels_per_meter(), DEFAULT_PIXELS_PER_METER);
        }
        let config = WorldConfig::new().with_pixels_per_meter(100.0);
        assert_eq!(config.pixels_per_meter(), 100.0);
    }

    #[test]
    fn test_limits_validate() {
        let limits = BodyLimits::default();
        assert!(limits.validate(1.0, 1.0).is_ok());
        assert!(limits.validate(MIN_BODY_SIZE, MIN_DENSITY).is_ok());
        assert!(limits.validate(MAX_BODY_SIZE, MAX_DENSITY).is_ok());
        assert!(matches!(
            limits.validate(MAX_BODY_SIZE * 2.0, 1.0),
            Err(PhysicsError::AreaOutOfRange { .. })
        ));
        assert!(matches!(
            limits.validate(1.0, 0.1),
            Err(PhysicsError::DensityOutOfRange { .. })
        ));
        assert!(matches!(
            limits.validate(f64::NAN, 1.0),
            Err(PhysicsError::AreaOutOfRange { .. })
        ));
    }
}
