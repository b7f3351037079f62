use crate::constants::*;
use crate::error::ConfigError;

/// Tunables for the wave trail. `Default` reproduces the designed look.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveParams {
    pub capacity: usize,
    pub dead_zone: f32,
    pub opacity_decay: f32,
    pub opacity_epsilon: f32,
    pub rotation_step: f32,
    pub scale_x_smooth: f32,
    pub scale_target: f32,
    pub scale_y_gain: f32,
    pub sprite_size: f32,
    pub displacement_strength: f32,
    pub max_pixel_ratio: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            dead_zone: DEFAULT_DEAD_ZONE,
            opacity_decay: DEFAULT_OPACITY_DECAY,
            opacity_epsilon: DEFAULT_OPACITY_EPSILON,
            rotation_step: DEFAULT_ROTATION_STEP,
            scale_x_smooth: DEFAULT_SCALE_X_SMOOTH,
            scale_target: DEFAULT_SCALE_TARGET,
            scale_y_gain: DEFAULT_SCALE_Y_GAIN,
            sprite_size: DEFAULT_SPRITE_SIZE,
            displacement_strength: DEFAULT_DISPLACEMENT_STRENGTH,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

impl WaveParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(invalid("capacity", "must be at least 1"));
        }
        if !(self.dead_zone >= 0.0) {
            return Err(invalid("dead_zone", "must be non-negative"));
        }
        if !(self.opacity_decay > 0.0 && self.opacity_decay < 1.0) {
            return Err(invalid("opacity_decay", "must be in (0, 1)"));
        }
        if !(self.opacity_epsilon > 0.0 && self.opacity_epsilon < 1.0) {
            return Err(invalid("opacity_epsilon", "must be in (0, 1)"));
        }
        if !self.rotation_step.is_finite() {
            return Err(invalid("rotation_step", "must be finite"));
        }
        if !(self.scale_x_smooth >= 0.0 && self.scale_x_smooth < 1.0) {
            return Err(invalid("scale_x_smooth", "must be in [0, 1)"));
        }
        if !(self.scale_target > 0.0 && self.scale_target.is_finite()) {
            return Err(invalid("scale_target", "must be positive"));
        }
        if !(self.scale_y_gain > 0.0 && self.scale_y_gain.is_finite()) {
            return Err(invalid("scale_y_gain", "must be positive"));
        }
        if !(self.sprite_size > 0.0 && self.sprite_size.is_finite()) {
            return Err(invalid("sprite_size", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.displacement_strength) {
            return Err(invalid("displacement_strength", "must be in [0, 1]"));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(invalid("max_pixel_ratio", "must be at least 1"));
        }
        Ok(())
    }

    /// Clamp into the slider range; NaN falls back to zero.
    pub fn set_displacement_strength(&mut self, value: f32) {
        self.displacement_strength = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }
}
