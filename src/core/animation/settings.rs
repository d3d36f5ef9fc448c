use crate::core::view::transform::DEFAULT_ZOOM_SENSITIVITY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Synthetic wheel units applied per second of animation.
    pub speed: f64,
    /// Speed factor while the speed modifier is held.
    pub modifier_multiplier: f64,
    /// Fractional scale change per wheel unit.
    pub zoom_sensitivity: f64,
}

impl AnimationSettings {
    #[must_use]
    pub fn effective_speed(&self, modifier_held: bool) -> f64 {
        if modifier_held {
            self.speed * self.modifier_multiplier
        } else {
            self.speed
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            speed: 20.0,
            modifier_multiplier: 2.0,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
        }
    }
}
