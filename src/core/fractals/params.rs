use crate::core::data::complex::Complex;
use crate::core::fractals::mode::FractalMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_POWER: u32 = 2;

/// Seed constant used by Julia mode until the user drags the marker.
pub const DEFAULT_JULIA_CONSTANT: Complex = Complex {
    real: -0.7,
    imag: 0.27,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FractalParamsError {
    #[error("Maximum iterations must be greater than zero")]
    ZeroMaxIterationsError,
    #[error("Power must be at least 2, got {0}")]
    PowerTooSmall(u32),
    #[error("Complex constant must be finite")]
    NonFiniteConstant,
}

/// Everything the escape-time loop needs besides the plane point.
///
/// `c` plays two roles: the Julia constant in Julia mode, and the starting
/// value of `z` in Mandelbrot mode while `pinned` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalParameters {
    pub mode: FractalMode,
    pub c: Complex,
    pub pinned: bool,
    pub power: u32,
    pub max_iter: u32,
    pub iter_offset: i32,
}

impl FractalParameters {
    pub fn new(
        mode: FractalMode,
        c: Complex,
        power: u32,
        max_iter: u32,
    ) -> Result<Self, FractalParamsError> {
        let params = Self {
            mode,
            c,
            pinned: false,
            power,
            max_iter,
            iter_offset: 0,
        };
        params.validate()?;

        Ok(params)
    }

    pub fn validate(&self) -> Result<(), FractalParamsError> {
        if self.max_iter == 0 {
            return Err(FractalParamsError::ZeroMaxIterationsError);
        }
        if self.power < MIN_POWER {
            return Err(FractalParamsError::PowerTooSmall(self.power));
        }
        if !self.c.is_finite() {
            return Err(FractalParamsError::NonFiniteConstant);
        }

        Ok(())
    }

    /// Whether the on-screen marker for `c` should be drawn and grabbable.
    #[must_use]
    pub fn marker_visible(&self) -> bool {
        self.mode == FractalMode::Julia || self.pinned
    }

    /// Returns `(z0, c)` for a plane point under the current mode.
    #[must_use]
    pub fn seed(&self, point: Complex) -> (Complex, Complex) {
        match self.mode {
            FractalMode::Mandelbrot if self.pinned => (self.c, point),
            FractalMode::Mandelbrot => (Complex::ZERO, point),
            FractalMode::Julia => (point, self.c),
        }
    }
}

impl Default for FractalParameters {
    fn default() -> Self {
        Self {
            mode: FractalMode::Mandelbrot,
            c: DEFAULT_JULIA_CONSTANT,
            pinned: false,
            power: MIN_POWER,
            max_iter: 100,
            iter_offset: 0,
        }
    }
}
