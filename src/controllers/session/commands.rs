use serde::{Deserialize, Serialize};

/// Discrete actions a host binds to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Animate back to the home view; cancels a running animation instead.
    ResetView,
    ToggleHistogram,
    /// Match the raster to the current window size.
    ResizeToWindow,
    DecreaseIterations,
    IncreaseIterations,
    ToggleJulia,
    /// Pin or unpin `c` as the Mandelbrot seed.
    TogglePinnedConstant,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Speed modifier (shift): multiplies animation and wheel speed.
    pub speed: bool,
    /// Alternate modifier (alt): reset about the centre.
    pub alternate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterOutcome {
    Continue,
    Quit,
}
