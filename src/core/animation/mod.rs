pub mod settings;
pub mod state;
pub mod step;

pub use settings::AnimationSettings;
pub use state::{AnimationKind, AnimationState, ResetOutcome, ZoomAnimation};
pub use step::{AnimationStepReport, step_animation};
