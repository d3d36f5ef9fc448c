pub mod still;

pub use still::{StillRenderController, StillRenderError};
