pub mod iterations;
pub mod transform;

pub use iterations::{MAX_MAX_ITER, MIN_MAX_ITER, derive_max_iter};
pub use transform::{DEFAULT_ZOOM_SENSITIVITY, ViewTransform};
