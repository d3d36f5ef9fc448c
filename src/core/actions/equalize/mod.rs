#[allow(clippy::module_inception)]
pub mod equalize;
pub mod histogram;
pub mod spectrum;

pub use equalize::{
    EdgeSuppression, EqualizeError, EqualizerSettings, equalize, equalize_cancelable,
};
pub use histogram::{DEFAULT_PRECISION_FACTOR, HistogramTable};
