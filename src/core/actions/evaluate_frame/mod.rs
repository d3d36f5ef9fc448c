#[allow(clippy::module_inception)]
pub mod evaluate_frame;
pub mod ports;

pub use evaluate_frame::{
    EvaluateEscapeBufferError, EvaluateFrameError, evaluate_escape_buffer, evaluate_frame,
    evaluate_frame_cancelable, evaluate_frame_serial,
};
