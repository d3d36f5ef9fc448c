pub mod cancellation;
pub mod equalize;
pub mod evaluate_frame;
