use crate::core::data::colour_buffer::ColourBuffer;
use std::time::Duration;

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub colour_buffer: ColourBuffer,
    pub max_iter: u32,
    pub render_duration: Duration,
}
