//! Pixel format conversion for framebuffer presenters.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PixelFormatError {
    #[error("rgb length {0} is not a multiple of 3")]
    RaggedSource(usize),
    #[error("rgba length {actual} does not match expected {expected}")]
    DestinationMismatch { expected: usize, actual: usize },
}

/// Widens packed RGB into opaque RGBA.
pub fn copy_rgb_to_rgba(src: &[u8], dst: &mut [u8]) -> Result<(), PixelFormatError> {
    if src.len() % 3 != 0 {
        return Err(PixelFormatError::RaggedSource(src.len()));
    }
    let expected = src.len() / 3 * 4;
    if dst.len() != expected {
        return Err(PixelFormatError::DestinationMismatch {
            expected,
            actual: dst.len(),
        });
    }

    for (rgb, rgba) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        rgba[..3].copy_from_slice(rgb);
        rgba[3] = u8::MAX;
    }

    Ok(())
}
