// Allocation and copying of RGBA pixel buffers.
// Visual expectation: none of this is visible on its own; it keeps the display
// and obstacle buffers the same size as the camera frame.
use crate::error::Error;
use crate::types::PixelBuffer;

/// Allocate a `width x height` buffer with every sample 0 (transparent black).
pub fn create_blank(width: usize, height: usize) -> Result<PixelBuffer, Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(Error::InvalidDimensions { width, height })?;
    Ok(PixelBuffer { width, height, data: vec![0u8; len] })
}

/// Keep `buffer` if it already has the requested size, otherwise hand back a
/// fresh blank one. Reallocation only happens when the source resolution changes.
pub fn ensure_sized(
    buffer: Option<PixelBuffer>,
    width: usize,
    height: usize,
) -> Result<PixelBuffer, Error> {
    match buffer {
        Some(b) if b.width == width && b.height == height => Ok(b),
        Some(b) => {
            log::debug!("resizing buffer {}x{} -> {}x{}", b.width, b.height, width, height);
            create_blank(width, height)
        }
        None => create_blank(width, height),
    }
}

/// Copy every sample of `source` into `dest`.
/// Buffers of different byte length are rejected instead of truncated.
pub fn copy_pixels(source: &PixelBuffer, dest: &mut PixelBuffer) -> Result<(), Error> {
    if source.data.len() != dest.data.len() {
        return Err(Error::mismatch("copy_pixels", source.dimensions(), dest.dimensions()));
    }
    dest.data.copy_from_slice(&source.data);
    Ok(())
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking the length invariant.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, Error> {
        let blank = create_blank(width, height)?;
        if blank.data.len() != data.len() {
            return Err(Error::DimensionMismatch {
                op: "from_raw",
                expected: format!("{} bytes", blank.data.len()),
                found: format!("{} bytes", data.len()),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Solid-colour buffer; handy for building masks by hand.
    pub fn filled(width: usize, height: usize, px: [u8; 4]) -> Result<Self, Error> {
        let mut b = create_blank(width, height)?;
        for chunk in b.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Ok(b)
    }
}
