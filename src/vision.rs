// Per-pixel filters that turn a camera frame into what the rain collides with.
// Visual expectation: mirror makes the feed behave like a mirror, grayscale
// removes colour, threshold leaves pure black (obstacle) and white (clear).
use crate::error::Error;
use crate::pixels::ensure_sized;
use crate::types::PixelBuffer;

const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

pub const CLEAR: u8 = 255;
pub const OBSTACLE: u8 = 0;

fn check_same_size(op: &'static str, a: &PixelBuffer, b: &PixelBuffer) -> Result<(), Error> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::mismatch(op, a.dimensions(), b.dimensions()));
    }
    Ok(())
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    // Stored like a clamped byte: nearest integer, saturated to 0..=255.
    (LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Flip left-right: dest column `W-1-j` receives source column `j`, all four channels.
pub fn mirror(src: &PixelBuffer, dest: &mut PixelBuffer) -> Result<(), Error> {
    check_same_size("mirror", src, dest)?;
    let w = src.width;
    let row_bytes = w * 4;

    for (src_row, dst_row) in src
        .data
        .chunks_exact(row_bytes)
        .zip(dest.data.chunks_exact_mut(row_bytes))
    {
        for j in 0..w {
            let from = j * 4;
            let to = (w - 1 - j) * 4;
            dst_row[to..to + 4].copy_from_slice(&src_row[from..from + 4]);
        }
    }
    Ok(())
}

/// Luma-weighted gray into R,G,B of `dest`; `dest` alpha is left as it was.
pub fn grayscale(src: &PixelBuffer, dest: &mut PixelBuffer) -> Result<(), Error> {
    check_same_size("grayscale", src, dest)?;
    for (s, d) in src.data.chunks_exact(4).zip(dest.data.chunks_exact_mut(4)) {
        let g = luma(s[0], s[1], s[2]);
        d[0] = g;
        d[1] = g;
        d[2] = g;
    }
    Ok(())
}

/// Same as [`grayscale`] with source and destination being one buffer.
pub fn grayscale_in_place(image: &mut PixelBuffer) {
    for px in image.data.chunks_exact_mut(4) {
        let g = luma(px[0], px[1], px[2]);
        px[0] = g;
        px[1] = g;
        px[2] = g;
    }
}

/// Binary cut on the red channel: `R >= threshold*255` is clear (255), anything
/// darker is obstacle (0). Alpha is copied from `src`.
pub fn threshold(src: &PixelBuffer, dest: &mut PixelBuffer, threshold: f32) -> Result<(), Error> {
    check_same_size("threshold", src, dest)?;
    let cutoff = threshold * 255.0;
    for (s, d) in src.data.chunks_exact(4).zip(dest.data.chunks_exact_mut(4)) {
        let v = if s[0] as f32 >= cutoff { CLEAR } else { OBSTACLE };
        d[0] = v;
        d[1] = v;
        d[2] = v;
        d[3] = s[3];
    }
    Ok(())
}

/// The two derived buffers, reused frame after frame.
/// `display` = mirrored gray feed, `obstacle` = thresholded mask of it.
#[derive(Default)]
pub struct FramePipeline {
    display: Option<PixelBuffer>,
    obstacle: Option<PixelBuffer>,
}

impl FramePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// mirror -> grayscale -> threshold, resizing the buffers if the frame size changed.
    pub fn process(&mut self, frame: &PixelBuffer, threshold_value: f32) -> Result<(), Error> {
        let (w, h) = frame.dimensions();
        let mut display = ensure_sized(self.display.take(), w, h)?;
        let mut obstacle = ensure_sized(self.obstacle.take(), w, h)?;

        mirror(frame, &mut display)?;
        grayscale_in_place(&mut display);
        threshold(&display, &mut obstacle, threshold_value)?;

        self.display = Some(display);
        self.obstacle = Some(obstacle);
        Ok(())
    }

    pub fn display(&self) -> Option<&PixelBuffer> {
        self.display.as_ref()
    }

    pub fn obstacle(&self) -> Option<&PixelBuffer> {
        self.obstacle.as_ref()
    }

    /// Buffer to put on screen: the mask in debug view, the gray feed otherwise.
    pub fn visible(&self, debugging: bool) -> Option<&PixelBuffer> {
        if debugging { self.obstacle() } else { self.display() }
    }
}
