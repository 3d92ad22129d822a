// Core types shared by the filters, the simulation and the window.

/// RGBA image, 4 bytes per pixel, rows top to bottom, columns left to right.
/// Invariant: `data.len() == width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) data: Vec<u8>,
}

impl PixelBuffer {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn red_index(&self, col: usize, row: usize) -> usize {
        (row * self.width + col) * 4
    }

    #[inline]
    pub fn green_index(&self, col: usize, row: usize) -> usize {
        self.red_index(col, row) + 1
    }

    #[inline]
    pub fn blue_index(&self, col: usize, row: usize) -> usize {
        self.red_index(col, row) + 2
    }

    #[inline]
    pub fn alpha_index(&self, col: usize, row: usize) -> usize {
        self.red_index(col, row) + 3
    }

    /// Red sample at (col,row). Caller keeps the coordinate in bounds.
    #[inline]
    pub fn red(&self, col: usize, row: usize) -> u8 {
        self.data[self.red_index(col, row)]
    }

    /// All four channels of one pixel.
    #[inline]
    pub fn rgba(&self, col: usize, row: usize) -> [u8; 4] {
        let i = self.red_index(col, row);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn set_rgba(&mut self, col: usize, row: usize, px: [u8; 4]) {
        let i = self.red_index(col, row);
        self.data[i..i + 4].copy_from_slice(&px);
    }
}

/// What the window shows: one packed 0x00RRGGBB word per pixel (minifb format).
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Resize (and blank) only when the size actually changes.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }
}

/// Opaque handle to a renderable glyph owned by the render layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphHandle(pub u64);
