// Where frames come from: the default camera, or a synthetic pattern when
// there is no camera to open.
// Visual expectation: `next_frame()` hands back an RGBA image the size of the
// stream, ready for the filter pipeline.

use crate::error::Error;
use crate::types::PixelBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// We expand the decoded RGB frame into an `image` RGBA buffer.
use image::{Rgba, RgbaImage};

/// Pull-style frame source. `Ok(None)` means "nothing this tick", not an error.
pub trait FrameProvider {
    fn next_frame(&mut self) -> Result<Option<PixelBuffer>, Error>;
    fn resolution(&self) -> (usize, usize);
}

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution (the driver may pick another).
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        log::info!(
            "camera {index} streaming at {}x{} (asked for {width}x{height})",
            actual.width(),
            actual.height()
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }
}

impl FrameProvider for CameraCapture {
    /// Grab one frame (blocks until the camera has one). A frame that fails to
    /// arrive or decode is logged and skipped; the stream stays open.
    fn next_frame(&mut self) -> Result<Option<PixelBuffer>, Error> {
        let frame = match self.cam.frame() {
            Ok(f) => f,
            Err(e) => {
                log::warn!("dropped camera frame: {e}");
                return Ok(None);
            }
        };

        let rgb_img = match frame.decode_image::<RgbFormat>() {
            Ok(img) => img,
            Err(e) => {
                log::warn!("could not decode camera frame: {e}");
                return Ok(None);
            }
        };

        let (w, h) = rgb_img.dimensions();
        if (w, h) != (self.width, self.height) {
            log::info!("camera resolution changed to {w}x{h}");
            self.width = w;
            self.height = h;
        }

        let rgba = RgbaImage::from_fn(w, h, |x, y| {
            let p = rgb_img.get_pixel(x, y);
            Rgba([p[0], p[1], p[2], 255])
        });
        PixelBuffer::from_raw(w as usize, h as usize, rgba.into_raw())
            .map(Some)
            .map_err(|e| Error::CameraFrame(format!("Convert RGBA: {e}")))
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }
}

/// Synthetic feed: light background with a dark disc drifting side to side and a
/// dark "floor" bar, so the rain has something to land on without a camera.
pub struct PatternSource {
    width: usize,
    height: usize,
    tick: u64,
}

impl PatternSource {
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, tick: 0 })
    }

    /// Render the pattern for frame number `tick`.
    pub fn render(&self, tick: u64) -> Result<PixelBuffer, Error> {
        let (w, h) = (self.width, self.height);
        let mut img = PixelBuffer::filled(w, h, [220, 220, 210, 255])?;

        // disc sweeps across in ~6 s at 60 fps
        let phase = (tick % 360) as f32 / 360.0 * std::f32::consts::TAU;
        let cx = (0.5 + 0.35 * phase.sin()) * w as f32;
        let cy = 0.55 * h as f32;
        let r = 0.15 * w.min(h) as f32;
        let floor = h - (h / 10).max(1);

        for row in 0..h {
            for col in 0..w {
                let dx = col as f32 - cx;
                let dy = row as f32 - cy;
                if dx * dx + dy * dy <= r * r || row >= floor {
                    img.set_rgba(col, row, [25, 20, 30, 255]);
                }
            }
        }
        Ok(img)
    }
}

impl FrameProvider for PatternSource {
    fn next_frame(&mut self) -> Result<Option<PixelBuffer>, Error> {
        let img = self.render(self.tick)?;
        self.tick = self.tick.wrapping_add(1);
        Ok(Some(img))
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
