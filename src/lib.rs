//! Text rain: letters fall over a mirrored camera feed and pile up on
//! anything dark in it.
//!
//! Each frame the camera image is mirrored, grayscaled and thresholded into an
//! obstacle mask ([`vision`]); the simulation ([`rain`]) lets letters fall and
//! lifts any letter that ends up on a dark mask pixel to the first clear pixel
//! above it.

pub mod camera;
pub mod config;
pub mod coords;
pub mod corpus;
pub mod draw;
pub mod error;
pub mod pixels;
pub mod rain;
pub mod render;
pub mod settings;
pub mod types;
pub mod vision;

pub use error::Error;
pub use rain::{RainSim, RenderLayer};
pub use settings::Settings;
pub use types::{FrameBuffer, GlyphHandle, PixelBuffer};
