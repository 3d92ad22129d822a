// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Opening/starting the camera failed
    #[error("Camera init error: {0}")]
    CameraInit(String),

    /// Grabbing/decoding a frame failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),

    /// A buffer was requested with a zero (or overflowing) size
    #[error("Invalid buffer dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Two buffers handed to the same operation disagree on size
    #[error("{op}: dimension mismatch ({expected} vs {found})")]
    DimensionMismatch {
        op: &'static str,
        expected: String,
        found: String,
    },

    /// The text corpus could not be built
    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a size mismatch between two `w x h` buffers.
    pub(crate) fn mismatch(op: &'static str, expected: (usize, usize), found: (usize, usize)) -> Self {
        Error::DimensionMismatch {
            op,
            expected: format!("{}x{}", expected.0, expected.1),
            found: format!("{}x{}", found.0, found.1),
        }
    }
}
