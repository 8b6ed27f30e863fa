//! Crate error type.
//!
//! Rasterization itself never fails: bad geometry is skipped. Errors only
//! come from configuration, mesh construction and frame export.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A [`RenderConfig`](crate::config::RenderConfig) field is out of range.
    InvalidConfig(String),
    /// A mesh face refers to a position that does not exist.
    InvalidMesh(String),
    /// Encoding or writing an image failed.
    Image(image::ImageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "invalid render config: {msg}"),
            Error::InvalidMesh(msg) => write!(f, "invalid mesh: {msg}"),
            Error::Image(err) => write!(f, "image export failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidConfig(_) | Error::InvalidMesh(_) => None,
            Error::Image(err) => Some(err),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err)
    }
}
