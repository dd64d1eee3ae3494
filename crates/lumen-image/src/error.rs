use crate::ChannelDepth;
use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Unsupported { channels: u8, depth: ChannelDepth },
    Geometry(String),
    Encode(String),
    Io(std::io::Error),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Unsupported { channels, depth } => {
                write!(f, "unsupported image format: {channels} channel(s) at {depth}")
            }
            ImageError::Geometry(msg) => write!(f, "invalid image geometry: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Encode(err.to_string())
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err)
    }
}
