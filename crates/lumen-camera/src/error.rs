use lumen_image::ImageError;
use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    Device(String),
    Stream(String),
    Channel(String),
    NotOpen,
    Busy(String),
    Unsupported(String),
    ReadOnly(String),
    Parse(String),
    Image(ImageError),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
            CameraError::NotOpen => write!(f, "camera is not open"),
            CameraError::Busy(msg) => write!(f, "camera is busy: {msg}"),
            CameraError::Unsupported(op) => write!(f, "operation not supported: {op}"),
            CameraError::ReadOnly(name) => write!(f, "parameter '{name}' is read-only"),
            CameraError::Parse(msg) => write!(f, "parse error: {msg}"),
            CameraError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<ImageError> for CameraError {
    fn from(err: ImageError) -> Self {
        CameraError::Image(err)
    }
}
