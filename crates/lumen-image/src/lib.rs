//! Byte-level image adapter for the lumen ecosystem.
//!
//! This crate wraps a raw pixel buffer plus its geometry (width, height,
//! channel count, channel depth, row stride) and adapts it to the `image`
//! crate's bitmap types and encoders.
//!
//! Buffers are interpreted per the fixed table in [`PixelFormat`]: 8-bit
//! color formats are BGR-ordered, 16-bit color formats are RGB-ordered with
//! little-endian samples.

pub mod error;
pub mod image;
pub mod types;

pub use error::ImageError;
pub use image::{ByteImage, ImageLock, ImageLockMut};
pub use types::{ChannelDepth, EncodeFormat, PixelFormat};

/// Encodes a [`ByteImage`] into bytes of the requested format.
///
/// `Native` hands back the raw buffer without copying. The CPU-bound
/// encoding work runs on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `ImageError::Unsupported` for layouts outside the format table
/// and `ImageError::Encode` if encoding fails.
pub async fn encode(image: ByteImage, format: EncodeFormat) -> Result<Vec<u8>, ImageError> {
    tokio::task::spawn_blocking(move || {
        if format == EncodeFormat::Native {
            Ok(image.into_raw())
        } else {
            image.to_bytes(format)
        }
    })
    .await
    .map_err(|e| ImageError::Encode(e.to_string()))?
}
