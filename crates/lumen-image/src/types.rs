use crate::ImageError;
use std::fmt;

/// Bits used to represent one color channel's intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelDepth {
    Depth8,
    Depth16,
}

impl ChannelDepth {
    /// Bytes occupied by one channel sample.
    pub fn bytes(&self) -> usize {
        match self {
            ChannelDepth::Depth8 => 1,
            ChannelDepth::Depth16 => 2,
        }
    }

    /// Bits occupied by one channel sample.
    pub fn bits(&self) -> u32 {
        match self {
            ChannelDepth::Depth8 => 8,
            ChannelDepth::Depth16 => 16,
        }
    }
}

impl fmt::Display for ChannelDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit depth", self.bits())
    }
}

/// Pixel layout of a raw buffer, derived from channel count and depth.
///
/// The mapping is a fixed table; any (channels, depth) pair outside it is
/// rejected. 8-bit color formats are BGR-ordered, 16-bit color formats are
/// RGB-ordered with little-endian samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Gray8,
    Gray16,
    Bgr24,
    Rgb48,
    Bgra32,
    Rgba64,
}

impl PixelFormat {
    /// Look up the pixel format for a channel count and depth.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Unsupported` for any pair outside the table
    /// (e.g., 2 channels).
    pub fn from_layout(channels: u8, depth: ChannelDepth) -> Result<Self, ImageError> {
        match (channels, depth) {
            (1, ChannelDepth::Depth8) => Ok(PixelFormat::Gray8),
            (1, ChannelDepth::Depth16) => Ok(PixelFormat::Gray16),
            (3, ChannelDepth::Depth8) => Ok(PixelFormat::Bgr24),
            (3, ChannelDepth::Depth16) => Ok(PixelFormat::Rgb48),
            (4, ChannelDepth::Depth8) => Ok(PixelFormat::Bgra32),
            (4, ChannelDepth::Depth16) => Ok(PixelFormat::Rgba64),
            _ => Err(ImageError::Unsupported { channels, depth }),
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            PixelFormat::Gray8 | PixelFormat::Gray16 => 1,
            PixelFormat::Bgr24 | PixelFormat::Rgb48 => 3,
            PixelFormat::Bgra32 | PixelFormat::Rgba64 => 4,
        }
    }

    pub fn depth(&self) -> ChannelDepth {
        match self {
            PixelFormat::Gray8 | PixelFormat::Bgr24 | PixelFormat::Bgra32 => ChannelDepth::Depth8,
            PixelFormat::Gray16 | PixelFormat::Rgb48 | PixelFormat::Rgba64 => {
                ChannelDepth::Depth16
            }
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() as usize * self.depth().bytes()
    }
}

/// Target format for `ByteImage::save`.
///
/// `Native` streams the raw buffer bytes verbatim with no header; the caller
/// must carry the geometry separately. TIFF is its own case here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Native,
}

impl EncodeFormat {
    /// Conventional file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            EncodeFormat::Jpeg => "jpg",
            EncodeFormat::Png => "png",
            EncodeFormat::Bmp => "bmp",
            EncodeFormat::Tiff => "tif",
            EncodeFormat::Native => "raw",
        }
    }
}
