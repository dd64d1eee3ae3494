use crate::{ChannelDepth, EncodeFormat, ImageError, PixelFormat};
use crates_image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::io::{Cursor, Write};

/// A raw pixel buffer with its geometry.
///
/// The buffer is owned exclusively once constructed and the geometry is
/// immutable. `step` is the number of bytes per row and may exceed
/// `width * channels * depth-bytes` when rows carry padding.
#[derive(Clone, PartialEq)]
pub struct ByteImage {
    width: u32,
    height: u32,
    channels: u8,
    depth: ChannelDepth,
    data: Vec<u8>,
    step: usize,
}

impl std::fmt::Debug for ByteImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("depth", &self.depth)
            .field("step", &self.step)
            .field("data", &format!("<{} bytes>", self.data.len()))
            .finish()
    }
}

impl ByteImage {
    /// Create a new image from a raw buffer and its geometry.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Geometry` if:
    /// - `channels` is outside 1..=4
    /// - `width` or `height` is zero
    /// - `step` is smaller than one packed row
    /// - the buffer holds fewer than `step * height` bytes
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        depth: ChannelDepth,
        data: Vec<u8>,
        step: usize,
    ) -> Result<Self, ImageError> {
        if !(1..=4).contains(&channels) {
            return Err(ImageError::Geometry(format!(
                "channel count must be 1-4, got {channels}"
            )));
        }

        if width == 0 || height == 0 {
            return Err(ImageError::Geometry(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }

        let packed_row = width as usize * channels as usize * depth.bytes();
        if step < packed_row {
            return Err(ImageError::Geometry(format!(
                "step {step} is smaller than a packed row of {packed_row} bytes"
            )));
        }

        let required = step * height as usize;
        if data.len() < required {
            return Err(ImageError::Geometry(format!(
                "buffer holds {} bytes, geometry requires at least {required}",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            depth,
            data,
            step,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn depth(&self) -> ChannelDepth {
        self.depth
    }

    /// Bytes per row, including any padding.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel format for this image's channel count and depth.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Unsupported` when the combination is not in the
    /// format table (e.g., 2 channels).
    pub fn pixel_format(&self) -> Result<PixelFormat, ImageError> {
        PixelFormat::from_layout(self.channels, self.depth)
    }

    /// Convert to a packed `image` crate bitmap.
    ///
    /// Row padding is dropped, BGR-ordered 8-bit formats are swizzled to the
    /// RGB order the `image` crate uses, and 16-bit samples are assembled
    /// from little-endian byte pairs. Width and height are preserved.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Unsupported` when the channel/depth combination
    /// is not in the format table.
    pub fn to_bitmap(&self) -> Result<DynamicImage, ImageError> {
        let format = self.pixel_format()?;
        let row_bytes = self.width as usize * format.bytes_per_pixel();

        // Pack rows, dropping stride padding
        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
        for row in self.data.chunks(self.step).take(self.height as usize) {
            packed.extend_from_slice(&row[..row_bytes]);
        }

        let (w, h) = (self.width, self.height);
        let mismatch = || ImageError::Geometry("pixel buffer does not match image geometry".into());

        match format {
            PixelFormat::Gray8 => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, packed)
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(mismatch),
            PixelFormat::Bgr24 => {
                for px in packed.chunks_exact_mut(3) {
                    px.swap(0, 2);
                }
                ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, packed)
                    .map(DynamicImage::ImageRgb8)
                    .ok_or_else(mismatch)
            }
            PixelFormat::Bgra32 => {
                for px in packed.chunks_exact_mut(4) {
                    px.swap(0, 2);
                }
                ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, packed)
                    .map(DynamicImage::ImageRgba8)
                    .ok_or_else(mismatch)
            }
            PixelFormat::Gray16 => ImageBuffer::<Luma<u16>, _>::from_raw(w, h, samples_le(&packed))
                .map(DynamicImage::ImageLuma16)
                .ok_or_else(mismatch),
            PixelFormat::Rgb48 => ImageBuffer::<Rgb<u16>, _>::from_raw(w, h, samples_le(&packed))
                .map(DynamicImage::ImageRgb16)
                .ok_or_else(mismatch),
            PixelFormat::Rgba64 => ImageBuffer::<Rgba<u16>, _>::from_raw(w, h, samples_le(&packed))
                .map(DynamicImage::ImageRgba16)
                .ok_or_else(mismatch),
        }
    }

    /// Encode the image into a byte vector.
    ///
    /// `Native` returns a copy of the raw buffer; every other format goes
    /// through [`ByteImage::to_bitmap`] and the matching `image` crate codec.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Unsupported` for layouts outside the format
    /// table and `ImageError::Encode` when the codec rejects the bitmap.
    pub fn to_bytes(&self, format: EncodeFormat) -> Result<Vec<u8>, ImageError> {
        let target = match format {
            EncodeFormat::Native => return Ok(self.data.clone()),
            EncodeFormat::Jpeg => crates_image::ImageFormat::Jpeg,
            EncodeFormat::Png => crates_image::ImageFormat::Png,
            EncodeFormat::Bmp => crates_image::ImageFormat::Bmp,
            EncodeFormat::Tiff => crates_image::ImageFormat::Tiff,
        };

        let bitmap = constrain_for(format, self.to_bitmap()?);

        let mut cursor = Cursor::new(Vec::new());
        bitmap.write_to(&mut cursor, target)?;
        Ok(cursor.into_inner())
    }

    /// Write the image to `writer` in the requested format.
    ///
    /// `Native` streams the raw buffer bytes verbatim with no header. Known
    /// limitation: a mid-write I/O failure leaves a partially written stream;
    /// no buffering is added on top of `writer`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Io` on write failure, plus the errors of
    /// [`ByteImage::to_bytes`] for the encoded formats.
    pub fn save<W: Write>(&self, writer: &mut W, format: EncodeFormat) -> Result<(), ImageError> {
        match format {
            EncodeFormat::Native => writer.write_all(&self.data)?,
            _ => writer.write_all(&self.to_bytes(format)?)?,
        }
        Ok(())
    }

    /// Lock the buffer for reading.
    ///
    /// The returned handle pins the buffer for its lifetime; the raw address
    /// it exposes is valid only until the handle is dropped.
    pub fn lock(&self) -> ImageLock<'_> {
        ImageLock {
            data: &self.data,
            step: self.step,
        }
    }

    /// Lock the buffer for writing.
    pub fn lock_mut(&mut self) -> ImageLockMut<'_> {
        ImageLockMut {
            data: &mut self.data,
            step: self.step,
        }
    }

    /// Consume the image and release its buffer to the caller.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Scoped read lock over an image buffer.
///
/// Holding the lock borrows the image, so the buffer cannot move or be
/// dropped while the handle exists. Dropping the handle releases the pin on
/// every exit path.
pub struct ImageLock<'a> {
    data: &'a [u8],
    step: usize,
}

impl ImageLock<'_> {
    /// Bytes per row, including any padding.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Stable address of the first pixel byte, valid while the lock is held.
    pub fn pixel_data(&self) -> *const u8 {
        self.data.as_ptr()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.data
    }
}

/// Scoped write lock over an image buffer.
pub struct ImageLockMut<'a> {
    data: &'a mut [u8],
    step: usize,
}

impl ImageLockMut<'_> {
    /// Bytes per row, including any padding.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Stable address of the first pixel byte, valid while the lock is held.
    pub fn pixel_data(&mut self) -> *mut u8 {
        self.data.as_mut_ptr()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.data
    }
}

/// Assemble little-endian u16 samples from a packed byte buffer.
fn samples_le(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect()
}

/// Down-convert bitmaps the target codec cannot carry.
///
/// JPEG holds neither alpha nor 16-bit samples; BMP holds no 16-bit samples.
fn constrain_for(format: EncodeFormat, bitmap: DynamicImage) -> DynamicImage {
    match format {
        EncodeFormat::Jpeg => match &bitmap {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => bitmap,
            DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(bitmap.to_luma8()),
            _ => DynamicImage::ImageRgb8(bitmap.to_rgb8()),
        },
        EncodeFormat::Bmp => match &bitmap {
            DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(bitmap.to_luma8()),
            DynamicImage::ImageRgb16(_) => DynamicImage::ImageRgb8(bitmap.to_rgb8()),
            DynamicImage::ImageRgba16(_) => DynamicImage::ImageRgba8(bitmap.to_rgba8()),
            _ => bitmap,
        },
        _ => bitmap,
    }
}
