use lumen_image::{ChannelDepth, EncodeFormat, ImageError, PixelFormat};

#[test]
fn test_format_table_mapping() {
    let table = [
        (1, ChannelDepth::Depth8, PixelFormat::Gray8),
        (1, ChannelDepth::Depth16, PixelFormat::Gray16),
        (3, ChannelDepth::Depth8, PixelFormat::Bgr24),
        (3, ChannelDepth::Depth16, PixelFormat::Rgb48),
        (4, ChannelDepth::Depth8, PixelFormat::Bgra32),
        (4, ChannelDepth::Depth16, PixelFormat::Rgba64),
    ];

    for (channels, depth, expected) in table {
        let format = PixelFormat::from_layout(channels, depth).unwrap();
        assert_eq!(format, expected);
        assert_eq!(format.channels(), channels);
        assert_eq!(format.depth(), depth);
    }
}

#[test]
fn test_format_table_rejects_unlisted_pairs() {
    for depth in [ChannelDepth::Depth8, ChannelDepth::Depth16] {
        let err = PixelFormat::from_layout(2, depth).unwrap_err();
        assert!(matches!(err, ImageError::Unsupported { channels: 2, .. }));
    }
}

#[test]
fn test_bytes_per_pixel() {
    assert_eq!(PixelFormat::Gray8.bytes_per_pixel(), 1);
    assert_eq!(PixelFormat::Gray16.bytes_per_pixel(), 2);
    assert_eq!(PixelFormat::Bgr24.bytes_per_pixel(), 3);
    assert_eq!(PixelFormat::Rgb48.bytes_per_pixel(), 6);
    assert_eq!(PixelFormat::Bgra32.bytes_per_pixel(), 4);
    assert_eq!(PixelFormat::Rgba64.bytes_per_pixel(), 8);
}

#[test]
fn test_channel_depth_helpers() {
    assert_eq!(ChannelDepth::Depth8.bytes(), 1);
    assert_eq!(ChannelDepth::Depth16.bytes(), 2);
    assert_eq!(ChannelDepth::Depth8.bits(), 8);
    assert_eq!(ChannelDepth::Depth16.bits(), 16);
}

#[test]
fn test_encode_format_extensions() {
    assert_eq!(EncodeFormat::Jpeg.extension(), "jpg");
    assert_eq!(EncodeFormat::Png.extension(), "png");
    assert_eq!(EncodeFormat::Bmp.extension(), "bmp");
    assert_eq!(EncodeFormat::Tiff.extension(), "tif");
    assert_eq!(EncodeFormat::Native.extension(), "raw");
}
