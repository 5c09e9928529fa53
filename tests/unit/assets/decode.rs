use super::*;

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decode_png_premultiplies() {
    let bytes = png_bytes(3, 2, [255, 0, 0, 128]);
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(&img.rgba8_premul[0..4], &[128, 0, 0, 128]);
    assert_eq!(img.size(), Size::new(3.0, 2.0));
}

#[test]
fn non_image_bytes_are_rejected_as_unsupported() {
    let err = decode_image(b"%PDF-1.7 definitely not a raster").unwrap_err();
    assert!(matches!(err, ShotframeError::UnsupportedImage(_)));
}

#[test]
fn from_rgba8_validates_length() {
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(SourceImage::from_rgba8(0, 2, vec![]).is_err());
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![128u8, 64, 0, 128, 10, 20, 30, 255, 9, 9, 9, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[255, 128, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[9, 9, 9, 0]);
}
