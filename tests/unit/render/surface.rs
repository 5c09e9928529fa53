use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

#[test]
fn fingerprint_tracks_pixel_changes() {
    let a = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    let mut b = a.clone();
    assert_eq!(a.fingerprint(), b.fingerprint());
    b.data[7] = 9;
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn painter_fills_rect_into_layer() {
    let mut painter = Painter::new();
    let layer = painter
        .layer(8, 8, |ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 8.0));
            Ok(())
        })
        .unwrap();
    assert_eq!(layer.len(), 8 * 8 * 4);
    assert_eq!(&layer[0..4], &[255, 0, 0, 255]);
    let right = (8 - 1) * 4;
    assert_eq!(&layer[right..right + 4], &[0, 0, 0, 0]);
}

#[test]
fn masked_draw_only_touches_mask_area() {
    let mut surface = Surface::new(canvas(8, 8));
    let mut painter = Painter::new();
    painter
        .draw_masked(
            &mut surface,
            false,
            |ctx| {
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 255, 255));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 8.0, 8.0));
                Ok(())
            },
            |ctx| {
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 8.0, 4.0));
                Ok(())
            },
        )
        .unwrap();
    let frame = surface.into_frame();
    assert_eq!(frame.pixel(3, 1), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(3, 6), Some([0, 0, 0, 0]));
}

#[test]
fn from_premul_checks_length() {
    assert!(Surface::from_premul(canvas(2, 2), vec![0; 15]).is_err());
    assert!(Surface::from_premul(canvas(2, 2), vec![0; 16]).is_ok());
}

#[test]
fn source_paint_keeps_size_within_pixmap_limit() {
    let img = SourceImage::from_rgba8(3, 2, [9u8, 9, 9, 255].repeat(6)).unwrap();
    let up = source_image_paint(&img).unwrap();
    assert_eq!((up.width, up.height), (3, 2));
}

#[test]
fn oversized_source_is_downscaled_for_upload() {
    let img = SourceImage::from_rgba8(70_000, 2, [200u8, 10, 10, 255].repeat(140_000)).unwrap();
    let up = source_image_paint(&img).unwrap();
    assert_eq!(up.width, MAX_PAINT_SIDE);
    assert_eq!(up.height, 2);
    assert!(image_paint(&img.rgba8_premul, img.width, img.height).is_err());
}
