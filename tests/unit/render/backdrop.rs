use super::*;

fn px(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn solid_fills_every_pixel() {
    let buf = rasterize_backdrop(&Backdrop::solid(Color::rgb(1, 2, 3)), 3, 2).unwrap();
    assert_eq!(buf.len(), 3 * 2 * 4);
    assert!(buf.chunks_exact(4).all(|p| p == [1, 2, 3, 255]));
}

#[test]
fn horizontal_gradient_runs_left_to_right() {
    let g = Backdrop::gradient([Color::BLACK, Color::WHITE], 0.0);
    let buf = rasterize_backdrop(&g, 100, 10).unwrap();
    let left = px(&buf, 100, 0, 5);
    let right = px(&buf, 100, 99, 5);
    assert!(left[0] <= 2, "{left:?}");
    assert!(right[0] >= 253, "{right:?}");
    assert_eq!(px(&buf, 100, 50, 0), px(&buf, 100, 50, 9));
}

#[test]
fn vertical_gradient_at_ninety_degrees() {
    let g = Backdrop::gradient([Color::BLACK, Color::WHITE], 90.0);
    let buf = rasterize_backdrop(&g, 10, 100).unwrap();
    assert!(px(&buf, 10, 5, 0)[0] <= 2);
    assert!(px(&buf, 10, 5, 99)[0] >= 253);
    assert_eq!(px(&buf, 10, 0, 40), px(&buf, 10, 9, 40));
}

#[test]
fn single_color_gradient_is_solid() {
    let g = Backdrop::gradient([Color::rgb(9, 9, 9)], 33.0);
    let buf = rasterize_backdrop(&g, 4, 4).unwrap();
    assert!(buf.chunks_exact(4).all(|p| p == [9, 9, 9, 255]));
}

#[test]
fn empty_gradient_is_rejected() {
    assert!(rasterize_backdrop(&Backdrop::gradient(Vec::new(), 0.0), 4, 4).is_err());
}

#[test]
fn three_stops_hit_the_middle_color() {
    let stops = [Color::rgb(255, 0, 0), Color::rgb(0, 255, 0), Color::rgb(0, 0, 255)];
    assert_eq!(sample_stops(&stops, 0.0), stops[0]);
    assert_eq!(sample_stops(&stops, 0.5), stops[1]);
    assert_eq!(sample_stops(&stops, 1.0), stops[2]);
    assert_eq!(sample_stops(&stops, 0.25), Color::rgb(128, 128, 0));
}
