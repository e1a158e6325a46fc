use super::*;

#[test]
fn premul_matches_rounded_product() {
    assert_eq!(Rgba8::opaque(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(
        Rgba8::new(100, 50, 200, 128).to_premul(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(Rgba8::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
}

#[test]
fn new_canvas_is_transparent_and_sized() {
    let c = Canvas::new(3, 2);
    assert_eq!(c.data().len(), 3 * 2 * 4);
    assert!(c.data().iter().all(|&b| b == 0));
    assert!(!c.is_empty());
    assert!(Canvas::new(0, 5).is_empty());
    assert!(Canvas::new(5, 0).is_empty());
}

#[test]
fn set_pixel_ignores_out_of_bounds() {
    let mut c = Canvas::filled(2, 2, Rgba8::WHITE);
    c.set_pixel(1, 1, Rgba8::opaque(1, 2, 3));
    c.set_pixel(2, 0, Rgba8::opaque(9, 9, 9));
    c.set_pixel(0, 7, Rgba8::opaque(9, 9, 9));
    assert_eq!(c.pixel(1, 1), Some([1, 2, 3, 255]));
    assert_eq!(c.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(c.pixel(2, 0), None);
}

#[test]
fn blit_crops_to_canvas_and_leaves_rest_untouched() {
    let mut c = Canvas::new(2, 2);
    // 3x1 source: only the first two pixels of row 0 land on the canvas.
    let src = [10, 10, 10, 255, 20, 20, 20, 255, 30, 30, 30, 255];
    c.blit_premul_at_origin(&src, 3, 1);
    assert_eq!(c.pixel(0, 0), Some([10, 10, 10, 255]));
    assert_eq!(c.pixel(1, 0), Some([20, 20, 20, 255]));
    assert_eq!(c.pixel(0, 1), Some([0, 0, 0, 0]));
}

#[test]
fn straight_conversion_undoes_premul() {
    let mut c = Canvas::new(1, 1);
    c.set_pixel(0, 0, Rgba8::new(200, 100, 0, 128));
    let straight = c.to_straight_rgba8();
    assert_eq!(straight[3], 128);
    assert!((i16::from(straight[0]) - 200).abs() <= 1);
    assert!((i16::from(straight[1]) - 100).abs() <= 1);
    assert_eq!(straight[2], 0);
}

#[test]
fn premultiply_in_place_matches_per_color_premul() {
    let mut px = vec![200, 100, 50, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &Rgba8::new(200, 100, 50, 128).to_premul());
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[1, 2, 3, 255]);
}
