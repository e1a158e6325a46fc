use kurbo::{Rect, Shape};

use super::*;

fn square_glyph(side: f64) -> ShapedGlyph {
    ShapedGlyph {
        width: side,
        height: side,
        ink: GlyphInk::Outline(Rect::new(0.0, 0.0, side, side).to_path(0.1)),
    }
}

#[test]
fn empty_layer_leaves_canvas_untouched() {
    let mut canvas = Canvas::filled(8, 8, Rgba8::WHITE);
    let before = canvas.clone();
    Layer::for_canvas(&canvas)
        .unwrap()
        .composite_onto(&mut canvas)
        .unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn outline_glyph_fills_under_transform() {
    let mut canvas = Canvas::filled(16, 16, Rgba8::WHITE);
    let mut layer = Layer::for_canvas(&canvas).unwrap();
    layer.fill_glyph(
        &square_glyph(4.0),
        Affine::translate((8.0, 8.0)),
        Rgba8::opaque(0, 0, 255),
    );
    layer.composite_onto(&mut canvas).unwrap();

    assert_eq!(canvas.pixel(9, 9), Some([0, 0, 255, 255]));
    assert_eq!(canvas.pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(13, 13), Some([255, 255, 255, 255]));
}

#[test]
fn stroke_covers_pixels_along_the_path() {
    let mut canvas = Canvas::filled(16, 16, Rgba8::WHITE);
    let mut layer = Layer::for_canvas(&canvas).unwrap();
    let mut path = BezPath::new();
    path.move_to((0.0, 8.0));
    path.line_to((16.0, 8.0));
    layer.stroke_path(&path, Rgba8::opaque(255, 0, 0), 2.0);
    layer.composite_onto(&mut canvas).unwrap();

    assert_eq!(canvas.pixel(5, 7), Some([255, 0, 0, 255]));
    assert_eq!(canvas.pixel(5, 8), Some([255, 0, 0, 255]));
    assert_eq!(canvas.pixel(5, 2), Some([255, 255, 255, 255]));
}

#[test]
fn bezpath_conversion_keeps_elements() {
    let mut path = BezPath::new();
    path.move_to((1.0, 2.0));
    path.quad_to((3.0, 4.0), (5.0, 6.0));
    path.close_path();
    let cpu = bezpath_to_cpu(&path);
    assert_eq!(cpu.elements().len(), 3);
}
