use std::{io::Cursor, sync::Arc};

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decodes_png_bytes_to_premultiplied_rgba() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let bg = load_background(&ImageRef::Bytes(Arc::new(png_bytes(img)))).unwrap();
    assert_eq!((bg.width, bg.height), (1, 1));
    assert_eq!(
        bg.rgba8_premul,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn rasterizes_svg_at_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
        <rect x="0" y="0" width="8" height="4" fill="#00ff00"/>
    </svg>"##;
    let bg = load_background(&ImageRef::Bytes(Arc::new(svg.to_vec()))).unwrap();
    assert_eq!((bg.width, bg.height), (8, 4));
    // Interior pixel is fully covered.
    let i = (2 * 8 + 4) * 4;
    assert_eq!(&bg.rgba8_premul[i..i + 4], &[0, 255, 0, 255]);
}

#[test]
fn missing_file_is_a_background_load_error() {
    let err = load_background(&ImageRef::Path("/definitely/not/here.png".into())).unwrap_err();
    assert!(matches!(err, SmudgeError::BackgroundLoad(_)));
    assert!(err.to_string().contains("here.png"));
}

#[test]
fn garbage_bytes_are_a_background_load_error() {
    let err = load_background(&ImageRef::Bytes(Arc::new(vec![1, 2, 3, 4]))).unwrap_err();
    assert!(matches!(err, SmudgeError::BackgroundLoad(_)));
}

#[test]
fn svg_sniffing_accepts_xml_prolog() {
    assert!(looks_like_svg(b"<?xml version=\"1.0\"?>\n<svg></svg>"));
    assert!(looks_like_svg(b"  <svg xmlns=\"http://www.w3.org/2000/svg\"/>"));
    assert!(!looks_like_svg(b"\x89PNG\r\n"));
    assert!(has_svg_extension(Path::new("bg.SVG")));
    assert!(!has_svg_extension(Path::new("bg.jpg")));
}
