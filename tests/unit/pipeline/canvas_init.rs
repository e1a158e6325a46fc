use std::{io::Cursor, sync::Arc};

use super::*;
use crate::{
    config::model::{ImageRef, RenderConfig},
    foundation::{core::Rgba8, error::SmudgeError},
};

fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn fills_with_background_color() {
    let cfg = RenderConfig {
        background_color: Some(Rgba8::opaque(10, 20, 30)),
        ..RenderConfig::new(4, 3, "")
    }
    .resolve();
    let canvas = init_canvas(&cfg).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (4, 3));
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(canvas.pixel(x, y), Some([10, 20, 30, 255]));
        }
    }
}

#[test]
fn smaller_background_image_leaves_remainder_transparent() {
    let cfg = RenderConfig {
        background_color: Some(Rgba8::opaque(1, 1, 1)),
        background_image: Some(ImageRef::Bytes(Arc::new(png_bytes(2, 2, [0, 200, 0, 255])))),
        ..RenderConfig::new(4, 4, "")
    }
    .resolve();
    let canvas = init_canvas(&cfg).unwrap();
    assert_eq!(canvas.pixel(1, 1), Some([0, 200, 0, 255]));
    // The background color is not used when an image is supplied.
    assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(2, 0), Some([0, 0, 0, 0]));
}

#[test]
fn larger_background_image_is_cropped() {
    let cfg = RenderConfig {
        background_image: Some(ImageRef::Bytes(Arc::new(png_bytes(10, 10, [5, 6, 7, 255])))),
        ..RenderConfig::new(3, 2, "")
    }
    .resolve();
    let canvas = init_canvas(&cfg).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (3, 2));
    assert!(canvas.data().chunks_exact(4).all(|px| px == [5, 6, 7, 255]));
}

#[test]
fn unreadable_background_fails_the_call() {
    let cfg = RenderConfig {
        background_image: Some(ImageRef::Path("/definitely/not/here.jpg".into())),
        ..RenderConfig::new(3, 2, "")
    }
    .resolve();
    let err = init_canvas(&cfg).unwrap_err();
    assert!(matches!(err, SmudgeError::BackgroundLoad(_)));
}

#[test]
fn zero_sized_canvas_is_empty() {
    let canvas = init_canvas(&RenderConfig::new(0, 0, "").resolve()).unwrap();
    assert!(canvas.is_empty());
    assert!(canvas.data().is_empty());
}
