use super::*;
use crate::foundation::{core::Rgba8, rng::Rng64};

struct Counting {
    inner: Rng64,
    draws: usize,
}

impl RandomStream for Counting {
    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }
}

fn changed_pixels(a: &Canvas, b: &Canvas) -> usize {
    a.data()
        .chunks_exact(4)
        .zip(b.data().chunks_exact(4))
        .filter(|(x, y)| x != y)
        .count()
}

#[test]
fn consumes_five_draws_per_dot() {
    let mut canvas = Canvas::filled(16, 8, Rgba8::WHITE);
    let mut rng = Counting {
        inner: Rng64::new(11),
        draws: 0,
    };
    inject_noise(&mut canvas, 7, &mut rng);
    assert_eq!(rng.draws, 35);
}

#[test]
fn dots_land_where_the_stream_says() {
    let mut canvas = Canvas::filled(16, 8, Rgba8::WHITE);
    inject_noise(&mut canvas, 3, &mut Rng64::new(21));

    let mut replay = Rng64::new(21);
    let mut expected = Canvas::filled(16, 8, Rgba8::WHITE);
    for _ in 0..3 {
        let x = replay.below(16);
        let y = replay.below(8);
        let c = replay.opaque_color();
        expected.set_pixel(x, y, c);
    }
    assert_eq!(canvas.data(), expected.data());
}

#[test]
fn changes_at_most_count_pixels_and_all_are_opaque() {
    let base = Canvas::filled(32, 32, Rgba8::TRANSPARENT);
    let mut canvas = base.clone();
    inject_noise(&mut canvas, 50, &mut Rng64::new(4));
    let changed = changed_pixels(&base, &canvas);
    assert!(changed >= 1 && changed <= 50);
    for px in canvas.data().chunks_exact(4) {
        assert!(px[3] == 0 || px[3] == 255);
    }
}

#[test]
fn zero_count_is_a_no_op() {
    let base = Canvas::filled(4, 4, Rgba8::WHITE);
    let mut canvas = base.clone();
    let mut rng = Counting {
        inner: Rng64::new(0),
        draws: 0,
    };
    inject_noise(&mut canvas, 0, &mut rng);
    assert_eq!(rng.draws, 0);
    assert_eq!(canvas.data(), base.data());
}

#[test]
fn empty_canvas_consumes_nothing() {
    let mut canvas = Canvas::new(0, 5);
    let mut rng = Counting {
        inner: Rng64::new(0),
        draws: 0,
    };
    inject_noise(&mut canvas, 10, &mut rng);
    assert_eq!(rng.draws, 0);
}
