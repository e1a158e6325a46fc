use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::core::Rgba8;

/// Single source of pseudo-randomness for one generation call.
///
/// Every randomized decision in the pipeline pulls from one stream in a fixed order, so an
/// injected seeded stream reproduces a raster exactly. Only [`RandomStream::next_u64`] is
/// required; the derived draws are defined on top of it and must not be overridden by
/// implementations that want to stay reproducible across streams.
pub trait RandomStream {
    /// Next raw 64-bit draw.
    fn next_u64(&mut self) -> u64;

    /// Uniform `f64` in `[0, 1)`.
    fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in `[0, n)`; `0` when `n == 0`.
    fn below(&mut self, n: u32) -> u32 {
        ((u128::from(self.next_u64()) * u128::from(n)) >> 64) as u32
    }

    /// Opaque color from three channel draws in R, G, B order.
    fn opaque_color(&mut self) -> Rgba8 {
        let r = self.below(256) as u8;
        let g = self.below(256) as u8;
        let b = self.below(256) as u8;
        Rgba8::opaque(r, g, b)
    }
}

impl<R: RandomStream + ?Sized> RandomStream for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// SplitMix64 generator.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Generator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeded from the wall clock in nanoseconds.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self::new(nanos as u64)
    }
}

impl RandomStream for Rng64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
