//! Deterministic smooth value noise for organic outlines.
//!
//! The lookup table is filled once from a closed-form hash of the table index
//! and never mutated afterwards. Sampling is a pure function of
//! `(x, y, seed, octaves)`, so glyph and fusion outlines are reproducible
//! across calls and processes.

use once_cell::sync::Lazy;

/// Number of entries in the lookup table.
pub const TABLE_SIZE: usize = 256;

/// Frequency multiplier between consecutive octaves.
const LACUNARITY: f64 = 1.8;
/// Amplitude multiplier between consecutive octaves.
const PERSISTENCE: f64 = 0.5;

static SHARED: Lazy<NoiseField> = Lazy::new(NoiseField::new);

/// Multi-octave value noise over a fixed lookup table.
#[derive(Debug, Clone)]
pub struct NoiseField {
    table: [f64; TABLE_SIZE],
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseField {
    /// Build the lookup table. Entries lie in [-1, 1).
    pub fn new() -> Self {
        let mut table = [0.0; TABLE_SIZE];
        for (i, slot) in table.iter_mut().enumerate() {
            let v = (i as f64 * 12.9898 + 78.233).sin() * 43_758.545_3;
            *slot = (v - v.floor()) * 2.0 - 1.0;
        }
        Self { table }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> &'static NoiseField {
        &SHARED
    }

    /// Sample noise at `(x, y)` for `seed`, blending `octaves` layers
    /// (at least one). The result is normalized to [-1, 1].
    pub fn sample(&self, x: f64, y: f64, seed: u64, octaves: u32) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total_amplitude = 0.0;
        let mut value = 0.0;

        for octave in 0..octaves.max(1) {
            let offset = octave as f64 * 17.31;
            value += amplitude
                * self.value_noise(
                    x * frequency + offset,
                    y * frequency - offset,
                    seed,
                    octave,
                );
            total_amplitude += amplitude;
            amplitude *= PERSISTENCE;
            frequency *= LACUNARITY;
        }

        value / total_amplitude
    }

    /// Bilinear interpolation of lattice values with a smoothstep fade.
    fn value_noise(&self, x: f64, y: f64, seed: u64, octave: u32) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = fade(x - x0);
        let ty = fade(y - y0);
        let (ix, iy) = (x0 as i64, y0 as i64);

        let v00 = self.lattice(ix, iy, seed, octave);
        let v10 = self.lattice(ix + 1, iy, seed, octave);
        let v01 = self.lattice(ix, iy + 1, seed, octave);
        let v11 = self.lattice(ix + 1, iy + 1, seed, octave);

        let top = lerp(v00, v10, tx);
        let bottom = lerp(v01, v11, tx);
        lerp(top, bottom, ty)
    }

    fn lattice(&self, ix: i64, iy: i64, seed: u64, octave: u32) -> f64 {
        let mut h = (ix as u64).wrapping_mul(0x9E37_79B1)
            ^ (iy as u64).wrapping_mul(0x85EB_CA77)
            ^ seed.wrapping_mul(0xC2B2_AE3D)
            ^ (octave as u64).wrapping_mul(0x27D4_EB2F);
        h ^= h >> 15;
        h = h.wrapping_mul(0x2C1B_3C6D);
        h ^= h >> 12;
        self.table[(h % TABLE_SIZE as u64) as usize]
    }
}

fn fade(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// ============================================================================
// Tests
// ============================================================================
