//! Cosmetic scratch sparks.
//!
//! Each stroke may emit one short-lived spark at the stroke point. Sparks
//! carry no engine state; an embedder that ignores them loses nothing but
//! glitter.

use crate::foundation::core::{Millis, Point, Vec2};

const SPARK_LIFETIME_MS: u64 = 300;

/// One transient decorative particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spark {
    /// Spawn position in stage (CSS) coordinates.
    pub position: Point,
    /// Diameter in CSS pixels.
    pub size_px: f64,
    /// Total drift over the spark's lifetime.
    pub drift: Vec2,
    /// Lifetime before removal.
    pub lifetime: Millis,
}

/// Deterministic spark generator (xorshift64*), seeded per card so replays
/// of the same stroke sequence produce the same glitter.
#[derive(Clone, Debug)]
pub struct SparkEmitter {
    state: u64,
}

impl SparkEmitter {
    pub fn new(seed: u64) -> Self {
        // A zero state would lock xorshift at zero forever.
        Self {
            state: seed | 1,
        }
    }

    fn next_unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        let bits = x.wrapping_mul(0x2545_f491_4f6c_dd1d);
        (bits >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Emit one spark at `at`: 4..10 px wide, drifting up and slightly
    /// sideways, gone after 300 ms.
    pub fn emit(&mut self, at: Point) -> Spark {
        let size_px = 4.0 + self.next_unit() * 6.0;
        let dx = (self.next_unit() - 0.5) * 30.0;
        let dy = -22.0 - self.next_unit() * 24.0;
        Spark {
            position: at,
            size_px,
            drift: Vec2::new(dx, dy),
            lifetime: Millis(SPARK_LIFETIME_MS),
        }
    }
}
