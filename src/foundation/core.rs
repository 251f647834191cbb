use crate::foundation::error::{KeepsakeError, KeepsakeResult};

pub use kurbo::{Point, Vec2};

/// Milliseconds on the host's monotonic clock.
///
/// The engine never reads a wall clock; the embedder passes `Millis` into
/// every time-sensitive call, which keeps sequencing testable with simulated
/// time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub fn saturating_add(self, delta: Millis) -> Self {
        Millis(self.0.saturating_add(delta.0))
    }

    /// Convert a duration in seconds to `Millis`, rounding to the nearest
    /// millisecond. Non-finite or negative input maps to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Millis(0);
        }
        Millis((secs * 1000.0).round() as u64)
    }
}

/// Rendered dimensions of the display region the gallery draws into.
///
/// Queried from the host layout at gallery entry; `width`/`height` are CSS
/// (logical) pixels and `pixel_ratio` is the device pixel scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Stage {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> KeepsakeResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(KeepsakeError::validation("Stage width must be finite and > 0"));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(KeepsakeError::validation(
                "Stage height must be finite and > 0",
            ));
        }
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(KeepsakeError::validation(
                "Stage pixel_ratio must be finite and > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            pixel_ratio,
        })
    }

    /// Mask buffer width in device pixels.
    pub fn device_width(&self) -> u32 {
        (self.width * self.pixel_ratio).ceil().max(1.0) as u32
    }

    /// Mask buffer height in device pixels.
    pub fn device_height(&self) -> u32 {
        (self.height * self.pixel_ratio).ceil().max(1.0) as u32
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Linear interpolation per channel, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        fn mix(a: u8, b: u8, t: f64) -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        }
        Self {
            r: mix(self.r, other.r, t),
            g: mix(self.g, other.g, t),
            b: mix(self.b, other.b, t),
            a: mix(self.a, other.a, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_rejects_degenerate_dimensions() {
        assert!(Stage::new(0.0, 100.0, 1.0).is_err());
        assert!(Stage::new(100.0, -1.0, 1.0).is_err());
        assert!(Stage::new(100.0, 100.0, 0.0).is_err());
        assert!(Stage::new(f64::NAN, 100.0, 1.0).is_err());
        assert!(Stage::new(320.0, 240.0, 2.0).is_ok());
    }

    #[test]
    fn stage_device_dimensions_scale_and_round_up() {
        let stage = Stage::new(100.5, 50.2, 2.0).unwrap();
        assert_eq!(stage.device_width(), 201);
        assert_eq!(stage.device_height(), 101);
    }

    #[test]
    fn millis_from_secs_handles_non_finite() {
        assert_eq!(Millis::from_secs_f64(1.5), Millis(1500));
        assert_eq!(Millis::from_secs_f64(f64::NAN), Millis(0));
        assert_eq!(Millis::from_secs_f64(-2.0), Millis(0));
    }

    #[test]
    fn rgba_lerp_endpoints() {
        let a = Rgba8::opaque(10, 20, 30);
        let b = Rgba8::opaque(210, 120, 90);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).r, 110);
    }
}
