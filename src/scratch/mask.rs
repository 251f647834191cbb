//! The erasable opacity layer drawn over a card's media.
//!
//! The mask is an alpha-only buffer in device pixels, created fully opaque
//! when a card is displayed and discarded when the card is replaced.
//! Erasure only ever lowers alpha, so measured coverage is monotone within a
//! card's lifetime.

use crate::foundation::core::{Point, Stage};

/// Pixel stride used by [`Mask::erased_ratio`]. Sampling a subset of pixels
/// is an accepted accuracy/performance trade-off.
pub const SAMPLE_STRIDE: usize = 32;

/// Alpha strictly below this counts as erased. Near-zero rather than
/// exactly-zero, to tolerate the soft (anti-aliased) brush edge.
pub const ALPHA_ERASED: u8 = 20;

/// Per-card opacity buffer sized to the stage in device pixels.
pub struct Mask {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    alpha: Vec<u8>,
}

impl Mask {
    /// Allocate a fully opaque mask matching the stage's rendered size.
    /// Dimensions are recomputed per card; masks are never reused across
    /// stage sizes.
    pub fn new(stage: &Stage) -> Self {
        let width = stage.device_width();
        let height = stage.device_height();
        Self {
            width,
            height,
            pixel_ratio: stage.pixel_ratio,
            alpha: vec![255; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Alpha at a device-pixel coordinate, or `None` out of bounds.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.alpha[y as usize * self.width as usize + x as usize])
    }

    /// Erase a filled disc centered at `center` (stage/CSS coordinates) with
    /// `radius` in CSS pixels.
    pub fn erase_disc(&mut self, center: Point, radius: f64) {
        let pr = self.pixel_ratio;
        let c = Point::new(center.x * pr, center.y * pr);
        let r = radius * pr;
        self.erase_where(c, c, r);
    }

    /// Erase a capsule (thick line with round caps) between `a` and `b` in
    /// stage coordinates, so fast drags leave no gaps between samples.
    pub fn erase_capsule(&mut self, a: Point, b: Point, radius: f64) {
        let pr = self.pixel_ratio;
        self.erase_where(
            Point::new(a.x * pr, a.y * pr),
            Point::new(b.x * pr, b.y * pr),
            radius * pr,
        );
    }

    // Shared rasterizer: erases every pixel within `r` of segment [a, b]
    // (a == b degenerates to a disc), with a one-pixel soft edge. Erasure is
    // min(old, new) so alpha never increases.
    fn erase_where(&mut self, a: Point, b: Point, r: f64) {
        if r <= 0.0 || self.alpha.is_empty() {
            return;
        }

        let pad = r + 1.0;
        let x0 = (a.x.min(b.x) - pad).floor().max(0.0) as u32;
        let y0 = (a.y.min(b.y) - pad).floor().max(0.0) as u32;
        let x1 = ((a.x.max(b.x) + pad).ceil() as u32).min(self.width);
        let y1 = ((a.y.max(b.y) + pad).ceil() as u32).min(self.height);

        let seg = b - a;
        let seg_len2 = seg.hypot2();

        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let d = if seg_len2 == 0.0 {
                    p.distance(a)
                } else {
                    let t = ((p - a).dot(seg) / seg_len2).clamp(0.0, 1.0);
                    p.distance(a + seg * t)
                };

                let new = if d <= r - 0.5 {
                    0u8
                } else if d < r + 0.5 {
                    // Soft edge: coverage ramps over one device pixel.
                    ((d - (r - 0.5)).clamp(0.0, 1.0) * 255.0) as u8
                } else {
                    continue;
                };

                let px = &mut self.alpha[row + x as usize];
                *px = (*px).min(new);
            }
        }
    }

    /// Fraction of sampled pixels whose alpha is below [`ALPHA_ERASED`],
    /// sampling every [`SAMPLE_STRIDE`]th pixel. Empty sample set yields 0.0.
    pub fn erased_ratio(&self) -> f64 {
        let mut sampled = 0usize;
        let mut erased = 0usize;
        for &a in self.alpha.iter().step_by(SAMPLE_STRIDE) {
            sampled += 1;
            if a < ALPHA_ERASED {
                erased += 1;
            }
        }
        if sampled == 0 {
            return 0.0;
        }
        erased as f64 / sampled as f64
    }
}
