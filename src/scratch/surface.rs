//! The scratch surface: an opaque decorative overlay the user erases by
//! dragging, exposing the card media underneath.

use crate::{
    foundation::core::{Point, Rgba8, Stage},
    fx::spark::{Spark, SparkEmitter},
    scratch::mask::Mask,
};

/// Minimum brush radius in CSS pixels.
pub const BRUSH_MIN_RADIUS: f64 = 42.0;

/// Brush radius as a fraction of stage width.
pub const BRUSH_WIDTH_FRACTION: f64 = 0.1;

/// A reveal ratio is produced on every Nth pointer-move (and on every
/// pointer-up), bounding sampling cost.
const SAMPLE_EVERY_MOVES: u32 = 2;

/// Brush radius policy: proportional to stage width with a fixed minimum,
/// tuned so one fingertip-width drag uncovers media in a handful of strokes.
pub fn brush_radius(stage_width: f64) -> f64 {
    (stage_width * BRUSH_WIDTH_FRACTION).max(BRUSH_MIN_RADIUS)
}

/// Decorative look of the unscratched overlay: a three-stop diagonal
/// gradient plus a static label the embedder letters on top.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySkin {
    pub stops: [Rgba8; 3],
    pub label: String,
}

impl Default for OverlaySkin {
    fn default() -> Self {
        Self {
            stops: [
                Rgba8::opaque(0xff, 0xd5, 0xeb),
                Rgba8::opaque(0xff, 0x9a, 0xc6),
                Rgba8::opaque(0xff, 0xb6, 0x89),
            ],
            label: "Scratch me".to_string(),
        }
    }
}

/// What one pointer event produced: possibly a sampled reveal ratio
/// (throttled) and possibly a cosmetic spark.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeOutcome {
    pub sampled: Option<f64>,
    pub spark: Option<Spark>,
}

/// Paintable opacity mask over the current card's media.
///
/// Tracks a single (primary) pointer; simultaneous touch points are not
/// supported. Input can be disabled once the card is revealed.
pub struct ScratchSurface {
    mask: Mask,
    skin: OverlaySkin,
    brush_radius: f64,
    enabled: bool,
    drawing: bool,
    last_point: Option<Point>,
    moves: u32,
    stroked_since_down: bool,
    sparks: SparkEmitter,
}

impl ScratchSurface {
    /// Build a surface for the card currently entering the stage. The mask
    /// buffer is sized from the stage's current rendered dimensions.
    pub fn new(stage: &Stage, skin: OverlaySkin, seed: u64) -> Self {
        Self {
            mask: Mask::new(stage),
            skin,
            brush_radius: brush_radius(stage.width),
            enabled: true,
            drawing: false,
            last_point: None,
            moves: 0,
            stroked_since_down: false,
            sparks: SparkEmitter::new(seed),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disable further input (the card has been revealed).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drawing = false;
            self.last_point = None;
        }
    }

    pub fn brush_radius(&self) -> f64 {
        self.brush_radius
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn skin(&self) -> &OverlaySkin {
        &self.skin
    }

    pub fn erased_ratio(&self) -> f64 {
        self.mask.erased_ratio()
    }

    /// Begin a fresh stroke: a lone disc, no connecting line.
    pub fn pointer_down(&mut self, p: Point) -> StrokeOutcome {
        if !self.enabled {
            return StrokeOutcome::default();
        }
        self.drawing = true;
        self.last_point = None;
        self.stroked_since_down = false;
        let spark = self.stroke(p);
        StrokeOutcome {
            sampled: None,
            spark,
        }
    }

    /// Continue the stroke. Erases a capsule from the previous point so fast
    /// drags leave no gaps; every 2nd move also samples the reveal ratio.
    pub fn pointer_move(&mut self, p: Point) -> StrokeOutcome {
        if !self.enabled || !self.drawing {
            return StrokeOutcome::default();
        }
        let spark = self.stroke(p);
        self.moves += 1;
        let sampled = if self.moves % SAMPLE_EVERY_MOVES == 0 {
            Some(self.mask.erased_ratio())
        } else {
            None
        };
        StrokeOutcome { sampled, spark }
    }

    /// End the stroke. The mask is left as-is; a final ratio is sampled if
    /// the pointer actually painted since going down.
    pub fn pointer_up(&mut self) -> StrokeOutcome {
        if !self.enabled || !self.drawing {
            return StrokeOutcome::default();
        }
        self.drawing = false;
        self.last_point = None;
        let sampled = if self.stroked_since_down {
            Some(self.mask.erased_ratio())
        } else {
            None
        };
        self.stroked_since_down = false;
        StrokeOutcome {
            sampled,
            spark: None,
        }
    }

    fn stroke(&mut self, p: Point) -> Option<Spark> {
        match self.last_point {
            None => self.mask.erase_disc(p, self.brush_radius),
            Some(prev) => self.mask.erase_capsule(prev, p, self.brush_radius),
        }
        self.last_point = Some(p);
        self.stroked_since_down = true;
        Some(self.sparks.emit(p))
    }

    /// Render the overlay as straight-alpha RGBA8 (row-major, device pixels):
    /// the skin gradient modulated by the mask's remaining alpha. Provided so
    /// a software embedder can blit without reimplementing the gradient.
    pub fn render_overlay(&self) -> Vec<u8> {
        let w = self.mask.width() as usize;
        let h = self.mask.height() as usize;
        let alpha = self.mask.alpha();
        let mut out = vec![0u8; w * h * 4];

        let span = (w + h).saturating_sub(2).max(1) as f64;
        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let t = (x + y) as f64 / span;
                let color = if t < 0.5 {
                    self.skin.stops[0].lerp(self.skin.stops[1], t * 2.0)
                } else {
                    self.skin.stops[1].lerp(self.skin.stops[2], (t - 0.5) * 2.0)
                };
                let o = i * 4;
                out[o] = color.r;
                out[o + 1] = color.g;
                out[o + 2] = color.b;
                out[o + 3] = alpha[i];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Stage;

    fn surface(w: f64, h: f64) -> ScratchSurface {
        let stage = Stage::new(w, h, 1.0).unwrap();
        ScratchSurface::new(&stage, OverlaySkin::default(), 1)
    }

    #[test]
    fn brush_radius_has_floor_and_width_fraction() {
        assert_eq!(brush_radius(300.0), 42.0);
        assert_eq!(brush_radius(1000.0), 100.0);
    }

    #[test]
    fn down_starts_fresh_stroke_without_sampling() {
        let mut s = surface(200.0, 200.0);
        let out = s.pointer_down(Point::new(100.0, 100.0));
        assert!(out.sampled.is_none());
        assert!(out.spark.is_some());
        assert_eq!(s.mask().alpha_at(100, 100), Some(0));
    }

    #[test]
    fn moves_sample_every_second_event() {
        let mut s = surface(400.0, 300.0);
        s.pointer_down(Point::new(50.0, 50.0));
        let first = s.pointer_move(Point::new(90.0, 50.0));
        assert!(first.sampled.is_none());
        let second = s.pointer_move(Point::new(130.0, 50.0));
        assert!(second.sampled.is_some());
    }

    #[test]
    fn up_samples_once_then_next_up_is_inert() {
        let mut s = surface(400.0, 300.0);
        s.pointer_down(Point::new(50.0, 50.0));
        assert!(s.pointer_up().sampled.is_some());
        assert_eq!(s.pointer_up(), StrokeOutcome::default());
    }

    #[test]
    fn moves_without_down_do_nothing() {
        let mut s = surface(400.0, 300.0);
        assert_eq!(s.pointer_move(Point::new(10.0, 10.0)), StrokeOutcome::default());
        assert_eq!(s.erased_ratio(), 0.0);
    }

    #[test]
    fn disabled_surface_ignores_input() {
        let mut s = surface(400.0, 300.0);
        s.set_enabled(false);
        assert_eq!(s.pointer_down(Point::new(10.0, 10.0)), StrokeOutcome::default());
        assert_eq!(s.erased_ratio(), 0.0);
    }

    #[test]
    fn overlay_alpha_follows_mask() {
        let mut s = surface(64.0, 64.0);
        s.pointer_down(Point::new(32.0, 32.0));
        let rgba = s.render_overlay();
        let w = s.mask().width() as usize;
        let center = (32 * w + 32) * 4;
        assert_eq!(rgba[center + 3], 0);
        assert_eq!(rgba[3], 255); // far corner untouched
    }
}
