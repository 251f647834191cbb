//! Keepsake is a headless scratch-card reveal engine.
//!
//! A "deck" of cards (image or video media plus a caption) is shown one card
//! at a time behind an opaque, erasable mask. The embedder feeds pointer
//! events in; the engine erodes the mask, samples how much has been erased,
//! and decides when a card counts as revealed and what happens next
//! (play the media, hold, fade, advance, complete).
//!
//! # Pipeline overview
//!
//! 1. **Erode**: pointer events -> [`ScratchSurface`] (disc/capsule mask erasure)
//! 2. **Sample**: strided alpha sampling -> reveal ratio in `[0, 1]`
//! 3. **Decide**: [`Sequencer`] phase machine -> explicit effect list
//! 4. **Execute**: [`Gallery`] maps effects onto host signals and a
//!    deterministic timer queue
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Headless and deterministic**: no rendering, windowing, or media
//!   playback happens here; the embedder executes [`Signal`]s. All timing is
//!   simulated-time friendly ([`Millis`] + [`TimerQueue`]), so sequencing is
//!   testable without an event loop.
//! - **No IO in the engine**: media IO is front-loaded in [`preflight_deck`],
//!   and runtime media failures degrade to fallbacks, never errors.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod fx;
mod gallery;
mod scratch;
mod sequencer;

pub use assets::probe::{PreloadReport, ProbedMedia, normalize_rel_path, preflight_deck};
pub use foundation::core::{Millis, Point, Rgba8, Stage, Vec2};
pub use foundation::error::{KeepsakeError, KeepsakeResult};
pub use fx::spark::{Spark, SparkEmitter};
pub use gallery::host::{Gallery, Signal};
pub use gallery::model::{Card, Deck, MediaKind};
pub use scratch::mask::{ALPHA_ERASED, Mask, SAMPLE_STRIDE};
pub use scratch::surface::{
    BRUSH_MIN_RADIUS, BRUSH_WIDTH_FRACTION, OverlaySkin, ScratchSurface, StrokeOutcome,
    brush_radius,
};
pub use sequencer::reveal::{
    CROSSFADE_MS, Effect, IMAGE_HOLD_LAST_MS, IMAGE_HOLD_MS, Phase, REVEAL_THRESHOLD, Sequencer,
    VIDEO_FALLBACK_LAST_MS, VIDEO_FALLBACK_MS, hold_duration,
};
pub use sequencer::timer::{TimerQueue, TimerToken};
