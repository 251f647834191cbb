//! The `Gallery` façade the Scene Host talks to.
//!
//! One value owns the whole gallery visit: deck, live scratch surface,
//! sequencer, and timer queue. The host feeds pointer/tick/media events in
//! and executes the [`Signal`]s that come out; no state lives anywhere else.

use crate::{
    foundation::core::{Millis, Point, Stage},
    foundation::error::KeepsakeResult,
    fx::spark::Spark,
    gallery::model::{Deck, MediaKind},
    scratch::surface::{OverlaySkin, ScratchSurface, StrokeOutcome},
    sequencer::reveal::{Effect, Phase, Sequencer},
    sequencer::timer::TimerQueue,
};

/// What the embedder must do (or may render) in response to an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// Display card `index` under a fresh opaque mask; `fade_in` when the
    /// card replaces a faded-out predecessor.
    CardShown { index: usize, fade_in: bool },
    /// Stop forwarding pointer events for the current card (also enforced
    /// internally; this is for cursor/hit-testing affordances).
    ScratchDisabled,
    /// Begin media playback for card `index`. When `unmuted` is true and the
    /// platform refuses, report back via `Gallery::playback_blocked`.
    MediaStarted { index: usize, unmuted: bool },
    /// Fade the card out over `duration`.
    FadeStarted { index: usize, duration: Millis },
    /// Cosmetic scratch particle; safe to ignore.
    Spark(Spark),
    /// The gallery finished; the Scene Host may advance. Raised exactly once
    /// per visit.
    Completed,
}

/// A scratch-card gallery visit, headless and event-driven.
pub struct Gallery {
    deck: Deck,
    sequencer: Sequencer,
    timers: TimerQueue,
    surface: Option<ScratchSurface>,
    stage: Option<Stage>,
    durations: Vec<Option<f64>>,
    skin: OverlaySkin,
    seed: u64,
}

impl Gallery {
    pub fn new(deck: Deck) -> KeepsakeResult<Self> {
        let sequencer = Sequencer::new(deck.len())?;
        let durations = vec![None; deck.len()];
        Ok(Self {
            deck,
            sequencer,
            timers: TimerQueue::new(),
            surface: None,
            stage: None,
            durations,
            skin: OverlaySkin::default(),
            seed: 0,
        })
    }

    /// Replace the default overlay skin.
    pub fn with_skin(mut self, skin: OverlaySkin) -> Self {
        self.skin = skin;
        self
    }

    /// Seed for the cosmetic spark stream (per-card offset applied).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn surface(&self) -> Option<&ScratchSurface> {
        self.surface.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.sequencer.phase() == Phase::Complete
    }

    /// Enter (or re-enter) the gallery scene. Synchronously cancels every
    /// outstanding timer and pending media wait from a previous visit, then
    /// shows card 0 behind a fresh mask sized to the stage's current
    /// rendered dimensions.
    #[tracing::instrument(skip(self))]
    pub fn enter(&mut self, stage: Stage, now: Millis) -> Vec<Signal> {
        self.timers.clear();
        self.stage = Some(stage);
        let effects = self.sequencer.reset();
        self.run_effects(effects, now)
    }

    pub fn pointer_down(&mut self, p: Point, now: Millis) -> Vec<Signal> {
        let outcome = match self.surface.as_mut() {
            Some(surface) => surface.pointer_down(p),
            None => return Vec::new(),
        };
        self.handle_outcome(outcome, now)
    }

    pub fn pointer_move(&mut self, p: Point, now: Millis) -> Vec<Signal> {
        let outcome = match self.surface.as_mut() {
            Some(surface) => surface.pointer_move(p),
            None => return Vec::new(),
        };
        self.handle_outcome(outcome, now)
    }

    pub fn pointer_up(&mut self, now: Millis) -> Vec<Signal> {
        let outcome = match self.surface.as_mut() {
            Some(surface) => surface.pointer_up(),
            None => return Vec::new(),
        };
        self.handle_outcome(outcome, now)
    }

    /// Advance simulated/host time; fires any due dwell or fade timers.
    pub fn advance_time(&mut self, now: Millis) -> Vec<Signal> {
        let mut signals = Vec::new();
        for token in self.timers.advance(now) {
            let effects = self.sequencer.timer_fired(token);
            signals.extend(self.run_effects(effects, now));
        }
        signals
    }

    /// The current card's video reached its natural end.
    pub fn media_ended(&mut self, now: Millis) -> Vec<Signal> {
        let effects = self.sequencer.media_ended();
        self.run_effects(effects, now)
    }

    /// Record a media duration hint (seconds) reported by the embedder's
    /// player. Non-finite values are kept as-is; the hold policy treats them
    /// as unknown. Out-of-range indices are ignored.
    pub fn media_duration(&mut self, index: usize, secs: f64) {
        if let Some(slot) = self.durations.get_mut(index) {
            *slot = Some(secs);
        }
    }

    /// The platform refused unmuted playback for the current card; degrade
    /// to a muted retry. Never fatal, never blocks the reveal sequence.
    pub fn playback_blocked(&mut self) -> Vec<Signal> {
        let index = self.sequencer.current_index();
        let is_video = self
            .deck
            .card(index)
            .is_some_and(|c| c.kind == MediaKind::Video);
        if self.sequencer.phase() == Phase::Holding && is_video {
            tracing::debug!(index, "unmuted playback blocked, retrying muted");
            vec![Signal::MediaStarted {
                index,
                unmuted: false,
            }]
        } else {
            Vec::new()
        }
    }

    fn handle_outcome(&mut self, outcome: StrokeOutcome, now: Millis) -> Vec<Signal> {
        let mut signals = Vec::new();
        if let Some(spark) = outcome.spark {
            signals.push(Signal::Spark(spark));
        }
        if let Some(ratio) = outcome.sampled
            && self.sequencer.accepts_input()
        {
            let index = self.sequencer.current_index();
            if let Some(card) = self.deck.card(index) {
                let duration = self.durations[index];
                let effects = self.sequencer.sampled(ratio, card.kind, duration);
                signals.extend(self.run_effects(effects, now));
            }
        }
        signals
    }

    fn run_effects(&mut self, effects: Vec<Effect>, now: Millis) -> Vec<Signal> {
        let mut signals = Vec::new();
        for effect in effects {
            match effect {
                Effect::ShowCard { index, fade_in } => {
                    let Some(stage) = self.stage else { continue };
                    let seed = self.seed.wrapping_add(index as u64);
                    self.surface = Some(ScratchSurface::new(&stage, self.skin.clone(), seed));
                    signals.push(Signal::CardShown { index, fade_in });
                }
                Effect::DisableScratch => {
                    if let Some(surface) = self.surface.as_mut() {
                        surface.set_enabled(false);
                    }
                    signals.push(Signal::ScratchDisabled);
                }
                Effect::PlayMedia { index, unmuted } => {
                    signals.push(Signal::MediaStarted { index, unmuted });
                }
                Effect::Schedule { token, delay } => {
                    self.timers.schedule(token, now.saturating_add(delay));
                }
                Effect::Cancel { token } => {
                    self.timers.cancel(token);
                }
                Effect::BeginFade { index, duration } => {
                    signals.push(Signal::FadeStarted { index, duration });
                }
                Effect::Complete => {
                    signals.push(Signal::Completed);
                }
            }
        }
        signals
    }
}
