//! The reveal sequencer: decides when a card counts as revealed and drives
//! the hold/fade/advance flow.
//!
//! Every transition is a discrete event in, explicit effect list out. The
//! sequencer owns the reveal flags and nothing else; the host executes
//! effects (builds surfaces, schedules timers, signals the Scene Host).

use crate::{
    foundation::core::Millis,
    foundation::error::{KeepsakeError, KeepsakeResult},
    gallery::model::MediaKind,
    sequencer::timer::TimerToken,
};

/// Minimum sampled erased fraction (strict) before a card counts as revealed.
pub const REVEAL_THRESHOLD: f64 = 0.4;

/// Fade-out duration when a card leaves the stage.
pub const CROSSFADE_MS: u64 = 950;

/// Dwell time for a revealed image card.
pub const IMAGE_HOLD_MS: u64 = 4000;

/// Dwell time for the last card when it is an image.
pub const IMAGE_HOLD_LAST_MS: u64 = 6000;

/// Hold fallback for a video of unknown/non-positive duration.
pub const VIDEO_FALLBACK_MS: u64 = 6200;

/// Hold fallback for the last card when it is a video.
pub const VIDEO_FALLBACK_LAST_MS: u64 = 6000;

/// Longest actual video duration still granted a natural-end hold.
pub const VIDEO_HOLD_CAP_MS: u64 = 7000;

/// As [`VIDEO_HOLD_CAP_MS`], for the last card.
pub const VIDEO_HOLD_CAP_LAST_MS: u64 = 6000;

/// Buffer added past a video's reported duration so natural end wins the
/// race against the hold timer.
pub const VIDEO_END_BUFFER_MS: u64 = 100;

/// Hold duration policy for a revealed card.
///
/// Images dwell for a fixed time. Videos hold for their actual duration plus
/// a small buffer, but an unknown, non-finite, non-positive, or over-cap
/// duration falls back to a fixed hold so one long video cannot stall the
/// whole sequence.
pub fn hold_duration(kind: MediaKind, duration_secs: Option<f64>, is_last: bool) -> Millis {
    match kind {
        MediaKind::Image => Millis(if is_last { IMAGE_HOLD_LAST_MS } else { IMAGE_HOLD_MS }),
        MediaKind::Video => {
            let fallback = if is_last {
                VIDEO_FALLBACK_LAST_MS
            } else {
                VIDEO_FALLBACK_MS
            };
            let Some(secs) = duration_secs else {
                return Millis(fallback);
            };
            if !secs.is_finite() || secs <= 0.0 {
                return Millis(fallback);
            }
            let ms = Millis::from_secs_f64(secs).0;
            let cap = if is_last {
                VIDEO_HOLD_CAP_LAST_MS
            } else {
                VIDEO_HOLD_CAP_MS
            };
            if ms <= cap {
                Millis(ms + VIDEO_END_BUFFER_MS)
            } else {
                Millis(fallback)
            }
        }
    }
}

/// Where the current card is in its reveal lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Accepting strokes; sampling decides when to reveal.
    Scratching,
    /// Media visible at full opacity, waiting out the dwell/duration.
    Holding,
    /// Card fading out before advance or completion.
    Fading,
    /// Terminal for this visit; `Complete` has been emitted.
    Complete,
}

/// Instructions for the host. The sequencer never performs these itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Display card `index` behind a fresh mask.
    ShowCard { index: usize, fade_in: bool },
    /// Stop routing pointer input to the surface.
    DisableScratch,
    /// Start media playback; `unmuted` is requested for video and the host
    /// falls back to muted if the platform refuses.
    PlayMedia { index: usize, unmuted: bool },
    /// Arm `token` to fire after `delay`.
    Schedule { token: TimerToken, delay: Millis },
    /// Disarm a previously scheduled token.
    Cancel { token: TimerToken },
    /// Begin the card's fade-out.
    BeginFade { index: usize, duration: Millis },
    /// The last card's fade finished; the gallery is done for this visit.
    Complete,
}

/// Reveal state machine for one gallery visit.
pub struct Sequencer {
    deck_len: usize,
    index: usize,
    revealed: bool,
    phase: Phase,
    /// The single pending wait (dwell or fade). Timer fires and media-ended
    /// are mutually exclusive completions of this handle; whichever arrives
    /// first takes it, and anything else is stale.
    pending: Option<TimerToken>,
    next_token: u64,
}

impl Sequencer {
    pub fn new(deck_len: usize) -> KeepsakeResult<Self> {
        if deck_len == 0 {
            return Err(KeepsakeError::gallery("sequencer needs at least one card"));
        }
        Ok(Self {
            deck_len,
            index: 0,
            revealed: false,
            phase: Phase::Scratching,
            pending: None,
            next_token: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Strokes are only routed while scratching.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Scratching
    }

    fn mint(&mut self) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        token
    }

    /// Reset for (re-)entering the gallery. Any pending wait is cancelled
    /// before the fresh card state exists, so a stale timer can never
    /// advance the wrong card or double-advance.
    pub fn reset(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(token) = self.pending.take() {
            effects.push(Effect::Cancel { token });
        }
        self.index = 0;
        self.revealed = false;
        self.phase = Phase::Scratching;
        effects.push(Effect::ShowCard {
            index: 0,
            fade_in: false,
        });
        effects
    }

    /// A reveal ratio was sampled for the current card. Crossing the
    /// threshold transitions Scratching -> Holding at most once per card.
    pub fn sampled(
        &mut self,
        ratio: f64,
        kind: MediaKind,
        duration_secs: Option<f64>,
    ) -> Vec<Effect> {
        if self.phase != Phase::Scratching || self.revealed {
            return Vec::new();
        }
        if !ratio.is_finite() || ratio <= REVEAL_THRESHOLD {
            return Vec::new();
        }

        self.revealed = true;
        self.phase = Phase::Holding;
        let token = self.mint();
        self.pending = Some(token);

        let is_last = self.index + 1 == self.deck_len;
        let delay = hold_duration(kind, duration_secs, is_last);
        tracing::debug!(index = self.index, ratio, hold_ms = delay.0, "card revealed");

        vec![
            Effect::DisableScratch,
            Effect::PlayMedia {
                index: self.index,
                unmuted: kind == MediaKind::Video,
            },
            Effect::Schedule { token, delay },
        ]
    }

    /// The current card's video reached its natural end. Only meaningful
    /// while holding; cancels the dwell timer and starts the fade.
    pub fn media_ended(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Holding {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if let Some(token) = self.pending.take() {
            effects.push(Effect::Cancel { token });
        }
        effects.extend(self.begin_fade());
        effects
    }

    /// A timer fired. Stale tokens (anything but the pending one) are
    /// ignored — this is what makes cancellation airtight under re-entry.
    pub fn timer_fired(&mut self, token: TimerToken) -> Vec<Effect> {
        if self.pending != Some(token) {
            return Vec::new();
        }
        self.pending = None;

        match self.phase {
            Phase::Holding => self.begin_fade(),
            Phase::Fading => self.finish_fade(),
            Phase::Scratching | Phase::Complete => Vec::new(),
        }
    }

    fn begin_fade(&mut self) -> Vec<Effect> {
        self.phase = Phase::Fading;
        let token = self.mint();
        self.pending = Some(token);
        vec![
            Effect::BeginFade {
                index: self.index,
                duration: Millis(CROSSFADE_MS),
            },
            Effect::Schedule {
                token,
                delay: Millis(CROSSFADE_MS),
            },
        ]
    }

    fn finish_fade(&mut self) -> Vec<Effect> {
        if self.index + 1 < self.deck_len {
            self.index += 1;
            self.revealed = false;
            self.phase = Phase::Scratching;
            vec![Effect::ShowCard {
                index: self.index,
                fade_in: true,
            }]
        } else {
            self.phase = Phase::Complete;
            tracing::debug!("gallery complete");
            vec![Effect::Complete]
        }
    }
}
