//! Deck preflight: verify card media is loadable before the gallery is
//! entered.
//!
//! Media failure is never fatal here. A card whose media cannot be decoded
//! (or found) is marked [`ProbedMedia::Fallback`] and the embedder paints a
//! decorative fill in its place; the reveal sequence is unaffected.

use std::path::Path;

use crate::{
    foundation::error::{KeepsakeError, KeepsakeResult},
    gallery::model::{Deck, MediaKind},
};

/// Normalize and validate an asset-root-relative media path.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> KeepsakeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(KeepsakeError::validation("media paths must be relative"));
    }
    if s.is_empty() {
        return Err(KeepsakeError::validation("media path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(KeepsakeError::validation("media paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(KeepsakeError::validation("media path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Outcome of probing one card's media.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbedMedia {
    /// Image header decoded; intrinsic pixel dimensions known.
    Image { width: u32, height: u32 },
    /// Video file present. Duration is only known to the embedder's player
    /// and arrives later via `Gallery::media_duration`.
    Video,
    /// Media missing or undecodable; the embedder substitutes a decorative
    /// fill. Not an error.
    Fallback,
}

/// Result of a deck preflight pass, one entry per card in deck order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadReport {
    pub probed: Vec<ProbedMedia>,
}

impl PreloadReport {
    pub fn total(&self) -> usize {
        self.probed.len()
    }

    pub fn fallbacks(&self) -> usize {
        self.probed
            .iter()
            .filter(|p| matches!(p, ProbedMedia::Fallback))
            .count()
    }
}

/// Probe every card in the deck, invoking `progress(loaded, total)` after
/// each card so the embedder can drive a loading indicator.
///
/// Image cards are verified by decoding the file header with the `image`
/// crate; video cards are checked for existence only. Failures degrade to
/// [`ProbedMedia::Fallback`] — this function never errors.
pub fn preflight_deck(
    asset_root: &Path,
    deck: &Deck,
    mut progress: impl FnMut(usize, usize),
) -> PreloadReport {
    let total = deck.len();
    let mut probed = Vec::with_capacity(total);

    for (i, card) in deck.cards().iter().enumerate() {
        let outcome = match normalize_rel_path(&card.source) {
            Err(_) => ProbedMedia::Fallback,
            Ok(rel) => {
                let path = asset_root.join(rel);
                match card.kind {
                    MediaKind::Image => match image::image_dimensions(&path) {
                        Ok((width, height)) => ProbedMedia::Image { width, height },
                        Err(err) => {
                            tracing::debug!(source = %card.source, %err, "image probe failed, using fallback fill");
                            ProbedMedia::Fallback
                        }
                    },
                    MediaKind::Video => {
                        if path.is_file() {
                            ProbedMedia::Video
                        } else {
                            tracing::debug!(source = %card.source, "video missing, using fallback fill");
                            ProbedMedia::Fallback
                        }
                    }
                }
            }
        };
        probed.push(outcome);
        progress(i + 1, total);
    }

    PreloadReport { probed }
}
