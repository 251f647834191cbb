use crate::{
    assets::probe::normalize_rel_path,
    foundation::error::{KeepsakeError, KeepsakeResult},
};

/// What kind of media a card shows.
///
/// The kind decides reveal behavior: videos play with sound once revealed and
/// hold until playback ends (or a duration fallback); images hold for a fixed
/// dwell time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One unit of gallery content: a media reference plus a caption.
///
/// Cards are immutable, defined at startup; insertion order is display order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Card {
    /// Media path, relative to the asset root.
    pub source: String,
    /// Caption shown alongside the card.
    pub caption: String,
    /// Media kind.
    pub kind: MediaKind,
}

/// Ordered, validated card list for one gallery visit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck, validating that it is non-empty and every card source is
    /// a normalizable relative path.
    pub fn new(cards: Vec<Card>) -> KeepsakeResult<Self> {
        if cards.is_empty() {
            return Err(KeepsakeError::validation("deck must contain at least one card"));
        }
        for card in &cards {
            normalize_rel_path(&card.source)?;
        }
        Ok(Self { cards })
    }

    /// Parse a deck from a JSON manifest (an array of cards).
    pub fn from_json(json: &str) -> KeepsakeResult<Self> {
        let cards: Vec<Card> = serde_json::from_str(json)
            .map_err(|e| KeepsakeError::serde(format!("deck manifest: {e}")))?;
        Self::new(cards)
    }

    /// Read and parse a deck manifest from disk.
    pub fn from_json_file(path: &std::path::Path) -> KeepsakeResult<Self> {
        use anyhow::Context;
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read deck manifest {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    // Decks are never empty (enforced by `new`), but the conventional pair
    // keeps clippy and callers happy.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.cards.len()
    }
}
