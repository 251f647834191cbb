//! Deck manifest parsing and validation.

use keepsake::{Card, Deck, MediaKind};

const MANIFEST: &str = r#"[
  { "source": "fav1.mp4", "caption": "first memory", "kind": "video" },
  { "source": "fav2.mp4", "caption": "second memory", "kind": "video" },
  { "source": "fav3.jpeg", "caption": "third memory", "kind": "image" },
  { "source": "fav4.jpeg", "caption": "fourth memory", "kind": "image" },
  { "source": "fav5.mp4", "caption": "fifth memory", "kind": "video" }
]"#;

#[test]
fn manifest_round_trips_in_display_order() {
    let deck = Deck::from_json(MANIFEST).unwrap();
    assert_eq!(deck.len(), 5);
    assert_eq!(deck.card(0).unwrap().source, "fav1.mp4");
    assert_eq!(deck.card(2).unwrap().kind, MediaKind::Image);
    assert_eq!(deck.card(4).unwrap().caption, "fifth memory");
    assert!(deck.is_last(4));

    let json = serde_json::to_string(deck.cards()).unwrap();
    let again = Deck::from_json(&json).unwrap();
    assert_eq!(again, deck);
}

#[test]
fn manifest_rejects_bad_paths_and_empty_decks() {
    assert!(Deck::from_json("[]").is_err());
    assert!(
        Deck::from_json(r#"[{ "source": "/abs.mp4", "caption": "", "kind": "video" }]"#).is_err()
    );
    assert!(
        Deck::from_json(r#"[{ "source": "a/../b.mp4", "caption": "", "kind": "video" }]"#).is_err()
    );
}

#[test]
fn kind_tags_are_lowercase() {
    let json = serde_json::to_string(&Card {
        source: "x.mp4".into(),
        caption: String::new(),
        kind: MediaKind::Video,
    })
    .unwrap();
    assert!(json.contains(r#""kind":"video""#));
}
