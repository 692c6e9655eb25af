//! Deck partitions and the frame-category classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Frame categories whose cards live in the Extra Deck.
const EXTRA_DECK_FRAMES: [&str; 4] = ["fusion", "synchro", "xyz", "link"];

/// The two disjoint zones of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// Main Deck.
    Main,
    /// Extra Deck.
    Extra,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("Main Deck"),
            Self::Extra => f.write_str("Extra Deck"),
        }
    }
}

/// Map a card's frame category to the partition it must be placed in.
///
/// # Examples
/// ```
/// use deck_engine::domain::{Partition, classify};
///
/// assert_eq!(classify("Synchro"), Partition::Extra);
/// assert_eq!(classify("effect"), Partition::Main);
/// ```
pub fn classify(frame_category: &str) -> Partition {
    let frame = frame_category.trim();
    if EXTRA_DECK_FRAMES
        .iter()
        .any(|extra| extra.eq_ignore_ascii_case(frame))
    {
        Partition::Extra
    } else {
        Partition::Main
    }
}
