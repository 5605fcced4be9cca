//! Text decay. The further a session has fallen, the less of what is said
//! survives the telling.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Words that are the first to go.
pub const ADVERBS: [&str; 5] = ["very", "quite", "rather", "really", "extremely"];

/// Stands in for a vowel that has been lost.
pub const VOWEL_GLYPH: char = '·';

/// All that is left at the end.
pub const SHADOW_GLYPH: char = '█';

pub const FRAGMENT_MARKER: &str = "...";

const VOWELS: &str = "aeiou";

/// The five bands of decay, each covering a half-open range of level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayBand {
    /// `[0, 0.1)`: unchanged.
    Intact,
    /// `[0.1, 0.3)`: adverbs stripped.
    Unadorned,
    /// `[0.3, 0.5)`: vowels lost at random.
    Hollowed,
    /// `[0.5, 0.7)`: every word cut in half.
    Fragmented,
    /// `[0.7, 1.0]`: only shadows.
    Shadowed,
}

impl DecayBand {
    /// Band for a decay level. Levels above 1 stay shadowed; negative or
    /// NaN levels are intact.
    pub fn for_level(level: f64) -> Self {
        if level.is_nan() || level < 0.1 {
            DecayBand::Intact
        } else if level < 0.3 {
            DecayBand::Unadorned
        } else if level < 0.5 {
            DecayBand::Hollowed
        } else if level < 0.7 {
            DecayBand::Fragmented
        } else {
            DecayBand::Shadowed
        }
    }
}

/// Degrade a message at the given level.
///
/// Only the hollowed band consults `rng`, replacing each lowercase vowel
/// with [`VOWEL_GLYPH`] with probability `level`.
pub fn degrade_text<R: Rng + ?Sized>(message: &str, level: f64, rng: &mut R) -> String {
    match DecayBand::for_level(level) {
        DecayBand::Intact => message.to_string(),
        DecayBand::Unadorned => strip_adverbs(message),
        DecayBand::Hollowed => hollow_vowels(message, level, rng),
        DecayBand::Fragmented => fragment_words(message),
        DecayBand::Shadowed => shadow(message),
    }
}

/// Remove whole-word adverbs, leaving the punctuation and line breaks
/// around them in place.
///
/// A removed word takes the spaces after it with it, or the spaces before
/// it when nothing but punctuation follows, so no double spaces are left.
pub fn strip_adverbs(message: &str) -> String {
    let mut stripped = String::with_capacity(message.len());
    let mut cursor = 0;

    for (start, end) in word_spans(message) {
        let word = &message[start..end];
        if !ADVERBS.iter().any(|adverb| word.eq_ignore_ascii_case(adverb)) {
            continue;
        }

        let blank_after: usize = message[end..]
            .chars()
            .take_while(|c| is_blank(*c))
            .map(char::len_utf8)
            .sum();
        let blank_before: usize = message[..start]
            .chars()
            .rev()
            .take_while(|c| is_blank(*c))
            .map(char::len_utf8)
            .sum();

        let (cut_start, cut_end) = if blank_after > 0 {
            (start, end + blank_after)
        } else {
            ((start - blank_before).max(cursor), end)
        };
        stripped.push_str(&message[cursor..cut_start]);
        cursor = cut_end;
    }

    stripped.push_str(&message[cursor..]);
    stripped
}

/// Byte ranges of the words in `text`, as a regex `\w+` would find them.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (index, c) in text.char_indices() {
        let is_word = c.is_alphanumeric() || c == '_';
        match (is_word, start) {
            (true, None) => start = Some(index),
            (false, Some(begin)) => {
                spans.push((begin, index));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(begin) = start {
        spans.push((begin, text.len()));
    }
    spans
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn hollow_vowels<R: Rng + ?Sized>(message: &str, level: f64, rng: &mut R) -> String {
    let probability = level.clamp(0.0, 1.0);
    message
        .chars()
        .map(|c| {
            if VOWELS.contains(c) && rng.gen_bool(probability) {
                VOWEL_GLYPH
            } else {
                c
            }
        })
        .collect()
}

/// Keep the first half of every word, followed by [`FRAGMENT_MARKER`].
pub fn fragment_words(message: &str) -> String {
    message
        .split_whitespace()
        .map(|word| {
            let half = word.chars().count() / 2;
            let mut fragment: String = word.chars().take(half).collect();
            fragment.push_str(FRAGMENT_MARKER);
            fragment
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One [`SHADOW_GLYPH`] for every three characters of the message.
pub fn shadow(message: &str) -> String {
    let length = message.chars().count() / 3;
    std::iter::repeat(SHADOW_GLYPH).take(length).collect()
}
