//! Fixed-token grammar for trace event text.
//!
//! The accepted language is small enough to spell out as a sequence of token
//! matchers over a [`Cursor`]:
//!
//! ```text
//! occupancy   := "Pool=" N ", Ph1=" N ", Ph2=" N ", Ph3=" N ", Ph4=" N
//! interior    := FROM " " "Ph" K " " TO " " "Ph" K+1   (K in 1..=3)
//! pool_entry  := FROM " Ph4 " TO " Pool"
//! N           := one or more ASCII digits (fits in u32)
//! K           := exactly one ASCII digit
//! ```
//!
//! Every production is searched for anywhere in the event text, leftmost
//! occurrence first. Text before and after a match is ignored.

use serde::{Deserialize, Serialize};

use crate::types::PhaseId;

/// Words that classify event lines and introduce move endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Substring marking an arrival event.
    pub arrival_marker: String,
    /// Substring marking a movement event.
    pub movement_marker: String,
    /// Word preceding the source location of a move.
    pub from_word: String,
    /// Word preceding the destination location of a move.
    pub to_word: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            arrival_marker: "arrivo".to_string(),
            movement_marker: "movimento".to_string(),
            from_word: "da".to_string(),
            to_word: "a".to_string(),
        }
    }
}

/// Occupancy counters read from an arrival event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub pool: u32,
    pub phases: [u32; 4],
}

/// Forward-only reader over a string slice.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    const fn new(rest: &'a str) -> Self {
        Self { rest }
    }

    fn literal(&mut self, lit: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(lit)?;
        Some(())
    }

    fn number(&mut self) -> Option<u32> {
        let len = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        if len == 0 {
            return None;
        }
        let (digits, rest) = self.rest.split_at(len);
        let value = digits.parse().ok()?;
        self.rest = rest;
        Some(value)
    }

    fn digit(&mut self) -> Option<u32> {
        let mut chars = self.rest.chars();
        let value = chars.next()?.to_digit(10)?;
        self.rest = chars.as_str();
        Some(value)
    }

    /// `"Ph" D`, yielding the phase number.
    fn phase_number(&mut self) -> Option<u32> {
        self.literal("Ph")?;
        self.digit()
    }
}

/// Runs `matcher` at each occurrence of `anchor` in `text`, returning the
/// first success.
fn search<T>(text: &str, anchor: &str, matcher: impl Fn(Cursor<'_>) -> Option<T>) -> Option<T> {
    text.match_indices(anchor)
        .find_map(|(pos, _)| matcher(Cursor::new(&text[pos..])))
}

/// Finds `Pool=N, Ph1=N, Ph2=N, Ph3=N, Ph4=N` in `text`.
///
/// All five fields must be present and well-formed; partial matches yield
/// `None`.
pub fn match_occupancy(text: &str) -> Option<Occupancy> {
    search(text, "Pool=", |mut cur| {
        cur.literal("Pool=")?;
        let pool = cur.number()?;
        let mut phases = [0; 4];
        for (slot, label) in phases.iter_mut().zip([", Ph1=", ", Ph2=", ", Ph3=", ", Ph4="]) {
            cur.literal(label)?;
            *slot = cur.number()?;
        }
        Some(Occupancy { pool, phases })
    })
}

/// Move tokens derived from a [`Vocabulary`], built once per extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePatterns {
    /// `FROM ` opening an interior move.
    anchor: String,
    /// ` TO ` between the two phases.
    separator: String,
    /// `FROM Ph4 TO Pool`.
    pool_entry: String,
}

impl MovePatterns {
    pub fn new(vocab: &Vocabulary) -> Self {
        Self {
            anchor: format!("{} ", vocab.from_word),
            separator: format!(" {} ", vocab.to_word),
            pool_entry: format!("{} Ph4 {} Pool", vocab.from_word, vocab.to_word),
        }
    }

    /// Finds the first `FROM PhK TO PhK+1` in `text`.
    ///
    /// Occurrences naming unknown or non-adjacent phases do not match, so the
    /// search carries on past them.
    pub fn interior(&self, text: &str) -> Option<(PhaseId, PhaseId)> {
        search(text, &self.anchor, |mut cur| {
            cur.literal(&self.anchor)?;
            let from = PhaseId::from_number(cur.phase_number()?)?;
            cur.literal(&self.separator)?;
            let to = PhaseId::from_number(cur.phase_number()?)?;
            (from.successor() == Some(to)).then_some((from, to))
        })
    }

    /// Whether `text` contains `FROM Ph4 TO Pool`.
    pub fn pool_entry(&self, text: &str) -> bool {
        text.contains(&self.pool_entry)
    }
}
