//! Core type definitions with validation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The metric name is not one of the known summary columns.
    #[error("unknown metric: {value}")]
    UnknownMetric { value: String },
}

/// A location an entity can occupy: one of the four pipeline phases or the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhaseId {
    Ph1,
    Ph2,
    Ph3,
    Ph4,
    Pool,
}

impl PhaseId {
    /// The pipeline phases in canonical order (the pool excluded).
    pub const PHASES: [Self; 4] = [Self::Ph1, Self::Ph2, Self::Ph3, Self::Ph4];

    /// Maps a phase number (`1..=4`) to its phase.
    #[must_use]
    pub const fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::Ph1),
            2 => Some(Self::Ph2),
            3 => Some(Self::Ph3),
            4 => Some(Self::Ph4),
            _ => None,
        }
    }

    /// Position in [`PhaseId::PHASES`], `None` for the pool.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Ph1 => Some(0),
            Self::Ph2 => Some(1),
            Self::Ph3 => Some(2),
            Self::Ph4 => Some(3),
            Self::Pool => None,
        }
    }

    /// The location an entity moves to when it leaves `self`.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Ph1 => Some(Self::Ph2),
            Self::Ph2 => Some(Self::Ph3),
            Self::Ph3 => Some(Self::Ph4),
            Self::Ph4 => Some(Self::Pool),
            Self::Pool => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ph1 => "Ph1",
            Self::Ph2 => "Ph2",
            Self::Ph3 => "Ph3",
            Self::Ph4 => "Ph4",
            Self::Pool => "Pool",
        }
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PhaseId {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ph1" => Ok(Self::Ph1),
            "Ph2" => Ok(Self::Ph2),
            "Ph3" => Ok(Self::Ph3),
            "Ph4" => Ok(Self::Ph4),
            "Pool" => Ok(Self::Pool),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}

impl Serialize for PhaseId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PhaseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown phase strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPhase(String);

impl fmt::Display for UnknownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown phase: {}", self.0)
    }
}

impl std::error::Error for UnknownPhase {}

/// Mode labels recognised in source names, in priority order.
pub const KNOWN_MODES: [&str; 3] = ["default", "custom", "nofuture"];

/// A labeled run variant, used as the join key across comparative views.
///
/// Modes sort with the known modes first (in [`KNOWN_MODES`] order), then any
/// other label alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mode(String);

impl Mode {
    /// Creates a mode after validation.
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.is_empty() {
            return Err(ValidationError::Empty { field: "mode" });
        }
        Ok(Self(label))
    }

    /// Derives the mode from a source identifier such as a file stem.
    ///
    /// The first known mode contained in the lowercased identifier wins;
    /// otherwise the identifier itself is the mode.
    pub fn from_source(source: &str) -> Result<Self, ValidationError> {
        let lower = source.to_lowercase();
        KNOWN_MODES
            .iter()
            .find(|key| lower.contains(*key))
            .map_or_else(|| Self::new(source), |key| Self::new(*key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position in [`KNOWN_MODES`], or `KNOWN_MODES.len()` for other labels.
    pub fn rank(&self) -> usize {
        KNOWN_MODES
            .iter()
            .position(|key| *key == self.0)
            .unwrap_or(KNOWN_MODES.len())
    }
}

impl Ord for Mode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Mode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for Mode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.0
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for Mode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
