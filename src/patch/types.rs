use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::change::{Action, Change};
use crate::error::PatchError;

/// Which way a patchset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The source is the old sequence; produce the new one.
    Patch,
    /// The source is the new sequence; produce the old one.
    Unpatch,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Patch => Direction::Unpatch,
            Direction::Unpatch => Direction::Patch,
        }
    }

    /// The effect `action` has when replayed in this direction: unpatching
    /// swaps inserts and deletes.
    pub fn map(self, action: Action) -> Action {
        match (self, action) {
            (Direction::Unpatch, Action::Insert) => Action::Delete,
            (Direction::Unpatch, Action::Delete) => Action::Insert,
            (_, action) => action,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Patch => write!(f, "patch"),
            Direction::Unpatch => write!(f, "unpatch"),
        }
    }
}

impl FromStr for Direction {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patch" => Ok(Direction::Patch),
            "unpatch" => Ok(Direction::Unpatch),
            _ => Err(PatchError::InvalidDirection(s.to_string())),
        }
    }
}

/// A flattened patchset, ready to be replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<'a, T: Clone> {
    pub changes: Vec<Cow<'a, Change<T>>>,
    /// Whether any record is something other than `=`.
    pub has_changes: bool,
}

/// Agreement between a patchset and a source, for one hypothesis about
/// which side of the patchset the source is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub matched: usize,
    pub missed: usize,
}

impl Tally {
    pub(crate) fn vote(&mut self, agrees: bool) {
        if agrees {
            self.matched += 1;
        } else {
            self.missed += 1;
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.missed == 0
    }
}

/// How well a source fits a patchset as its original (`pre_image`) and as
/// its result (`post_image`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionEvidence {
    pub pre_image: Tally,
    pub post_image: Tally,
}

impl DirectionEvidence {
    /// Picks the only consistent hypothesis, or the consistent one with more
    /// matches when both are.
    pub fn decide(&self) -> Result<Direction, PatchError> {
        match (self.pre_image.is_consistent(), self.post_image.is_consistent()) {
            (true, false) => Ok(Direction::Patch),
            (false, true) => Ok(Direction::Unpatch),
            (true, true) => match self.pre_image.matched.cmp(&self.post_image.matched) {
                std::cmp::Ordering::Greater => Ok(Direction::Patch),
                std::cmp::Ordering::Less => Ok(Direction::Unpatch),
                std::cmp::Ordering::Equal => Err(PatchError::AmbiguousDirection),
            },
            (false, false) => Err(PatchError::NotApplicable),
        }
    }
}
