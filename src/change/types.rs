use serde::{Deserialize, Serialize};

/// What happened to an element, written as a one-character symbol.
///
/// `OldExhausted` and `NewExhausted` only show up in raw traversal output;
/// a patchset built for patching never contains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Action {
    /// `+`
    Insert,
    /// `-`
    Delete,
    /// `!`
    Replace,
    /// `=`
    Unchanged,
    /// `>`: the old sequence ran out while the new one still has elements
    OldExhausted,
    /// `<`: the new sequence ran out while the old one still has elements
    NewExhausted,
}

/// A change described from both sides: the position and element in the old
/// sequence and the position and element in the new one.
///
/// This is the event the traversers hand to their callbacks (borrowing the
/// elements, `ContextChange<&T>`) and the record `sdiff` produces. An element
/// is `None` when its position lies past the end of its sequence or when
/// [`simplify`](ContextChange::simplify) dropped the side that does not
/// matter for the action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextChange<T> {
    pub action: Action,
    pub old_position: usize,
    pub old_element: Option<T>,
    pub new_position: usize,
    pub new_element: Option<T>,
}

/// One record of a patchset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Change<T> {
    /// A single-sided change: for `-` the position is in the old sequence,
    /// for `+` it is in the new one.
    Simple {
        action: Action,
        position: usize,
        element: T,
    },
    /// A change that knows both sides.
    Contextual(ContextChange<T>),
}

/// A run of related changes. `diff` groups its output into hunks.
pub type Hunk<T> = Vec<Change<T>>;
