mod types;
pub use types::*;

use std::fmt;

use crate::error::PatchError;

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Insert,
        Action::Delete,
        Action::Replace,
        Action::Unchanged,
        Action::OldExhausted,
        Action::NewExhausted,
    ];

    pub fn symbol(self) -> char {
        match self {
            Action::Insert => '+',
            Action::Delete => '-',
            Action::Replace => '!',
            Action::Unchanged => '=',
            Action::OldExhausted => '>',
            Action::NewExhausted => '<',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Action::ALL.into_iter().find(|a| a.symbol() == symbol)
    }

    /// `>` and `<` are emitted by the sequential traverser only.
    pub fn is_sentinel(self) -> bool {
        matches!(self, Action::OldExhausted | Action::NewExhausted)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl From<Action> for char {
    fn from(action: Action) -> char {
        action.symbol()
    }
}

impl TryFrom<char> for Action {
    type Error = PatchError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Action::from_symbol(symbol).ok_or_else(|| PatchError::InvalidAction(symbol.to_string()))
    }
}

impl<T> ContextChange<T> {
    pub fn new(
        action: Action,
        old_position: usize,
        old_element: Option<T>,
        new_position: usize,
        new_element: Option<T>,
    ) -> Self {
        ContextChange {
            action,
            old_position,
            old_element,
            new_position,
            new_element,
        }
    }

    /// Keeps only the side that matters for the action, and turns the
    /// sentinels into the plain change they stand for: `<` becomes `-`
    /// and `>` becomes `+`.
    pub fn simplify(mut self) -> Self {
        match self.action {
            Action::Delete => self.new_element = None,
            Action::NewExhausted => {
                self.action = Action::Delete;
                self.new_element = None;
            }
            Action::Insert => self.old_element = None,
            Action::OldExhausted => {
                self.action = Action::Insert;
                self.old_element = None;
            }
            Action::Replace | Action::Unchanged => {}
        }
        self
    }

    pub fn is_adding(&self) -> bool {
        self.action == Action::Insert
    }

    pub fn is_deleting(&self) -> bool {
        self.action == Action::Delete
    }

    pub fn is_unchanged(&self) -> bool {
        self.action == Action::Unchanged
    }

    pub fn is_changed(&self) -> bool {
        self.action == Action::Replace
    }

    pub fn is_finished_a(&self) -> bool {
        self.action == Action::OldExhausted
    }

    pub fn is_finished_b(&self) -> bool {
        self.action == Action::NewExhausted
    }
}

impl<T: Clone> ContextChange<&T> {
    /// Detaches an event from the sequences it borrows from.
    pub fn cloned(&self) -> ContextChange<T> {
        ContextChange {
            action: self.action,
            old_position: self.old_position,
            old_element: self.old_element.cloned(),
            new_position: self.new_position,
            new_element: self.new_element.cloned(),
        }
    }
}

impl<T> Change<T> {
    pub fn simple(action: Action, position: usize, element: T) -> Self {
        Change::Simple {
            action,
            position,
            element,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Change::Simple { action, .. } => *action,
            Change::Contextual(c) => c.action,
        }
    }

    pub fn is_adding(&self) -> bool {
        self.action() == Action::Insert
    }

    pub fn is_deleting(&self) -> bool {
        self.action() == Action::Delete
    }

    pub fn is_unchanged(&self) -> bool {
        self.action() == Action::Unchanged
    }

    pub fn is_changed(&self) -> bool {
        self.action() == Action::Replace
    }

    pub fn is_finished_a(&self) -> bool {
        self.action() == Action::OldExhausted
    }

    pub fn is_finished_b(&self) -> bool {
        self.action() == Action::NewExhausted
    }
}

impl<T> From<ContextChange<T>> for Change<T> {
    fn from(change: ContextChange<T>) -> Self {
        Change::Contextual(change)
    }
}
