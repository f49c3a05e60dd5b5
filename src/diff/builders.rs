use std::mem;

use crate::change::{Action, Change, ContextChange, Hunk};
use crate::traverse::{Callbacks, Capabilities};

/// Callbacks that turn a traversal into a result once it is over.
///
/// `finish` consumes the builder, so a trailing hunk can never be left
/// unflushed.
pub trait PatchsetBuilder<T>: Callbacks<T> {
    type Output;

    fn finish(self) -> Self::Output;
}

/// Changes since the last match, and the hunks closed so far.
#[derive(Debug)]
struct HunkGroups<T> {
    current: Hunk<T>,
    hunks: Vec<Hunk<T>>,
}

impl<T> HunkGroups<T> {
    fn new() -> Self {
        HunkGroups {
            current: vec![],
            hunks: vec![],
        }
    }

    fn push(&mut self, change: Change<T>) {
        self.current.push(change);
    }

    fn close(&mut self) {
        if !self.current.is_empty() {
            self.hunks.push(mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<Hunk<T>> {
        self.close();
        self.hunks
    }
}

/// Builds the patchset returned by [`diff`](crate::diff::diff): one hunk of
/// [`Change::Simple`] records per run of discards between two matches.
#[derive(Debug)]
pub struct DiffBuilder<T> {
    groups: HunkGroups<T>,
}

impl<T> DiffBuilder<T> {
    pub fn new() -> Self {
        DiffBuilder {
            groups: HunkGroups::new(),
        }
    }
}

impl<T> Default for DiffBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Callbacks<T> for DiffBuilder<T> {
    fn on_match(&mut self, _event: ContextChange<&T>) {
        self.groups.close();
    }

    fn discard_a(&mut self, event: ContextChange<&T>) {
        if let Some(element) = event.old_element {
            self.groups.push(Change::simple(
                Action::Delete,
                event.old_position,
                element.clone(),
            ));
        }
    }

    fn discard_b(&mut self, event: ContextChange<&T>) {
        if let Some(element) = event.new_element {
            self.groups.push(Change::simple(
                Action::Insert,
                event.new_position,
                element.clone(),
            ));
        }
    }
}

impl<T: Clone> PatchsetBuilder<T> for DiffBuilder<T> {
    type Output = Vec<Hunk<T>>;

    fn finish(self) -> Vec<Hunk<T>> {
        self.groups.finish()
    }
}

/// Like [`DiffBuilder`], but keeps both sides of every change as
/// [`Change::Contextual`] records.
///
/// It accepts `change` events, so driving it with
/// [`traverse_balanced`](crate::traverse::traverse_balanced) groups `!`
/// records as well.
#[derive(Debug)]
pub struct ContextDiffBuilder<T> {
    groups: HunkGroups<T>,
}

impl<T> ContextDiffBuilder<T> {
    pub fn new() -> Self {
        ContextDiffBuilder {
            groups: HunkGroups::new(),
        }
    }
}

impl<T> Default for ContextDiffBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Callbacks<T> for ContextDiffBuilder<T> {
    fn on_match(&mut self, _event: ContextChange<&T>) {
        self.groups.close();
    }

    fn discard_a(&mut self, event: ContextChange<&T>) {
        self.groups.push(event.cloned().simplify().into());
    }

    fn discard_b(&mut self, event: ContextChange<&T>) {
        self.groups.push(event.cloned().simplify().into());
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CHANGE
    }

    fn change(&mut self, event: ContextChange<&T>) {
        self.groups.push(event.cloned().simplify().into());
    }
}

impl<T: Clone> PatchsetBuilder<T> for ContextDiffBuilder<T> {
    type Output = Vec<Hunk<T>>;

    fn finish(self) -> Vec<Hunk<T>> {
        self.groups.finish()
    }
}

/// Builds the side-by-side listing returned by [`sdiff`](crate::diff::sdiff):
/// one record per event, matches included, no grouping.
#[derive(Debug)]
pub struct SDiffBuilder<T> {
    records: Vec<ContextChange<T>>,
}

impl<T> SDiffBuilder<T> {
    pub fn new() -> Self {
        SDiffBuilder { records: vec![] }
    }
}

impl<T> Default for SDiffBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Callbacks<T> for SDiffBuilder<T> {
    fn on_match(&mut self, event: ContextChange<&T>) {
        self.records.push(event.cloned().simplify());
    }

    fn discard_a(&mut self, event: ContextChange<&T>) {
        self.records.push(event.cloned().simplify());
    }

    fn discard_b(&mut self, event: ContextChange<&T>) {
        self.records.push(event.cloned().simplify());
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CHANGE
    }

    fn change(&mut self, event: ContextChange<&T>) {
        self.records.push(event.cloned().simplify());
    }
}

impl<T: Clone> PatchsetBuilder<T> for SDiffBuilder<T> {
    type Output = Vec<ContextChange<T>>;

    fn finish(self) -> Vec<ContextChange<T>> {
        self.records
    }
}
