//! Replays a patchset against a source sequence.
//!
//! A patchset is a slice of records, or a slice of hunks of records. Records
//! may be [`Change`]s, [`ContextChange`]s as produced by `sdiff`, or
//! [`RawChange`]s straight from deserialization. Nesting is limited to one
//! level by the [`PatchsetEntry`] impls.

mod types;
pub use types::*;

use std::borrow::Cow;

use tracing::instrument;

use crate::change::{Action, Change, ContextChange};
use crate::error::{PatchError, PatchResult};
use crate::sequence::Sequence;
use crate::serialization::RawChange;

/// Something a patchset can be made of.
pub trait PatchsetEntry<T: Clone> {
    /// Appends the records this entry stands for to `out`.
    fn flatten_into<'a>(&'a self, out: &mut Vec<Cow<'a, Change<T>>>) -> PatchResult<()>;
}

impl<T: Clone> PatchsetEntry<T> for Change<T> {
    fn flatten_into<'a>(&'a self, out: &mut Vec<Cow<'a, Change<T>>>) -> PatchResult<()> {
        out.push(Cow::Borrowed(self));
        Ok(())
    }
}

impl<T: Clone> PatchsetEntry<T> for ContextChange<T> {
    fn flatten_into<'a>(&'a self, out: &mut Vec<Cow<'a, Change<T>>>) -> PatchResult<()> {
        out.push(Cow::Owned(Change::Contextual(self.clone())));
        Ok(())
    }
}

impl<T: Clone> PatchsetEntry<T> for RawChange<T> {
    fn flatten_into<'a>(&'a self, out: &mut Vec<Cow<'a, Change<T>>>) -> PatchResult<()> {
        out.push(Cow::Owned(Change::try_from(self.clone())?));
        Ok(())
    }
}

macro_rules! impl_patchset_hunk {
    ($($record:ty),*) => {
        $(
            impl<T: Clone> PatchsetEntry<T> for Vec<$record> {
                fn flatten_into<'a>(&'a self, out: &mut Vec<Cow<'a, Change<T>>>) -> PatchResult<()> {
                    for record in self {
                        record.flatten_into(out)?;
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_patchset_hunk!(Change<T>, ContextChange<T>, RawChange<T>);

/// Flattens `patchset` and checks every record.
///
/// Raw records with an unknown action fail with
/// [`PatchError::InvalidAction`], and traversal sentinels with
/// [`PatchError::SentinelAction`].
pub fn normalize<T, E>(patchset: &[E]) -> PatchResult<Normalized<'_, T>>
where
    T: Clone,
    E: PatchsetEntry<T>,
{
    let mut changes = Vec::new();
    for entry in patchset {
        entry.flatten_into(&mut changes)?;
    }
    let mut has_changes = false;
    for (index, change) in changes.iter().enumerate() {
        let action = change.action();
        if action.is_sentinel() {
            return Err(PatchError::SentinelAction { index, action });
        }
        has_changes |= action != Action::Unchanged;
    }
    Ok(Normalized {
        changes,
        has_changes,
    })
}

/// Compares the elements recorded in `changes` with those of `source` at the
/// same positions.
///
/// Old-side elements are evidence for `source` being the original, new-side
/// elements for it being the result. Simple `-` records are old-side, simple
/// `+` records new-side and simple `=` records both; simple `!` records carry
/// only one element of unknown side and are ignored.
pub fn collect_evidence<T, C>(source: &[T], changes: &[C]) -> DirectionEvidence
where
    T: PartialEq,
    C: AsRef<Change<T>>,
{
    let mut evidence = DirectionEvidence::default();
    let agrees = |position: usize, element: &T| source.get(position) == Some(element);
    for change in changes {
        match change.as_ref() {
            Change::Simple {
                action,
                position,
                element,
            } => {
                let old_side = matches!(action, Action::Delete | Action::Unchanged);
                let new_side = matches!(action, Action::Insert | Action::Unchanged);
                if old_side {
                    evidence.pre_image.vote(agrees(*position, element));
                }
                if new_side {
                    evidence.post_image.vote(agrees(*position, element));
                }
            }
            Change::Contextual(c) => {
                if let Some(element) = &c.old_element {
                    evidence.pre_image.vote(agrees(c.old_position, element));
                }
                if let Some(element) = &c.new_element {
                    evidence.post_image.vote(agrees(c.new_position, element));
                }
            }
        }
    }
    evidence
}

/// Works out whether `source` is the original or the result of `changes`.
pub fn intuit_direction<T, C>(source: &[T], changes: &[C]) -> PatchResult<Direction>
where
    T: PartialEq,
    C: AsRef<Change<T>>,
{
    let evidence = collect_evidence(source, changes);
    tracing::debug!(?evidence, "weighed patch direction");
    evidence.decide()
}

/// Applies `patchset` to `source`.
///
/// Without an explicit `direction` it is inferred with
/// [`intuit_direction`]. A patchset without any real change returns a copy
/// of `source`. Errors are reported before anything is returned; `source`
/// itself is never modified.
///
/// # Examples
///
/// ```
/// use lcsdiff::{diff, patch};
///
/// let hunks = diff("aX", "bXaX");
/// assert_eq!(patch("aX", &hunks, None).unwrap(), "bXaX");
/// assert_eq!(patch("bXaX", &hunks, None).unwrap(), "aX");
/// ```
#[instrument(skip_all, fields(direction = ?direction))]
pub fn patch<S, E>(source: &S, patchset: &[E], direction: Option<Direction>) -> PatchResult<S::Owned>
where
    S: Sequence + ?Sized,
    E: PatchsetEntry<S::Item>,
{
    let src = source.items();
    let Normalized {
        changes,
        has_changes,
    } = normalize::<S::Item, E>(patchset)?;
    if !has_changes {
        return Ok(S::assemble(src.into_owned()));
    }

    let direction = match direction {
        Some(direction) => direction,
        None => intuit_direction(&src, &changes)?,
    };
    tracing::debug!(%direction, records = changes.len(), "replaying patchset");

    let mut replay = Replay::new(&src);
    for (index, change) in changes.iter().enumerate() {
        replay.apply(index, change, direction)?;
    }
    Ok(S::assemble(replay.finish()))
}

/// Applies `patchset` to `source` taken as its result, recovering the
/// original.
pub fn unpatch<S, E>(source: &S, patchset: &[E]) -> PatchResult<S::Owned>
where
    S: Sequence + ?Sized,
    E: PatchsetEntry<S::Item>,
{
    patch(source, patchset, Some(Direction::Unpatch))
}

/// Output under construction: `ai` indexes the source, `bj` the sequence
/// being built.
struct Replay<'s, T> {
    src: &'s [T],
    out: Vec<T>,
    ai: usize,
    bj: usize,
}

impl<'s, T: Clone> Replay<'s, T> {
    fn new(src: &'s [T]) -> Self {
        Replay {
            src,
            out: Vec::with_capacity(src.len()),
            ai: 0,
            bj: 0,
        }
    }

    fn exhausted(&self, index: usize) -> PatchError {
        PatchError::SourceExhausted {
            index,
            len: self.src.len(),
        }
    }

    fn copy(&mut self, index: usize) -> PatchResult<()> {
        let element = self.src.get(self.ai).ok_or_else(|| self.exhausted(index))?;
        self.out.push(element.clone());
        self.ai += 1;
        self.bj += 1;
        Ok(())
    }

    fn copy_to_source(&mut self, index: usize, position: usize) -> PatchResult<()> {
        while self.ai < position {
            self.copy(index)?;
        }
        Ok(())
    }

    fn copy_to_target(&mut self, index: usize, position: usize) -> PatchResult<()> {
        while self.bj < position {
            self.copy(index)?;
        }
        Ok(())
    }

    fn skip(&mut self, index: usize) -> PatchResult<()> {
        if self.ai >= self.src.len() {
            return Err(self.exhausted(index));
        }
        self.ai += 1;
        Ok(())
    }

    fn splice(&mut self, index: usize, element: Option<&T>) -> PatchResult<()> {
        let element = element.ok_or(PatchError::MissingElement { index })?;
        self.out.push(element.clone());
        self.bj += 1;
        Ok(())
    }

    fn apply(&mut self, index: usize, change: &Change<T>, direction: Direction) -> PatchResult<()> {
        match change {
            Change::Simple {
                action,
                position,
                element,
            } => match direction.map(*action) {
                Action::Delete => {
                    self.copy_to_source(index, *position)?;
                    self.skip(index)
                }
                Action::Insert => {
                    self.copy_to_target(index, *position)?;
                    self.splice(index, Some(element))
                }
                // A lone element cannot say what it replaces.
                _ => Ok(()),
            },
            Change::Contextual(c) => {
                // Positions and element seen from the side being produced.
                let (source_position, target_position, element) = match direction {
                    Direction::Patch => (c.old_position, c.new_position, c.new_element.as_ref()),
                    Direction::Unpatch => (c.new_position, c.old_position, c.old_element.as_ref()),
                };
                match direction.map(c.action) {
                    Action::Delete => {
                        self.copy_to_source(index, source_position)?;
                        self.skip(index)
                    }
                    Action::Insert => {
                        self.copy_to_target(index, target_position)?;
                        self.splice(index, element)
                    }
                    Action::Replace | Action::Unchanged => {
                        self.copy_to_source(index, source_position)?;
                        self.skip(index)?;
                        self.splice(index, element)
                    }
                    Action::OldExhausted | Action::NewExhausted => Ok(()),
                }
            }
        }
    }

    fn finish(mut self) -> Vec<T> {
        self.out.extend_from_slice(&self.src[self.ai.min(self.src.len())..]);
        self.out
    }
}
