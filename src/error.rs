//! Errors raised while normalizing or applying a patchset.

use thiserror::Error;

use crate::change::Action;

/// Everything that can go wrong between handing a patchset to
/// [`patch`](crate::patch::patch) and getting a new sequence back.
///
/// Structural errors (`InvalidAction`, `SentinelAction`) are reported while
/// the patchset is normalized, before anything is replayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// A raw change carried a symbol that is not one of `+ - ! = > <`.
    #[error("invalid change action {0:?}")]
    InvalidAction(String),

    /// A direction name other than `patch` or `unpatch`.
    #[error("invalid patch direction {0:?}")]
    InvalidDirection(String),

    /// A traversal sentinel (`>` or `<`) ended up inside a patchset.
    #[error("change {index} has sentinel action '{action}', which cannot be patched")]
    SentinelAction { index: usize, action: Action },

    /// The source is neither the original nor the result of the patchset.
    #[error(
        "the patchset does not apply to the source as either its original or its result"
    )]
    NotApplicable,

    /// The source fits the patchset equally well in both directions.
    #[error("cannot tell whether the source is the original or the result of the patchset")]
    AmbiguousDirection,

    /// Replaying a change needed source elements past the end of the source.
    #[error("change {index} reaches past the end of the source ({len} elements)")]
    SourceExhausted { index: usize, len: usize },

    /// An insert or replace record has no element to splice in.
    #[error("change {index} has no element to insert")]
    MissingElement { index: usize },
}

/// Result alias for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;
