//! Longest common subsequence, diffs and patches over arbitrary sequences.
//!
//! [`diff`] and [`sdiff`] compare two sequences through their longest common
//! subsequence. The resulting patchsets can be replayed with [`patch`] and
//! [`unpatch`], which work out on their own which side of the patchset they
//! were given. Strings are compared character by character; anything else
//! goes through [`Sequence`].
//!
//! ```
//! use lcsdiff::{diff, patch, sdiff, Action};
//!
//! let old = vec!["a", "b", "c", "e", "h", "j", "l", "m", "n", "p"];
//! let new = vec!["b", "c", "d", "e", "f", "j", "k", "l", "m", "r", "s", "t"];
//!
//! let hunks = diff(&old, &new);
//! assert_eq!(hunks.len(), 5);
//! assert_eq!(patch(&old, &hunks, None).unwrap(), new);
//! assert_eq!(patch(&new, &hunks, None).unwrap(), old);
//!
//! let listing = sdiff(&old, &new);
//! assert_eq!(listing[5].action, Action::Replace);
//! ```
//!
//! The traversals behind `diff` and `sdiff` are public as well, for callers
//! that want the events themselves: see [`traverse_sequences`],
//! [`traverse_balanced`] and [`Callbacks`].

pub mod change;
pub mod diff;
pub mod error;
pub mod lcs;
pub mod patch;
pub mod sequence;
pub mod serialization;
pub mod traverse;

pub use change::{Action, Change, ContextChange, Hunk};
pub use diff::{
    diff, diff_with, sdiff, sdiff_with, ContextDiffBuilder, DiffBuilder, PatchsetBuilder,
    SDiffBuilder,
};
pub use error::{PatchError, PatchResult};
pub use lcs::{compute_lcs, longest_common_subsequence, AlignmentVector};
pub use patch::{normalize, patch, unpatch, Direction, PatchsetEntry};
pub use sequence::Sequence;
pub use serialization::RawChange;
pub use traverse::{traverse_balanced, traverse_sequences, Callbacks, Capabilities};
