//! Longest common subsequence of two sequences.
//!
//! The common prefix and suffix are matched directly. What remains is solved
//! with the Hunt-Szymanski approach: for every element of the old sequence,
//! the positions of equal elements in the new sequence are fed, in descending
//! order, into a patience-sorting table (`thresh`) whose entry `k` is the
//! smallest new-sequence position that ends a common subsequence of length
//! `k + 1`. Chain links remember how to walk the longest one back.

mod index;
pub use index::*;

use std::hash::Hash;

use crate::sequence::Sequence;

/// For each position of the old sequence, the position of the element of the
/// new sequence it is matched with, if any. Matched pairs increase strictly
/// in both coordinates.
pub type AlignmentVector = Vec<Option<usize>>;

/// Computes the alignment vector of `a` against `b`.
///
/// # Examples
///
/// ```
/// use lcsdiff::compute_lcs;
///
/// let vector = compute_lcs(&[1, 2, 3], &[2, 3, 4]);
/// assert_eq!(vector, vec![None, Some(0), Some(1)]);
/// ```
pub fn compute_lcs<S: Sequence + ?Sized>(a: &S, b: &S) -> AlignmentVector {
    solve(&*a.items(), &*b.items())
}

/// The elements of `a` that belong to the longest common subsequence, in
/// order.
pub fn longest_common_subsequence<S: Sequence + ?Sized>(a: &S, b: &S) -> Vec<S::Item> {
    let a = a.items();
    solve(&*a, &*b.items())
        .iter()
        .zip(a.iter())
        .filter_map(|(matched, el)| matched.map(|_| el.clone()))
        .collect()
}

/// One step of a candidate chain: `a[a_index] == b[b_index]`, preceded by
/// the link at `prev` in the arena.
#[derive(Debug, Clone, Copy)]
struct Link {
    prev: Option<usize>,
    a_index: usize,
    b_index: usize,
}

pub(crate) fn solve<T: Eq + Hash>(a: &[T], b: &[T]) -> AlignmentVector {
    let mut vector = vec![None; a.len()];

    let (mut a_start, mut b_start) = (0, 0);
    let (mut a_end, mut b_end) = (a.len(), b.len());

    while a_start < a_end && b_start < b_end && a[a_start] == b[b_start] {
        vector[a_start] = Some(b_start);
        a_start += 1;
        b_start += 1;
    }
    while a_start < a_end && b_start < b_end && a[a_end - 1] == b[b_end - 1] {
        a_end -= 1;
        b_end -= 1;
        vector[a_end] = Some(b_end);
    }
    tracing::trace!(
        prefix = a_start,
        suffix = a.len() - a_end,
        "matched common ends"
    );
    if a_start == a_end || b_start == b_end {
        return vector;
    }

    let index = EquivalenceIndex::build(b, b_start..b_end);
    let mut thresh: Vec<usize> = Vec::new();
    // links[k] is the arena slot of the chain currently ending at thresh[k]
    let mut links: Vec<usize> = Vec::new();
    let mut arena: Vec<Link> = Vec::new();

    for (i, el) in a.iter().enumerate().take(a_end).skip(a_start) {
        let mut k: Option<usize> = None;
        for &j in index.positions(el).iter().rev() {
            k = match k {
                Some(k) if k > 0 && thresh[k] > j && thresh[k - 1] < j => {
                    thresh[k] = j;
                    Some(k)
                }
                hint => replace_next_larger(&mut thresh, j, hint),
            };
            if let Some(k) = k {
                arena.push(Link {
                    prev: k.checked_sub(1).map(|prev| links[prev]),
                    a_index: i,
                    b_index: j,
                });
                let slot = arena.len() - 1;
                if k == links.len() {
                    links.push(slot);
                } else {
                    links[k] = slot;
                }
            }
        }
    }

    let mut link = thresh.len().checked_sub(1).map(|k| links[k]);
    while let Some(slot) = link {
        let Link {
            prev,
            a_index,
            b_index,
        } = arena[slot];
        vector[a_index] = Some(b_index);
        link = prev;
    }
    tracing::debug!(
        a_len = a.len(),
        b_len = b.len(),
        matched = a_start + (a.len() - a_end) + thresh.len(),
        "computed alignment vector"
    );
    vector
}

/// Puts `value` where it keeps `thresh` ascending, replacing the next larger
/// entry, and returns that slot. Values larger than every entry are appended.
///
/// When `hint` is given only the slots up to and including it are searched.
/// Returns `None`, leaving `thresh` untouched, if `value` is already present.
pub(crate) fn replace_next_larger(
    thresh: &mut Vec<usize>,
    value: usize,
    hint: Option<usize>,
) -> Option<usize> {
    if thresh.last().map_or(true, |&last| value > last) {
        thresh.push(value);
        return Some(thresh.len() - 1);
    }
    let upper = hint.map_or(thresh.len(), |h| (h + 1).min(thresh.len()));
    match thresh[..upper].binary_search(&value) {
        Ok(_) => None,
        Err(slot) if slot == thresh.len() => {
            thresh.push(value);
            Some(slot)
        }
        Err(slot) => {
            thresh[slot] = value;
            Some(slot)
        }
    }
}
