mod builders;
pub use builders::*;

use crate::change::{ContextChange, Hunk};
use crate::sequence::Sequence;
use crate::traverse::{traverse_balanced, traverse_sequences};

/// Computes the hunks that turn `a` into `b`.
///
/// Each hunk is a maximal run of changes between two matched elements:
/// deletions carry their position in `a`, insertions their position in `b`.
///
/// # Examples
///
/// ```
/// use lcsdiff::{diff, Action, Change};
///
/// let hunks = diff("aX", "bXaX");
/// assert_eq!(
///     hunks,
///     vec![vec![
///         Change::simple(Action::Insert, 0, 'b'),
///         Change::simple(Action::Insert, 1, 'X'),
///     ]]
/// );
/// ```
pub fn diff<S: Sequence + ?Sized>(a: &S, b: &S) -> Vec<Hunk<S::Item>> {
    diff_with(a, b, DiffBuilder::new())
}

/// Runs the sequential traversal of `a` and `b` into `builder`.
pub fn diff_with<S, B>(a: &S, b: &S, mut builder: B) -> B::Output
where
    S: Sequence + ?Sized,
    B: PatchsetBuilder<S::Item>,
{
    traverse_sequences(a, b, &mut builder);
    builder.finish()
}

/// Lists every position of `a` and `b` side by side, with the action that
/// links them.
pub fn sdiff<S: Sequence + ?Sized>(a: &S, b: &S) -> Vec<ContextChange<S::Item>> {
    sdiff_with(a, b, SDiffBuilder::new())
}

/// Runs the balanced traversal of `a` and `b` into `builder`.
pub fn sdiff_with<S, B>(a: &S, b: &S, mut builder: B) -> B::Output
where
    S: Sequence + ?Sized,
    B: PatchsetBuilder<S::Item>,
{
    traverse_balanced(a, b, &mut builder);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{Action, Change};
    use crate::lcs::compute_lcs;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn seq1() -> Vec<&'static str> {
        vec!["a", "b", "c", "e", "h", "j", "l", "m", "n", "p"]
    }

    fn seq2() -> Vec<&'static str> {
        vec!["b", "c", "d", "e", "f", "j", "k", "l", "m", "r", "s", "t"]
    }

    fn del<T>(position: usize, element: T) -> Change<T> {
        Change::simple(Action::Delete, position, element)
    }

    fn ins<T>(position: usize, element: T) -> Change<T> {
        Change::simple(Action::Insert, position, element)
    }

    fn ctx(
        symbol: char,
        old: (usize, Option<&'static str>),
        new: (usize, Option<&'static str>),
    ) -> ContextChange<&'static str> {
        let action = Action::from_symbol(symbol).unwrap();
        ContextChange::new(action, old.0, old.1, new.0, new.1)
    }

    fn count(hunks: &[Hunk<u8>], action: Action) -> usize {
        hunks.iter().flatten().filter(|c| c.action() == action).count()
    }

    fn lcs_len(a: &[u8], b: &[u8]) -> usize {
        compute_lcs(a, b).iter().flatten().count()
    }

    proptest! {
        #[test]
        fn test_length_invariant(old: Vec<u8>, new: Vec<u8>) {
            let hunks = diff(&old, &new);
            let common = lcs_len(&old, &new);
            prop_assert_eq!(count(&hunks, Action::Delete), old.len() - common);
            prop_assert_eq!(count(&hunks, Action::Insert), new.len() - common);
            prop_assert!(hunks.iter().all(|hunk| !hunk.is_empty()));
        }

        #[test]
        fn test_idempotency(els: Vec<u8>) {
            prop_assert!(diff(&els, &els).is_empty());
            let listing = sdiff(&els, &els);
            prop_assert_eq!(listing.len(), els.len());
            prop_assert!(listing.iter().all(ContextChange::is_unchanged));
        }

        #[test]
        fn test_new_empty(els: Vec<u8>) {
            let hunks = diff(&els, &Vec::new());
            let expected: Vec<Hunk<u8>> = if els.is_empty() {
                vec![]
            } else {
                vec![els.iter().enumerate().map(|(i, e)| del(i, *e)).collect()]
            };
            prop_assert_eq!(hunks, expected);
        }

        #[test]
        fn test_old_empty(els: Vec<u8>) {
            let hunks = diff(&Vec::new(), &els);
            let expected: Vec<Hunk<u8>> = if els.is_empty() {
                vec![]
            } else {
                vec![els.iter().enumerate().map(|(i, e)| ins(i, *e)).collect()]
            };
            prop_assert_eq!(hunks, expected);
        }

        #[test]
        fn test_symmetry(old: Vec<u8>, new: Vec<u8>) {
            let forward = diff(&old, &new);
            let backward = diff(&new, &old);
            prop_assert_eq!(count(&forward, Action::Insert), count(&backward, Action::Delete));
            prop_assert_eq!(count(&forward, Action::Delete), count(&backward, Action::Insert));
        }

        #[test]
        fn test_balanced_hunks_match_sdiff(
            old in prop::collection::vec(0u8..6, 0..25),
            new in prop::collection::vec(0u8..6, 0..25),
        ) {
            let changes: Vec<ContextChange<u8>> = sdiff(&old, &new)
                .into_iter()
                .filter(|c| !c.is_unchanged())
                .collect();
            let grouped: Vec<ContextChange<u8>> = sdiff_with(&old, &new, ContextDiffBuilder::new())
                .into_iter()
                .flatten()
                .filter_map(|c| match c {
                    Change::Contextual(c) => Some(c),
                    Change::Simple { .. } => None,
                })
                .collect();
            prop_assert_eq!(grouped, changes);
        }
    }

    #[test]
    fn test_diff() {
        assert_eq!(
            diff(&seq1(), &seq2()),
            vec![
                vec![del(0, "a")],
                vec![ins(2, "d")],
                vec![del(4, "h"), ins(4, "f")],
                vec![ins(6, "k")],
                vec![
                    del(8, "n"),
                    del(9, "p"),
                    ins(9, "r"),
                    ins(10, "s"),
                    ins(11, "t"),
                ],
            ]
        );
    }

    #[test]
    fn test_diff_strings() {
        assert_eq!(diff("aX", "bXaX"), vec![vec![ins(0, 'b'), ins(1, 'X')]]);
        assert_eq!(diff("abc", "abc"), Vec::<Hunk<char>>::new());
    }

    #[test]
    fn test_diff_old_empty() {
        assert_eq!(
            diff(&vec![], &vec!["a", "b", "c"]),
            vec![vec![ins(0, "a"), ins(1, "b"), ins(2, "c")]]
        );
    }

    #[test]
    fn test_context_diff() {
        let hunks = diff_with(&seq1(), &seq2(), ContextDiffBuilder::new());
        let expected: Vec<Vec<ContextChange<&str>>> = vec![
            vec![ctx('-', (0, Some("a")), (0, None))],
            vec![ctx('+', (3, None), (2, Some("d")))],
            vec![
                ctx('-', (4, Some("h")), (4, None)),
                ctx('+', (5, None), (4, Some("f"))),
            ],
            vec![ctx('+', (6, None), (6, Some("k")))],
            vec![
                ctx('-', (8, Some("n")), (9, None)),
                ctx('-', (9, Some("p")), (9, None)),
                ctx('+', (10, None), (9, Some("r"))),
                ctx('+', (10, None), (10, Some("s"))),
                ctx('+', (10, None), (11, Some("t"))),
            ],
        ];
        let expected: Vec<Hunk<&str>> = expected
            .into_iter()
            .map(|hunk| hunk.into_iter().map(Change::from).collect())
            .collect();
        assert_eq!(hunks, expected);
    }

    #[test]
    fn test_sdiff() {
        assert_eq!(
            sdiff(&seq1(), &seq2()),
            vec![
                ctx('-', (0, Some("a")), (0, None)),
                ctx('=', (1, Some("b")), (0, Some("b"))),
                ctx('=', (2, Some("c")), (1, Some("c"))),
                ctx('+', (3, None), (2, Some("d"))),
                ctx('=', (3, Some("e")), (3, Some("e"))),
                ctx('!', (4, Some("h")), (4, Some("f"))),
                ctx('=', (5, Some("j")), (5, Some("j"))),
                ctx('+', (6, None), (6, Some("k"))),
                ctx('=', (6, Some("l")), (7, Some("l"))),
                ctx('=', (7, Some("m")), (8, Some("m"))),
                ctx('!', (8, Some("n")), (9, Some("r"))),
                ctx('!', (9, Some("p")), (10, Some("s"))),
                ctx('+', (10, None), (11, Some("t"))),
            ]
        );
    }

    #[test]
    fn test_sdiff_old_empty() {
        assert_eq!(
            sdiff(&vec![], &vec!["a", "b", "c"]),
            vec![
                ctx('+', (0, None), (0, Some("a"))),
                ctx('+', (0, None), (1, Some("b"))),
                ctx('+', (0, None), (2, Some("c"))),
            ]
        );
    }
}
