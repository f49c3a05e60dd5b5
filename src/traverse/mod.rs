//! Walks the alignment vector of two sequences and reports, element by
//! element, what the longest common subsequence says happened to it.
//!
//! [`traverse_sequences`] reports every unmatched element on its own side.
//! [`traverse_balanced`] pairs unmatched elements that sit at the same spot
//! and reports them as one change, which is what a side-by-side view wants.

mod callbacks;
pub use callbacks::*;

use tracing::instrument;

use crate::change::{Action, ContextChange};
use crate::lcs;
use crate::sequence::Sequence;

/// Walks `a` and `b` reporting matches and one-sided discards.
///
/// Every position of `a` is reported exactly once as a match or a
/// `discard_a`, every position of `b` exactly once as a match or a
/// `discard_b`. When one sequence runs out while the other still has
/// elements, a listener advertising [`Capabilities::FINISHED_A`] or
/// [`Capabilities::FINISHED_B`] is told so once, before the remaining
/// elements are discarded.
#[instrument(skip_all)]
pub fn traverse_sequences<S, C>(a: &S, b: &S, callbacks: &mut C)
where
    S: Sequence + ?Sized,
    C: Callbacks<S::Item> + ?Sized,
{
    let (a, b) = (a.items(), b.items());
    let vector = lcs::solve(&*a, &*b);
    walk_sequences(&*a, &*b, &vector, callbacks);
}

/// Walks `a` and `b` reporting matches, and pairing up unmatched elements
/// that line up into changes.
///
/// Without [`Capabilities::CHANGE`] each such pair is reported as a
/// `discard_a` followed by a `discard_b`.
#[instrument(skip_all)]
pub fn traverse_balanced<S, C>(a: &S, b: &S, callbacks: &mut C)
where
    S: Sequence + ?Sized,
    C: Callbacks<S::Item> + ?Sized,
{
    let (a, b) = (a.items(), b.items());
    let vector = lcs::solve(&*a, &*b);
    walk_balanced(&*a, &*b, &vector, callbacks);
}

struct Cursor<'a, T> {
    a: &'a [T],
    b: &'a [T],
    ai: usize,
    bj: usize,
}

impl<'a, T> Cursor<'a, T> {
    fn new(a: &'a [T], b: &'a [T]) -> Self {
        Cursor { a, b, ai: 0, bj: 0 }
    }

    fn event(&self, action: Action) -> ContextChange<&'a T> {
        ContextChange::new(
            action,
            self.ai,
            self.a.get(self.ai),
            self.bj,
            self.b.get(self.bj),
        )
    }

    fn a_left(&self) -> bool {
        self.ai < self.a.len()
    }

    fn b_left(&self) -> bool {
        self.bj < self.b.len()
    }

    fn on_match<C: Callbacks<T> + ?Sized>(&mut self, callbacks: &mut C) {
        callbacks.on_match(self.event(Action::Unchanged));
        self.ai += 1;
        self.bj += 1;
    }

    fn discard_a<C: Callbacks<T> + ?Sized>(&mut self, callbacks: &mut C) {
        callbacks.discard_a(self.event(Action::Delete));
        self.ai += 1;
    }

    fn discard_b<C: Callbacks<T> + ?Sized>(&mut self, callbacks: &mut C) {
        callbacks.discard_b(self.event(Action::Insert));
        self.bj += 1;
    }

    /// Brings both cursors up to `(a_target, b_target)`.
    fn balance<C: Callbacks<T> + ?Sized>(
        &mut self,
        callbacks: &mut C,
        a_target: usize,
        b_target: usize,
        change: bool,
    ) {
        while self.ai < a_target || self.bj < b_target {
            match (self.ai < a_target, self.bj < b_target) {
                (true, true) if change => {
                    callbacks.change(self.event(Action::Replace));
                    self.ai += 1;
                    self.bj += 1;
                }
                (true, true) => {
                    self.discard_a(callbacks);
                    self.discard_b(callbacks);
                }
                (true, false) => self.discard_a(callbacks),
                (false, _) => self.discard_b(callbacks),
            }
        }
    }
}

fn walk_sequences<T, C>(a: &[T], b: &[T], vector: &[Option<usize>], callbacks: &mut C)
where
    C: Callbacks<T> + ?Sized,
{
    let mut cursor = Cursor::new(a, b);

    // Walk up to the last match, then one step further so the element right
    // after it is discarded before the trailing runs.
    let end = vector.iter().rposition(Option::is_some).map_or(0, |last| last + 1);
    for ii in 0..=end {
        cursor.ai = ii;
        match vector.get(ii).copied().flatten() {
            Some(jj) => {
                while cursor.bj < jj {
                    cursor.discard_b(callbacks);
                }
                cursor.on_match(callbacks);
            }
            None if ii < a.len() => cursor.discard_a(callbacks),
            None => {}
        }
    }
    cursor.ai = (end + 1).min(a.len());

    let capabilities = callbacks.capabilities();
    let (mut ran_finished_a, mut ran_finished_b) = (false, false);
    while cursor.a_left() || cursor.b_left() {
        if !cursor.a_left() && cursor.b_left() {
            if capabilities.contains(Capabilities::FINISHED_A) && !ran_finished_a {
                tracing::trace!(bj = cursor.bj, "old sequence exhausted");
                callbacks.finished_a(ContextChange::new(
                    Action::OldExhausted,
                    a.len().saturating_sub(1),
                    a.last(),
                    cursor.bj,
                    b.get(cursor.bj),
                ));
                ran_finished_a = true;
            } else {
                while cursor.b_left() {
                    cursor.discard_b(callbacks);
                }
            }
        }

        if !cursor.b_left() && cursor.a_left() {
            if capabilities.contains(Capabilities::FINISHED_B) && !ran_finished_b {
                tracing::trace!(ai = cursor.ai, "new sequence exhausted");
                callbacks.finished_b(ContextChange::new(
                    Action::NewExhausted,
                    cursor.ai,
                    a.get(cursor.ai),
                    b.len().saturating_sub(1),
                    b.last(),
                ));
                ran_finished_b = true;
            } else {
                while cursor.a_left() {
                    cursor.discard_a(callbacks);
                }
            }
        }

        if cursor.a_left() {
            cursor.discard_a(callbacks);
        }
        if cursor.b_left() {
            cursor.discard_b(callbacks);
        }
    }
}

fn walk_balanced<T, C>(a: &[T], b: &[T], vector: &[Option<usize>], callbacks: &mut C)
where
    C: Callbacks<T> + ?Sized,
{
    let change = callbacks.capabilities().contains(Capabilities::CHANGE);
    let mut cursor = Cursor::new(a, b);

    let matches = vector
        .iter()
        .enumerate()
        .filter_map(|(ma, mb)| mb.map(|mb| (ma, mb)));
    for (ma, mb) in matches {
        cursor.balance(callbacks, ma, mb, change);
        cursor.on_match(callbacks);
    }
    cursor.balance(callbacks, a.len(), b.len(), change);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    type Event = (&'static str, usize, usize);

    #[derive(Default)]
    struct Recorder {
        capabilities: Capabilities,
        events: Vec<Event>,
    }

    impl Recorder {
        fn with(capabilities: Capabilities) -> Self {
            Recorder {
                capabilities,
                events: vec![],
            }
        }

        fn record<T>(&mut self, name: &'static str, event: ContextChange<&T>) {
            self.events
                .push((name, event.old_position, event.new_position));
        }

        fn positions(&self, names: &[&str], old: bool) -> Vec<usize> {
            self.events
                .iter()
                .filter(|(name, _, _)| names.contains(name))
                .map(|&(_, a, b)| if old { a } else { b })
                .collect()
        }

        fn count(&self, name: &str) -> usize {
            self.events.iter().filter(|(n, _, _)| *n == name).count()
        }
    }

    impl<T> Callbacks<T> for Recorder {
        fn on_match(&mut self, event: ContextChange<&T>) {
            self.record("match", event);
        }

        fn discard_a(&mut self, event: ContextChange<&T>) {
            self.record("discard_a", event);
        }

        fn discard_b(&mut self, event: ContextChange<&T>) {
            self.record("discard_b", event);
        }

        fn capabilities(&self) -> Capabilities {
            self.capabilities
        }

        fn finished_a(&mut self, event: ContextChange<&T>) {
            self.record("finished_a", event);
        }

        fn finished_b(&mut self, event: ContextChange<&T>) {
            self.record("finished_b", event);
        }

        fn change(&mut self, event: ContextChange<&T>) {
            self.record("change", event);
        }
    }

    fn seq1() -> Vec<&'static str> {
        vec!["a", "b", "c", "e", "h", "j", "l", "m", "n", "p"]
    }

    fn seq2() -> Vec<&'static str> {
        vec!["b", "c", "d", "e", "f", "j", "k", "l", "m", "r", "s", "t"]
    }

    fn sequential_events() -> Vec<Event> {
        vec![
            ("discard_a", 0, 0),
            ("match", 1, 0),
            ("match", 2, 1),
            ("discard_b", 3, 2),
            ("match", 3, 3),
            ("discard_a", 4, 4),
            ("discard_b", 5, 4),
            ("match", 5, 5),
            ("discard_b", 6, 6),
            ("match", 6, 7),
            ("match", 7, 8),
            ("discard_a", 8, 9),
            ("discard_a", 9, 9),
            ("discard_b", 10, 9),
            ("discard_b", 10, 10),
            ("discard_b", 10, 11),
        ]
    }

    proptest! {
        #[test]
        fn test_sequences_cover_every_position(
            a in prop::collection::vec(0u8..5, 0..20),
            b in prop::collection::vec(0u8..5, 0..20),
        ) {
            let mut recorder = Recorder::with(Capabilities::all());
            traverse_sequences(&a, &b, &mut recorder);
            let a_positions = recorder.positions(&["match", "discard_a"], true);
            let b_positions = recorder.positions(&["match", "discard_b"], false);
            prop_assert_eq!(a_positions, (0..a.len()).collect::<Vec<_>>());
            prop_assert_eq!(b_positions, (0..b.len()).collect::<Vec<_>>());
            prop_assert!(recorder.count("finished_a") <= 1);
            prop_assert!(recorder.count("finished_b") <= 1);
            prop_assert_eq!(recorder.count("change"), 0);
        }

        #[test]
        fn test_balanced_covers_every_position(
            a in prop::collection::vec(0u8..5, 0..20),
            b in prop::collection::vec(0u8..5, 0..20),
            change in any::<bool>(),
        ) {
            let capabilities = if change { Capabilities::CHANGE } else { Capabilities::empty() };
            let mut recorder = Recorder::with(capabilities);
            traverse_balanced(&a, &b, &mut recorder);
            let a_positions = recorder.positions(&["match", "discard_a", "change"], true);
            let b_positions = recorder.positions(&["match", "discard_b", "change"], false);
            prop_assert_eq!(a_positions, (0..a.len()).collect::<Vec<_>>());
            prop_assert_eq!(b_positions, (0..b.len()).collect::<Vec<_>>());
            prop_assert_eq!(recorder.count("match"), lcs::solve(&a, &b).iter().flatten().count());
        }
    }

    #[test]
    fn test_sequences() {
        let mut recorder = Recorder::default();
        traverse_sequences(&seq1(), &seq2(), &mut recorder);
        assert_eq!(recorder.events, sequential_events());
    }

    #[test]
    fn test_sequences_finished_a() {
        let mut recorder = Recorder::with(Capabilities::FINISHED_A);
        traverse_sequences(&seq1(), &seq2(), &mut recorder);
        let mut expected = sequential_events();
        expected.insert(14, ("finished_a", 9, 10));
        assert_eq!(recorder.events, expected);
    }

    #[test]
    fn test_sequences_finished_b() {
        let mut recorder = Recorder::with(Capabilities::FINISHED_B);
        traverse_sequences(&vec!["a", "b", "c"], &vec!["a"], &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                ("match", 0, 0),
                ("discard_a", 1, 1),
                ("finished_b", 2, 0),
                ("discard_a", 2, 1),
            ]
        );
    }

    #[test]
    fn test_sequences_old_empty() {
        let mut recorder = Recorder::with(Capabilities::FINISHED_A);
        traverse_sequences("", "abc", &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                ("finished_a", 0, 0),
                ("discard_b", 0, 0),
                ("discard_b", 0, 1),
                ("discard_b", 0, 2),
            ]
        );
    }

    #[test]
    fn test_sequences_trailing_runs() {
        let mut recorder = Recorder::default();
        traverse_sequences("xacd", "xbe", &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                ("match", 0, 0),
                ("discard_a", 1, 1),
                ("discard_a", 2, 1),
                ("discard_b", 3, 1),
                ("discard_a", 3, 2),
                ("discard_b", 4, 2),
            ]
        );
    }

    #[test]
    fn test_balanced_with_change() {
        let mut recorder = Recorder::with(Capabilities::CHANGE);
        traverse_balanced(&["a", "b", "c"], &["a", "x", "c"], &mut recorder);
        assert_eq!(
            recorder.events,
            vec![("match", 0, 0), ("change", 1, 1), ("match", 2, 2)]
        );
    }

    #[test]
    fn test_balanced_without_change() {
        let mut recorder = Recorder::default();
        traverse_balanced(&["a", "b", "c"], &["a", "x", "c"], &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                ("match", 0, 0),
                ("discard_a", 1, 1),
                ("discard_b", 2, 1),
                ("match", 2, 2)
            ]
        );
    }

    #[test]
    fn test_balanced() {
        let mut recorder = Recorder::with(Capabilities::CHANGE);
        traverse_balanced(&seq1(), &seq2(), &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                ("discard_a", 0, 0),
                ("match", 1, 0),
                ("match", 2, 1),
                ("discard_b", 3, 2),
                ("match", 3, 3),
                ("change", 4, 4),
                ("match", 5, 5),
                ("discard_b", 6, 6),
                ("match", 6, 7),
                ("match", 7, 8),
                ("change", 8, 9),
                ("change", 9, 10),
                ("discard_b", 10, 11),
            ]
        );
    }

    #[test]
    fn test_events_carry_elements() {
        struct Elements(Vec<ContextChange<char>>);

        impl Callbacks<char> for Elements {
            fn on_match(&mut self, event: ContextChange<&char>) {
                self.0.push(event.cloned());
            }

            fn discard_a(&mut self, event: ContextChange<&char>) {
                self.0.push(event.cloned());
            }

            fn discard_b(&mut self, event: ContextChange<&char>) {
                self.0.push(event.cloned());
            }
        }

        let mut elements = Elements(vec![]);
        traverse_sequences("ab", "b", &mut elements);
        assert_eq!(
            elements.0,
            vec![
                ContextChange::new(Action::Delete, 0, Some('a'), 0, Some('b')),
                ContextChange::new(Action::Unchanged, 1, Some('b'), 0, Some('b')),
            ]
        );
    }
}
