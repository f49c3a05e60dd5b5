use bitflags::bitflags;

use crate::change::ContextChange;

bitflags! {
    /// Optional callbacks a listener wants to receive.
    ///
    /// Traversers only call an optional method when its bit is set; without
    /// it they fall back to plain discards.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Notify once when the old sequence runs out first.
        const FINISHED_A = 1;
        /// Notify once when the new sequence runs out first.
        const FINISHED_B = 1 << 1;
        /// Report aligned mismatches as one `change` (balanced traversal).
        const CHANGE = 1 << 2;
    }
}

/// Receives the events of [`traverse_sequences`](super::traverse_sequences)
/// and [`traverse_balanced`](super::traverse_balanced), in order.
///
/// Events borrow the elements of the sequences being compared; call
/// [`ContextChange::cloned`] to keep them.
pub trait Callbacks<T> {
    /// Both elements are part of the longest common subsequence.
    fn on_match(&mut self, event: ContextChange<&T>);

    /// The old element at `event.old_position` is not in the new sequence.
    fn discard_a(&mut self, event: ContextChange<&T>);

    /// The new element at `event.new_position` is not in the old sequence.
    fn discard_b(&mut self, event: ContextChange<&T>);

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Called at most once, and only with [`Capabilities::FINISHED_A`].
    fn finished_a(&mut self, _event: ContextChange<&T>) {}

    /// Called at most once, and only with [`Capabilities::FINISHED_B`].
    fn finished_b(&mut self, _event: ContextChange<&T>) {}

    /// Called only with [`Capabilities::CHANGE`].
    fn change(&mut self, _event: ContextChange<&T>) {}
}

impl<T, C: Callbacks<T> + ?Sized> Callbacks<T> for &mut C {
    fn on_match(&mut self, event: ContextChange<&T>) {
        (**self).on_match(event);
    }

    fn discard_a(&mut self, event: ContextChange<&T>) {
        (**self).discard_a(event);
    }

    fn discard_b(&mut self, event: ContextChange<&T>) {
        (**self).discard_b(event);
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn finished_a(&mut self, event: ContextChange<&T>) {
        (**self).finished_a(event);
    }

    fn finished_b(&mut self, event: ContextChange<&T>) {
        (**self).finished_b(event);
    }

    fn change(&mut self, event: ContextChange<&T>) {
        (**self).change(event);
    }
}
