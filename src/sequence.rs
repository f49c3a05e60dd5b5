use std::borrow::Cow;
use std::hash::Hash;

/// An ordered, indexable collection that can be compared element by element
/// and rebuilt from a list of elements.
///
/// Slices, vectors and arrays expose their elements directly. Strings are
/// treated as sequences of `char`s, so the engine has exactly one code path
/// and patching a string gives back a `String`.
pub trait Sequence {
    type Item: Eq + Hash + Clone;
    type Owned;

    fn items(&self) -> Cow<'_, [Self::Item]>;

    fn assemble(items: Vec<Self::Item>) -> Self::Owned;
}

impl<T: Eq + Hash + Clone> Sequence for [T] {
    type Item = T;
    type Owned = Vec<T>;

    fn items(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self)
    }

    fn assemble(items: Vec<T>) -> Vec<T> {
        items
    }
}

impl<T: Eq + Hash + Clone> Sequence for Vec<T> {
    type Item = T;
    type Owned = Vec<T>;

    fn items(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }

    fn assemble(items: Vec<T>) -> Vec<T> {
        items
    }
}

impl<T: Eq + Hash + Clone, const N: usize> Sequence for [T; N] {
    type Item = T;
    type Owned = Vec<T>;

    fn items(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }

    fn assemble(items: Vec<T>) -> Vec<T> {
        items
    }
}

impl Sequence for str {
    type Item = char;
    type Owned = String;

    fn items(&self) -> Cow<'_, [char]> {
        Cow::Owned(self.chars().collect())
    }

    fn assemble(items: Vec<char>) -> String {
        items.into_iter().collect()
    }
}

impl Sequence for String {
    type Item = char;
    type Owned = String;

    fn items(&self) -> Cow<'_, [char]> {
        self.as_str().items()
    }

    fn assemble(items: Vec<char>) -> String {
        <str as Sequence>::assemble(items)
    }
}
