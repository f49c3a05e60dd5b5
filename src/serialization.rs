//! The array form of patchset records.
//!
//! A simple change is written `[action, position, element]` and a contextual
//! one `[action, [old_position, old_element], [new_position, new_element]]`,
//! where the action is its one-character symbol and missing elements are
//! `null`. [`RawChange`] is that shape before the action has been checked;
//! `Change` and `ContextChange` serialize through it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::change::{Action, Change, ContextChange};
use crate::error::{PatchError, PatchResult};

/// A patchset record as it comes off the wire.
///
/// Patchsets may hold raw records directly; they are checked when the
/// patchset is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawChange<T> {
    Contextual(String, (usize, Option<T>), (usize, Option<T>)),
    Simple(String, usize, T),
}

fn parse_action(symbol: &str) -> PatchResult<Action> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Action::try_from(c),
        _ => Err(PatchError::InvalidAction(symbol.to_string())),
    }
}

impl<T> TryFrom<RawChange<T>> for Change<T> {
    type Error = PatchError;

    fn try_from(raw: RawChange<T>) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawChange::Simple(action, position, element) => {
                Change::simple(parse_action(&action)?, position, element)
            }
            RawChange::Contextual(action, (old_position, old_element), (new_position, new_element)) => {
                Change::Contextual(ContextChange::new(
                    parse_action(&action)?,
                    old_position,
                    old_element,
                    new_position,
                    new_element,
                ))
            }
        })
    }
}

impl<T> From<Change<T>> for RawChange<T> {
    fn from(change: Change<T>) -> Self {
        match change {
            Change::Simple {
                action,
                position,
                element,
            } => RawChange::Simple(action.to_string(), position, element),
            Change::Contextual(c) => c.into(),
        }
    }
}

impl<T> From<ContextChange<T>> for RawChange<T> {
    fn from(c: ContextChange<T>) -> Self {
        RawChange::Contextual(
            c.action.to_string(),
            (c.old_position, c.old_element),
            (c.new_position, c.new_element),
        )
    }
}

impl<'a, T> From<&'a ContextChange<T>> for RawChange<&'a T> {
    fn from(c: &'a ContextChange<T>) -> Self {
        RawChange::Contextual(
            c.action.to_string(),
            (c.old_position, c.old_element.as_ref()),
            (c.new_position, c.new_element.as_ref()),
        )
    }
}

impl<'a, T> From<&'a Change<T>> for RawChange<&'a T> {
    fn from(change: &'a Change<T>) -> Self {
        match change {
            Change::Simple {
                action,
                position,
                element,
            } => RawChange::Simple(action.to_string(), *position, element),
            Change::Contextual(c) => c.into(),
        }
    }
}

impl<T: Serialize> Serialize for Change<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawChange::from(self).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Change<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawChange::<T>::deserialize(deserializer)?;
        Change::try_from(raw).map_err(D::Error::custom)
    }
}

impl<T: Serialize> Serialize for ContextChange<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawChange::from(self).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ContextChange<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Change::<T>::deserialize(deserializer)? {
            Change::Contextual(c) => Ok(c),
            Change::Simple { .. } => Err(D::Error::custom(
                "expected [action, [old_position, old_element], [new_position, new_element]]",
            )),
        }
    }
}
