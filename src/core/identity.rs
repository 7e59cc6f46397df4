//! Identity atoms.
//!
//! EventId: opaque unique identifier carried by every price event.
//! ItemId: key identifying a priced item.
//!
//! Both are validated non-empty strings. Their `Ord` impls (plain byte order)
//! define the canonical iteration order of the persisted maps and sets, so
//! serialization never depends on hash-table ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::EventError;

/// Event identifier - non-empty opaque string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(s: impl Into<String>) -> Result<Self, EventError> {
        let s = s.into();
        if s.is_empty() {
            Err(EventError::EmptyEventId)
        } else {
            Ok(Self(s))
        }
    }

    /// Mint a generated id. Only the synthetic generator creates new ids.
    pub(crate) fn generated(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({:?})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item identifier - non-empty string key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(s: impl Into<String>) -> Result<Self, EventError> {
        let s = s.into();
        if s.is_empty() {
            Err(EventError::EmptyItemId)
        } else {
            Ok(Self(s))
        }
    }

    /// Mint a catalog id. Only the synthetic generator creates new ids.
    pub(crate) fn generated(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({:?})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_empty_strings() {
        assert!(EventId::new("").is_err());
        assert!(ItemId::new("").is_err());
        assert_eq!(EventId::new("e1").unwrap().as_str(), "e1");
    }

    #[test]
    fn item_ids_order_by_bytes() {
        let a = ItemId::new("P1").unwrap();
        let b = ItemId::new("P2").unwrap();
        assert!(a < b);
    }
}
