//! Per-item price cache.
//!
//! Tracks the most recent HISTORIC and SUPPLIER observation per item while a
//! run is in flight. Never persisted: every run and every replay rebuilds it
//! from the event stream it is processing.

use std::collections::BTreeMap;

use super::domain::Source;
use super::event::PriceEvent;
use super::identity::ItemId;

/// One cached observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub price_cents: i64,
    pub timestamp: i64,
}

/// Latest observations for a single item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemQuotes {
    pub latest_historic: Option<Observation>,
    pub latest_supplier: Option<Observation>,
}

/// Run-scoped cache over all items seen so far.
#[derive(Debug, Default)]
pub struct PriceCache {
    items: BTreeMap<ItemId, ItemQuotes>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event's observation. HUMAN events carry opinions, not
    /// observations, and leave the cache untouched.
    pub fn observe(&mut self, event: &PriceEvent) {
        let slot = match event.source {
            Source::Historic => {
                &mut self.items.entry(event.item_id.clone()).or_default().latest_historic
            }
            Source::Supplier => {
                &mut self.items.entry(event.item_id.clone()).or_default().latest_supplier
            }
            Source::Human => return,
        };
        *slot = Some(Observation {
            price_cents: event.price_cents,
            timestamp: event.timestamp,
        });
    }

    /// Latest observations for `item`, empty if nothing has been seen.
    pub fn quotes(&self, item: &ItemId) -> ItemQuotes {
        self.items.get(item).copied().unwrap_or_default()
    }
}
