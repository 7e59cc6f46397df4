//! Price event wire record and semantic validation.
//!
//! One event per line of `events.jsonl`, exactly six fields. Parse errors and
//! semantic violations are both INVALID_EVENT at the pipeline layer; nothing
//! downstream ever sees an invalid event.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::domain::{Outcome, Source};
use super::identity::{EventId, ItemId};

/// Semantic violations a structurally well-formed event can still carry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventError {
    #[error("event_id must be a non-empty string")]
    EmptyEventId,
    #[error("item_id must be a non-empty string")]
    EmptyItemId,
    #[error("price_cents must be >= 0, got {price_cents}")]
    NegativePrice { price_cents: i64 },
    #[error("{source_kind} event carries outcome {outcome}; outcome must be NONE unless source is HUMAN")]
    OutcomeWithoutHuman {
        source_kind: &'static str,
        outcome: &'static str,
    },
}

/// A single price signal from the input log.
///
/// All monetary values are integer cents, all timestamps integer seconds
/// since a fixed epoch. Unknown fields are a parse error: the wire format is
/// exactly these six keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceEvent {
    pub event_id: EventId,
    pub item_id: ItemId,
    pub timestamp: i64,
    pub source: Source,
    pub price_cents: i64,
    pub outcome: Outcome,
}

impl PriceEvent {
    /// Check the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.event_id.is_empty() {
            return Err(EventError::EmptyEventId);
        }
        if self.item_id.is_empty() {
            return Err(EventError::EmptyItemId);
        }
        if self.price_cents < 0 {
            return Err(EventError::NegativePrice {
                price_cents: self.price_cents,
            });
        }
        if self.source != Source::Human && self.outcome != Outcome::None {
            return Err(EventError::OutcomeWithoutHuman {
                source_kind: self.source.as_str(),
                outcome: self.outcome.as_str(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(source: Source, outcome: Outcome, price_cents: i64) -> PriceEvent {
        PriceEvent {
            event_id: EventId::new("e1").unwrap(),
            item_id: ItemId::new("P1").unwrap(),
            timestamp: 1_000,
            source,
            price_cents,
            outcome,
        }
    }

    #[test]
    fn valid_events_pass() {
        event(Source::Historic, Outcome::None, 0).validate().unwrap();
        event(Source::Human, Outcome::QuoteAccepted, 10_500).validate().unwrap();
        event(Source::Human, Outcome::None, 10_500).validate().unwrap();
    }

    #[test]
    fn negative_price_is_invalid() {
        let err = event(Source::Supplier, Outcome::None, -1).validate().unwrap_err();
        assert!(matches!(err, EventError::NegativePrice { price_cents: -1 }));
    }

    #[test]
    fn outcome_requires_human_source() {
        let err = event(Source::Supplier, Outcome::QuoteRejected, 100)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EventError::OutcomeWithoutHuman { .. }));
    }

    #[test]
    fn wire_form_rejects_unknown_fields_and_float_timestamps() {
        let extra = r#"{"event_id":"e1","item_id":"P1","timestamp":1,"source":"HISTORIC","price_cents":5,"outcome":"NONE","note":"x"}"#;
        assert!(serde_json::from_str::<PriceEvent>(extra).is_err());

        let fractional = r#"{"event_id":"e1","item_id":"P1","timestamp":1.5,"source":"HISTORIC","price_cents":5,"outcome":"NONE"}"#;
        assert!(serde_json::from_str::<PriceEvent>(fractional).is_err());
    }

    #[test]
    fn wire_form_requires_every_field() {
        let missing = r#"{"event_id":"e1","item_id":"P1","timestamp":1,"source":"HISTORIC","price_cents":5}"#;
        assert!(serde_json::from_str::<PriceEvent>(missing).is_err());
    }
}
