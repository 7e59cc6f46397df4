//! Audit records: one canonical JSON line per processed event.

use serde::{Deserialize, Serialize};

use super::domain::{Decision, Flag, Outcome, Source};
use super::identity::{EventId, ItemId};
use super::json_canon::{to_canon_json_bytes, CanonJsonError};

/// The engine's answer for one event, as written to `audit_log.jsonl`.
///
/// `state_hash_after` is the fingerprint of the engine state immediately
/// after the event committed; `bias_cents_after` is the item's stored bias at
/// that same instant (not the decayed value used for the decision).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub event_id: EventId,
    pub item_id: ItemId,
    pub timestamp: i64,
    pub source: Source,
    pub outcome: Outcome,
    pub final_price_cents: i64,
    pub decision: Decision,
    pub flags: Vec<Flag>,
    pub bias_cents_after: i64,
    pub state_hash_after: String,
}

impl AuditRecord {
    /// Canonical byte form of this record, without the trailing newline.
    pub fn to_canon_bytes(&self) -> Result<Vec<u8>, CanonJsonError> {
        to_canon_json_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_line_is_canonical_and_key_sorted() {
        let record = AuditRecord {
            event_id: EventId::new("e1").unwrap(),
            item_id: ItemId::new("P1").unwrap(),
            timestamp: 2_000,
            source: Source::Historic,
            outcome: Outcome::None,
            final_price_cents: 10_200,
            decision: Decision::SupplierPlusBias,
            flags: vec![],
            bias_cents_after: 0,
            state_hash_after: "ab".repeat(32),
        };
        let bytes = record.to_canon_bytes().unwrap();
        let line = String::from_utf8(bytes).unwrap();
        assert!(line.starts_with(r#"{"bias_cents_after":0,"decision":"SUPPLIER_PLUS_BIAS","#));
        assert!(!line.contains(' '), "no insignificant whitespace");

        let back: AuditRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
