//! Rule evaluator: one event in, one priced verdict out.
//!
//! Rule A: candidate selection (latest historic; supplier if fresh)
//! Rule B: decision tree over source x outcome
//! Rule C: bias learning from accepted human quotes
//! Rule D: bias time decay, decision-scoped only
//! Rule E: circuit breaker against runaway human prices
//!
//! The evaluator is a total function over the validated event space; every
//! path lands on exactly one decision tag.

use super::cache::ItemQuotes;
use super::domain::{Decision, Flag, Outcome, Source};
use super::event::PriceEvent;
use super::state::{floor_div, ItemState};

/// A supplier observation older than this is ignored. Exactly this old is
/// still fresh.
pub const SUPPLIER_FRESHNESS_SECS: i64 = 3_600;

/// Learning-state age beyond which the bias is halved for the current
/// decision. Exactly this old does not decay.
pub const BIAS_DECAY_AFTER_SECS: i64 = 604_800;

/// Circuit breaker threshold: human price strictly above this percentage of
/// the supplier price is anomalous.
pub const BREAKER_THRESHOLD_PCT: i64 = 150;

/// What the evaluator decided for one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub final_price_cents: i64,
    pub decision: Decision,
    pub flags: Vec<Flag>,
}

/// Price one event against the item's learned state and cached observations.
///
/// Mutates `item` only when learning fires (Rule C); decay never writes back.
pub fn evaluate(event: &PriceEvent, item: &mut ItemState, quotes: &ItemQuotes) -> Verdict {
    let ts = event.timestamp;

    // Rule A
    let historic_price = quotes.latest_historic.map(|o| o.price_cents);
    let supplier_price = quotes
        .latest_supplier
        .filter(|o| ts - o.timestamp <= SUPPLIER_FRESHNESS_SECS)
        .map(|o| o.price_cents);

    // Rule D
    let decayed = item.last_updated_ts > 0 && ts - item.last_updated_ts > BIAS_DECAY_AFTER_SECS;
    let effective_bias = if decayed {
        floor_div(item.bias_cents, 2)
    } else {
        item.bias_cents
    };

    let mut flags = Vec::new();

    // Rule B
    let (final_price_cents, decision) = match (event.source, event.outcome) {
        (Source::Human, Outcome::QuoteAccepted) => {
            // Rule E: only meaningful against a positive fresh supplier price.
            let anomaly = matches!(
                supplier_price,
                Some(supplier) if supplier > 0
                    && event.price_cents * 100 > supplier * BREAKER_THRESHOLD_PCT
            );
            if anomaly {
                flags.push(Flag::AnomalyRejected);
                let (price, _) =
                    fallback(supplier_price, historic_price, effective_bias, &mut flags);
                (price, Decision::AnomalyRejected)
            } else {
                // Rule C
                if let Some(supplier) = supplier_price {
                    if supplier > 0 {
                        item.learn_delta(event.price_cents - supplier, ts);
                    }
                }
                (event.price_cents, Decision::HumanAccepted)
            }
        }
        // Rejected human: the engine answers despite the human's number.
        // HUMAN with no outcome and every non-HUMAN source: standard query.
        _ => fallback(supplier_price, historic_price, effective_bias, &mut flags),
    };

    Verdict {
        final_price_cents,
        decision,
        flags,
    }
}

/// Supplier-plus-bias, else historic-plus-bias, else no data at all.
fn fallback(
    supplier_price: Option<i64>,
    historic_price: Option<i64>,
    bias_cents: i64,
    flags: &mut Vec<Flag>,
) -> (i64, Decision) {
    if let Some(supplier) = supplier_price {
        (supplier + bias_cents, Decision::SupplierPlusBias)
    } else if let Some(historic) = historic_price {
        (historic + bias_cents, Decision::HistoricPlusBias)
    } else {
        flags.push(Flag::NoData);
        (0, Decision::FallbackNoData)
    }
}
