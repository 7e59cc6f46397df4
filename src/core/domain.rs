//! Domain enums.
//!
//! Source: HISTORIC, SUPPLIER, HUMAN
//! Outcome: NONE, QUOTE_ACCEPTED, QUOTE_REJECTED
//! Decision: which branch of the decision tree produced the final price
//! Flag: per-event audit annotations

use serde::{Deserialize, Serialize};

/// Origin of a price signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    Historic,
    Supplier,
    Human,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Historic => "HISTORIC",
            Self::Supplier => "SUPPLIER",
            Self::Human => "HUMAN",
        }
    }
}

/// Outcome of a human quote. `None` for every non-HUMAN event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    None,
    QuoteAccepted,
    QuoteRejected,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::QuoteAccepted => "QUOTE_ACCEPTED",
            Self::QuoteRejected => "QUOTE_REJECTED",
        }
    }
}

/// Fixed-vocabulary label for the branch that produced the final price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    HumanAccepted,
    SupplierPlusBias,
    HistoricPlusBias,
    AnomalyRejected,
    FallbackNoData,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HumanAccepted => "HUMAN_ACCEPTED",
            Self::SupplierPlusBias => "SUPPLIER_PLUS_BIAS",
            Self::HistoricPlusBias => "HISTORIC_PLUS_BIAS",
            Self::AnomalyRejected => "ANOMALY_REJECTED",
            Self::FallbackNoData => "FALLBACK_NO_DATA",
        }
    }
}

/// Audit flag appended alongside a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    AnomalyRejected,
    NoData,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnomalyRejected => "ANOMALY_REJECTED",
            Self::NoData => "NO_DATA",
        }
    }
}
