//! Canonical record shapes shared by the collectors and the snapshot writer.

use serde::{Deserialize, Serialize};

/// A product price as collected from a retailer.
///
/// The markup source exposes prices as display strings (`"2,500원"`) and the
/// JSON API source as integers in won. The two are kept distinct on purpose:
/// downstream consumers have not settled on a unified numeric type, so the
/// asymmetry is surfaced here instead of being papered over at collection
/// time. [`std::fmt::Display`] renders both for the CSV cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Won(i64),
    Text(String),
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Won(amount) => write!(f, "{amount}"),
            Price::Text(text) => f.write_str(text),
        }
    }
}

/// One normalized promotion listing, the unit of snapshot output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    /// Retailer identifier, non-empty (e.g. `"emart24"`, `"GS25"`).
    pub brand: String,
    /// Product name, trimmed and non-empty. Items whose name cannot be
    /// extracted are dropped during collection, never emitted with an empty
    /// name.
    pub name: String,
    pub price: Price,
    /// Promotion label (`"1+1"`, `"2+1"`, `"3+1"`, `"SALE"`, `"덤증정"`, or a
    /// pass-through code the retailer introduced after this was written).
    pub event: String,
    /// Absolute image URL; relative paths are rewritten against the retailer
    /// origin during normalization.
    pub img_url: String,
}

impl DealRecord {
    /// Two records sharing this key are duplicates regardless of any other
    /// field; the first occurrence in encounter order wins.
    #[must_use]
    pub fn dedupe_key(&self) -> (&str, &str) {
        (&self.name, &self.event)
    }
}

/// One retailer-defined segment of the promotion catalog.
///
/// Categories are fixed at configuration time and iterated in declaration
/// order; there is no dynamic discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The query-parameter value the retailer expects (`"1"`, `"TOTAL"`, …).
    pub param: String,
    /// Display label, also the fallback event label for items carrying no
    /// explicit promotion tag.
    pub label: String,
}

impl Category {
    #[must_use]
    pub fn new(param: &str, label: &str) -> Self {
        Self {
            param: param.to_owned(),
            label: label.to_owned(),
        }
    }
}
