//! Wire types and per-item extraction outcomes for the retailer sources.
//!
//! ## Observed shape of the event-goods search API
//!
//! The response is `{"results": [...]}`; on the last page `results` is an
//! empty list (there is no explicit "last page" flag). Some responses arrive
//! double-encoded — the body is a JSON string containing the document —
//! which the transport layer unwraps before these types see it.
//!
//! `price` has been observed both as a JSON number and as a numeric string
//! (`"1500.00"`), so it is modeled as a raw [`serde_json::Value`] and coerced
//! during normalization. `attFileNm` is a full CDN URL in every observed
//! response, but normalization still guards the relative-path case.

use serde::Deserialize;

/// Top-level response from the event-goods search endpoint.
#[derive(Debug, Deserialize)]
pub struct GoodsSearchResponse {
    /// Empty or absent on the page past the last — the pagination
    /// exhaustion signal.
    #[serde(default)]
    pub results: Vec<EventGoods>,
}

/// A single promotion item from the search API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGoods {
    /// Product display name; may carry surrounding whitespace.
    #[serde(default)]
    pub goods_nm: String,

    /// Price in won; number or numeric string depending on the item.
    #[serde(default)]
    pub price: Option<serde_json::Value>,

    /// Product image URL.
    #[serde(default)]
    pub att_file_nm: String,

    /// Nested promotion-type descriptor; absent for plain sale items.
    #[serde(default)]
    pub event_type_sp: Option<EventTypeSp>,
}

#[derive(Debug, Deserialize)]
pub struct EventTypeSp {
    #[serde(default)]
    pub code: String,
}

/// Raw field extraction from one HTML item container, before normalization.
#[derive(Debug, Clone)]
pub struct RawMarkupItem {
    pub name: String,
    pub price_text: String,
    /// Text of the optional promotion badge; `None` falls back to the
    /// enclosing category's label.
    pub badge: Option<String>,
    pub img_src: String,
}

/// Why a single item was dropped instead of collected.
///
/// Skips never abort the page or category; they are aggregated into run
/// statistics so skip rates stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    EmptyName,
    MissingPrice,
    MissingImage,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SkipReason::MissingName => "missing name",
            SkipReason::EmptyName => "empty name",
            SkipReason::MissingPrice => "missing price",
            SkipReason::MissingImage => "missing image",
        }
    }
}
