//! Normalization from raw per-source extractions to [`cvdeals_core::DealRecord`].
//!
//! Pure functions: no I/O, no panics. Callers are expected to have already
//! filtered items whose required fields are missing; the remaining soft
//! failures (empty-after-trim name) surface as `None`.

use cvdeals_core::{DealRecord, Price};

use crate::types::{EventGoods, RawMarkupItem};

/// Normalizes one HTML-extracted item.
///
/// Trims all text fields, falls back to the enclosing category's label when
/// the item carries no promotion badge, and absolutizes the image URL.
/// Returns `None` when the name is empty after trimming — such records are
/// dropped, not emitted with an empty name.
#[must_use]
pub fn normalize_markup_item(
    raw: RawMarkupItem,
    brand: &str,
    category_label: &str,
    origin: &str,
) -> Option<DealRecord> {
    let name = raw.name.trim().to_owned();
    if name.is_empty() {
        return None;
    }

    let event = raw
        .badge
        .as_deref()
        .map(str::trim)
        .filter(|badge| !badge.is_empty())
        .unwrap_or(category_label)
        .to_owned();

    Some(DealRecord {
        brand: brand.to_owned(),
        name,
        price: Price::Text(raw.price_text.trim().to_owned()),
        event,
        img_url: absolutize_img_url(origin, &raw.img_src),
    })
}

/// Normalizes one search-API item.
///
/// Maps the nested event-type code to its display label (falling back to the
/// category label when no code is present), coerces the price to won, and
/// drops items whose name is empty after trimming.
#[must_use]
pub fn normalize_api_item(
    goods: EventGoods,
    brand: &str,
    category_label: &str,
    origin: &str,
) -> Option<DealRecord> {
    let name = goods.goods_nm.trim().to_owned();
    if name.is_empty() {
        return None;
    }

    let event = match goods.event_type_sp {
        Some(sp) if !sp.code.is_empty() => event_label_for_code(&sp.code),
        _ => category_label.to_owned(),
    };

    Some(DealRecord {
        brand: brand.to_owned(),
        name,
        price: Price::Won(coerce_price(goods.price.as_ref())),
        event,
        img_url: absolutize_img_url(origin, &goods.att_file_nm),
    })
}

/// Rewrites a relative image path to an absolute URL against the retailer
/// origin. Already-absolute URLs pass through unchanged.
#[must_use]
pub fn absolutize_img_url(origin: &str, src: &str) -> String {
    if src.starts_with("http") {
        src.to_owned()
    } else {
        format!("{origin}{src}")
    }
}

/// Maps a promotion-type code to its display label.
///
/// Unrecognized codes pass through verbatim so a new retailer-side code
/// shows up in snapshots instead of vanishing.
#[must_use]
pub fn event_label_for_code(code: &str) -> String {
    match code {
        "ONE_TO_ONE" => "1+1".to_owned(),
        "TWO_TO_ONE" => "2+1".to_owned(),
        "GIFT" => "덤증정".to_owned(),
        other => other.to_owned(),
    }
}

/// Coerces the API's price field to an integer number of won.
///
/// Accepts a JSON number or a numeric string (`"1500.0"` → `1500`). Any
/// missing or unparseable value coerces to `0` — the item is kept, not
/// skipped.
#[must_use]
// Prices fit comfortably in i64; the truncation mirrors int(float(x)).
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_price(value: Option<&serde_json::Value>) -> i64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map_or(0, |f| f as i64),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().map_or(0, |f| f as i64),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventTypeSp;
    use serde_json::json;

    fn markup_item(name: &str, badge: Option<&str>, img_src: &str) -> RawMarkupItem {
        RawMarkupItem {
            name: name.to_owned(),
            price_text: " 2,500원 ".to_owned(),
            badge: badge.map(str::to_owned),
            img_src: img_src.to_owned(),
        }
    }

    fn api_item(name: &str, price: serde_json::Value, code: Option<&str>) -> EventGoods {
        EventGoods {
            goods_nm: name.to_owned(),
            price: Some(price),
            att_file_nm: "https://cdn.example/goods.jpg".to_owned(),
            event_type_sp: code.map(|c| EventTypeSp {
                code: c.to_owned(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // normalize_markup_item
    // -----------------------------------------------------------------------

    #[test]
    fn markup_item_trims_name_and_price() {
        let record = normalize_markup_item(
            markup_item("  바나나우유  ", None, "/img/a.png"),
            "emart24",
            "1+1",
            "https://emart24.co.kr",
        )
        .unwrap();
        assert_eq!(record.name, "바나나우유");
        assert_eq!(record.price, cvdeals_core::Price::Text("2,500원".to_owned()));
    }

    #[test]
    fn markup_item_badge_overrides_category_label() {
        let record = normalize_markup_item(
            markup_item("콜라", Some("2+1"), "/img/a.png"),
            "emart24",
            "1+1",
            "https://emart24.co.kr",
        )
        .unwrap();
        assert_eq!(record.event, "2+1");
    }

    #[test]
    fn markup_item_falls_back_to_category_label_without_badge() {
        let record = normalize_markup_item(
            markup_item("콜라", None, "/img/a.png"),
            "emart24",
            "SALE",
            "https://emart24.co.kr",
        )
        .unwrap();
        assert_eq!(record.event, "SALE");
    }

    #[test]
    fn markup_item_blank_badge_falls_back_to_category_label() {
        let record = normalize_markup_item(
            markup_item("콜라", Some("   "), "/img/a.png"),
            "emart24",
            "3+1",
            "https://emart24.co.kr",
        )
        .unwrap();
        assert_eq!(record.event, "3+1");
    }

    #[test]
    fn markup_item_empty_name_is_dropped() {
        let record = normalize_markup_item(
            markup_item("   ", None, "/img/a.png"),
            "emart24",
            "1+1",
            "https://emart24.co.kr",
        );
        assert!(record.is_none());
    }

    // -----------------------------------------------------------------------
    // absolutize_img_url
    // -----------------------------------------------------------------------

    #[test]
    fn relative_image_path_is_rewritten_to_absolute() {
        assert_eq!(
            absolutize_img_url("https://emart24.co.kr", "/img/x.png"),
            "https://emart24.co.kr/img/x.png"
        );
    }

    #[test]
    fn absolute_image_url_passes_through_unchanged() {
        assert_eq!(
            absolutize_img_url("https://emart24.co.kr", "https://other.example/x.png"),
            "https://other.example/x.png"
        );
    }

    // -----------------------------------------------------------------------
    // event_label_for_code
    // -----------------------------------------------------------------------

    #[test]
    fn known_event_codes_map_to_display_labels() {
        assert_eq!(event_label_for_code("ONE_TO_ONE"), "1+1");
        assert_eq!(event_label_for_code("TWO_TO_ONE"), "2+1");
        assert_eq!(event_label_for_code("GIFT"), "덤증정");
    }

    #[test]
    fn unknown_event_code_passes_through() {
        assert_eq!(event_label_for_code("UNKNOWN_CODE"), "UNKNOWN_CODE");
    }

    // -----------------------------------------------------------------------
    // coerce_price
    // -----------------------------------------------------------------------

    #[test]
    fn coerce_price_parses_numeric_string() {
        assert_eq!(coerce_price(Some(&json!("1500.0"))), 1500);
    }

    #[test]
    fn coerce_price_truncates_json_number() {
        assert_eq!(coerce_price(Some(&json!(1800.0))), 1800);
    }

    #[test]
    fn coerce_price_defaults_to_zero_on_garbage() {
        assert_eq!(coerce_price(Some(&json!("N/A"))), 0);
    }

    #[test]
    fn coerce_price_defaults_to_zero_when_missing() {
        assert_eq!(coerce_price(None), 0);
        assert_eq!(coerce_price(Some(&serde_json::Value::Null)), 0);
    }

    // -----------------------------------------------------------------------
    // normalize_api_item
    // -----------------------------------------------------------------------

    #[test]
    fn api_item_maps_event_code() {
        let record = normalize_api_item(
            api_item("비타500", json!("1500.00"), Some("ONE_TO_ONE")),
            "GS25",
            "전체",
            "http://gs25.gsretail.com",
        )
        .unwrap();
        assert_eq!(record.event, "1+1");
        assert_eq!(record.price, cvdeals_core::Price::Won(1500));
    }

    #[test]
    fn api_item_without_code_uses_category_label() {
        let record = normalize_api_item(
            api_item("비타500", json!(1500), None),
            "GS25",
            "전체",
            "http://gs25.gsretail.com",
        )
        .unwrap();
        assert_eq!(record.event, "전체");
    }

    #[test]
    fn api_item_bad_price_becomes_zero_not_a_skip() {
        let record = normalize_api_item(
            api_item("비타500", json!("N/A"), Some("GIFT")),
            "GS25",
            "전체",
            "http://gs25.gsretail.com",
        )
        .unwrap();
        assert_eq!(record.price, cvdeals_core::Price::Won(0));
    }

    #[test]
    fn api_item_empty_name_is_dropped() {
        let record = normalize_api_item(
            api_item("  ", json!(1500), None),
            "GS25",
            "전체",
            "http://gs25.gsretail.com",
        );
        assert!(record.is_none());
    }
}
