//! Store-search extraction and the plain-text store listing.
//!
//! Unlike offers, store entries are all-or-nothing: the first entry missing
//! any required field rejects the whole response.

use offerfeed_core::StoreRecord;
use serde_json::Value;

use crate::feed_value::{kind_of, present_field, scalar_text};

/// Fields every store entry must carry, in [`StoreRecord::new`] order.
const REQUIRED_FIELDS: [&str; 7] = [
    "store_id",
    "store_name",
    "street",
    "city",
    "post_code",
    "coord_latitude",
    "coord_longitude",
];

const LISTING_HEADER: &str = "  ID     Location";
const LISTING_FOOTER: &str = "Ende.";

/// Result of walking one store-search response.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Listed(Vec<StoreRecord>),
    /// Body was not JSON, or `data` was missing or empty.
    NoData,
    /// Entry `index` lacks `field`; nothing from the response is usable.
    Incomplete { index: usize, field: &'static str },
    MalformedFeed(String),
}

/// Walks a store-search body into [`StoreRecord`]s.
#[must_use]
pub fn extract_stores(body: &str) -> StoreOutcome {
    let root: Value = match serde_json::from_str(body) {
        Ok(root) => root,
        Err(e) => {
            tracing::debug!(error = %e, "store search body is not JSON");
            return StoreOutcome::NoData;
        }
    };

    if !root.is_object() {
        return StoreOutcome::MalformedFeed(format!(
            "store search root is {}, not an object",
            kind_of(&root)
        ));
    }
    let Some(data) = present_field(&root, "data") else {
        return StoreOutcome::NoData;
    };
    let Some(entries) = data.as_array() else {
        return StoreOutcome::MalformedFeed(format!("\"data\" is {}, not an array", kind_of(data)));
    };

    let mut stores = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            return StoreOutcome::MalformedFeed(format!(
                "store {index} is {}, not an object",
                kind_of(entry)
            ));
        }

        let [id, name, street, city, postal_code, latitude, longitude] =
            match required_values(entry) {
                Ok(values) => values,
                Err(field) => {
                    tracing::warn!(store = index, field, "store entry incomplete; discarding listing");
                    return StoreOutcome::Incomplete { index, field };
                }
            };
        stores.push(StoreRecord::new(
            &id,
            &name,
            &street,
            &city,
            &postal_code,
            &latitude,
            &longitude,
        ));
    }

    StoreOutcome::Listed(stores)
}

/// Text of every required field, or the name of the first one missing.
fn required_values(entry: &Value) -> Result<[String; 7], &'static str> {
    let mut values: [String; 7] = Default::default();
    for (slot, field) in values.iter_mut().zip(REQUIRED_FIELDS) {
        *slot = present_field(entry, field)
            .and_then(scalar_text)
            .ok_or(field)?;
    }
    Ok(values)
}

/// Renders the listing printed in store-lookup mode: a header, one line per
/// store, a blank line and the closing banner.
#[must_use]
pub fn render_listing(stores: &[StoreRecord]) -> String {
    let mut out = String::from(LISTING_HEADER);
    out.push('\n');
    for store in stores {
        out.push_str(&store.to_string());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(LISTING_FOOTER);
    out
}
