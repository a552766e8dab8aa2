//! Normalized in-memory records produced by the extraction pipeline.
//!
//! Both record types are immutable once built. Every text field is passed
//! through [`clean_text`] exactly once, at construction, so no field can
//! carry an embedded newline or surrounding whitespace.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::text::clean_text;

/// One discount offer taken from a store's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountRecord {
    name: String,
    price: String,
    price_before: Option<String>,
    quantity: Option<String>,
    base_price: Option<String>,
    base_price_unit: Option<String>,
    link: Option<String>,
    description: Option<String>,
    valid_from: NaiveDate,
    valid_to: NaiveDate,
    category: Option<String>,
}

impl DiscountRecord {
    /// Starts a record from the three fields every offer must have.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        price: impl Into<String>,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
    ) -> DiscountRecordBuilder {
        DiscountRecordBuilder {
            name: name.into(),
            price: price.into(),
            valid_from,
            valid_to,
            price_before: None,
            quantity: None,
            base_price: None,
            link: None,
            description: None,
            category: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current price with a decimal comma, e.g. `"0,99"`.
    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Reference price as printed in the feed, label included (`"UVP 1.49"`).
    #[must_use]
    pub fn price_before(&self) -> Option<&str> {
        self.price_before.as_deref()
    }

    #[must_use]
    pub fn quantity(&self) -> Option<&str> {
        self.quantity.as_deref()
    }

    /// Amount part of the per-unit price (`"0.99"` for `"0.99/kg"`).
    #[must_use]
    pub fn base_price(&self) -> Option<&str> {
        self.base_price.as_deref()
    }

    /// Unit part of the per-unit price (`"kg"` for `"0.99/kg"`).
    #[must_use]
    pub fn base_price_unit(&self) -> Option<&str> {
        self.base_price_unit.as_deref()
    }

    /// Image URL. The feed carries no product page link, so the image stands in.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn valid_from(&self) -> NaiveDate {
        self.valid_from
    }

    #[must_use]
    pub fn valid_to(&self) -> NaiveDate {
        self.valid_to
    }

    /// Reserved; the extraction path never sets it.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Base price rendered as `"<amount>/<unit>"`, present only when both
    /// halves are.
    #[must_use]
    pub fn unit_price_label(&self) -> Option<String> {
        match (self.base_price(), self.base_price_unit()) {
            (Some(amount), Some(unit)) => Some(format!("{amount}/{unit}")),
            _ => None,
        }
    }
}

/// Collects optional fields for a [`DiscountRecord`]; normalization happens
/// once, in [`DiscountRecordBuilder::build`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DiscountRecordBuilder {
    name: String,
    price: String,
    valid_from: NaiveDate,
    valid_to: NaiveDate,
    price_before: Option<String>,
    quantity: Option<String>,
    base_price: Option<(String, String)>,
    link: Option<String>,
    description: Option<String>,
    category: Option<String>,
}

impl DiscountRecordBuilder {
    pub fn price_before(mut self, value: impl Into<String>) -> Self {
        self.price_before = Some(value.into());
        self
    }

    pub fn quantity(mut self, value: impl Into<String>) -> Self {
        self.quantity = Some(value.into());
        self
    }

    /// Sets amount and unit together. Unless both halves are non-empty after
    /// cleaning, neither is stored.
    pub fn base_price(mut self, amount: impl Into<String>, unit: impl Into<String>) -> Self {
        self.base_price = Some((amount.into(), unit.into()));
        self
    }

    pub fn link(mut self, value: impl Into<String>) -> Self {
        self.link = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    /// Cleans every text field and freezes the record.
    ///
    /// Optional fields that are empty after cleaning are stored as `None`.
    #[must_use]
    pub fn build(self) -> DiscountRecord {
        let (base_price, base_price_unit) = self
            .base_price
            .and_then(|(amount, unit)| {
                clean_optional(Some(amount)).zip(clean_optional(Some(unit)))
            })
            .unzip();

        DiscountRecord {
            name: clean_text(&self.name),
            price: clean_text(&self.price).replace('.', ","),
            price_before: clean_optional(self.price_before),
            quantity: clean_optional(self.quantity),
            base_price,
            base_price_unit,
            link: clean_optional(self.link),
            description: clean_optional(self.description),
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            category: clean_optional(self.category),
        }
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value.map(|v| clean_text(&v)).filter(|v| !v.is_empty())
}

/// One store from the store-search endpoint.
///
/// All seven fields are required; the locator refuses to build a record
/// from an entry missing any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreRecord {
    id: String,
    name: String,
    street: String,
    city: String,
    postal_code: String,
    latitude: String,
    longitude: String,
}

impl StoreRecord {
    #[must_use]
    pub fn new(
        id: &str,
        name: &str,
        street: &str,
        city: &str,
        postal_code: &str,
        latitude: &str,
        longitude: &str,
    ) -> Self {
        Self {
            id: clean_text(id),
            name: clean_text(name),
            street: clean_text(street),
            city: clean_text(city),
            postal_code: clean_text(postal_code),
            latitude: clean_text(latitude),
            longitude: clean_text(longitude),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    #[must_use]
    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> &str {
        &self.longitude
    }
}

/// Listing line: `<id>: <name>, <street>, <postalCode> <city>`.
impl fmt::Display for StoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, {}, {} {}",
            self.id, self.name, self.street, self.postal_code, self.city
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn minimal() -> DiscountRecordBuilder {
        DiscountRecord::builder("Apfel", "0.99", date(2024, 1, 1), date(2024, 1, 7))
    }

    #[test]
    fn build_cleans_name() {
        let record =
            DiscountRecord::builder(" Apfel\nrot\u{2028}", "1", date(2024, 1, 1), date(2024, 1, 7))
                .build();
        assert_eq!(record.name(), "Apfel rot");
    }

    #[test]
    fn build_uses_decimal_comma_for_price() {
        let record = minimal().build();
        assert_eq!(record.price(), "0,99");
    }

    #[test]
    fn optional_fields_default_to_none() {
        let record = minimal().build();
        assert!(record.price_before().is_none());
        assert!(record.quantity().is_none());
        assert!(record.base_price().is_none());
        assert!(record.base_price_unit().is_none());
        assert!(record.link().is_none());
        assert!(record.description().is_none());
        assert!(record.category().is_none());
        assert!(record.unit_price_label().is_none());
    }

    #[test]
    fn empty_optional_fields_collapse_to_none() {
        let record = minimal().quantity("  ").link("\n").description("").build();
        assert!(record.quantity().is_none());
        assert!(record.link().is_none());
        assert!(record.description().is_none());
    }

    #[test]
    fn optional_fields_are_cleaned() {
        let record = minimal()
            .quantity("1 kg\n")
            .description("Frisch\nlecker ")
            .price_before(" UVP 1.49")
            .build();
        assert_eq!(record.quantity(), Some("1 kg"));
        assert_eq!(record.description(), Some("Frisch lecker"));
        assert_eq!(record.price_before(), Some("UVP 1.49"));
    }

    #[test]
    fn unit_price_label_joins_amount_and_unit() {
        let record = minimal().base_price("0.99 ", " kg").build();
        assert_eq!(record.base_price(), Some("0.99"));
        assert_eq!(record.base_price_unit(), Some("kg"));
        assert_eq!(record.unit_price_label().as_deref(), Some("0.99/kg"));
    }

    #[test]
    fn base_price_needs_both_halves() {
        for (amount, unit) in [("", "kg"), ("0.99", " "), ("\n", "\n")] {
            let record = minimal().base_price(amount, unit).build();
            assert!(record.base_price().is_none(), "amount kept for {amount:?}/{unit:?}");
            assert!(record.base_price_unit().is_none(), "unit kept for {amount:?}/{unit:?}");
            assert!(record.unit_price_label().is_none());
        }
    }

    #[test]
    fn serializes_cleaned_fields_and_iso_dates() {
        let record = minimal()
            .quantity("1 kg\n")
            .base_price("0.99", "kg")
            .build();
        let value = serde_json::to_value(&record).expect("record serializes");

        assert_eq!(value["name"], "Apfel");
        assert_eq!(value["price"], "0,99");
        assert_eq!(value["quantity"], "1 kg");
        assert_eq!(value["base_price"], "0.99");
        assert_eq!(value["base_price_unit"], "kg");
        assert_eq!(value["valid_from"], "2024-01-01");
        assert_eq!(value["valid_to"], "2024-01-07");
        assert!(value["link"].is_null());
        assert!(value["category"].is_null());
    }

    #[test]
    fn store_record_serializes_every_field() {
        let store = StoreRecord::new("1234", "Netto", "Hauptstr. 1", "Mainz", "55116", "50.0", "8.27");
        let value = serde_json::to_value(&store).expect("store serializes");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1234",
                "name": "Netto",
                "street": "Hauptstr. 1",
                "city": "Mainz",
                "postal_code": "55116",
                "latitude": "50.0",
                "longitude": "8.27"
            })
        );
    }

    #[test]
    fn validity_window_is_kept() {
        let record = minimal().build();
        assert_eq!(record.valid_from(), date(2024, 1, 1));
        assert_eq!(record.valid_to(), date(2024, 1, 7));
    }

    #[test]
    fn store_record_display_matches_listing_format() {
        let store = StoreRecord::new(
            "1234",
            "Markt Mitte\n",
            "Hauptstr. 1",
            "Aschaffenburg",
            "63739",
            "49.97",
            "9.14",
        );
        assert_eq!(
            store.to_string(),
            "1234: Markt Mitte, Hauptstr. 1, 63739 Aschaffenburg"
        );
        assert_eq!(store.latitude(), "49.97");
        assert_eq!(store.longitude(), "9.14");
    }
}
