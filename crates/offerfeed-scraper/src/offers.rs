//! Offer extraction: feed JSON → [`DiscountRecord`]s plus the export buffer.
//!
//! The feed is `{"data": [category, ...]}` where each category carries a
//! validity window, a `link_title` and an `article` array. Categories or
//! articles missing required fields are skipped and counted; a feed whose
//! shape is wrong in a way the walk cannot recover from is reported as
//! [`FeedOutcome::MalformedFeed`] and nothing is exported.

use chrono::{NaiveDate, NaiveDateTime};
use offerfeed_core::DiscountRecord;
use serde_json::Value;

use crate::feed_value::{kind_of, present_field, scalar_text, str_field};
use crate::normalize::{
    clean_text, first_numeric_token, split_unit_price, strip_prefix, strip_suffix,
    truncate_at_first_tag,
};

/// Timestamp layout of `offer_date_valid_from` / `offer_date_valid_to`.
const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Boilerplate the feed puts in front of multi-variant descriptions.
const DESCRIPTION_BOILERPLATE: &str = "versch. Sorten";

/// Result of walking one offers feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The feed was walked to the end. The export may still be empty.
    Extracted(OfferExport),
    /// Body was not JSON, or `data` was missing or empty.
    NoData,
    /// The feed parsed but its structure could not be walked.
    MalformedFeed(String),
}

/// Entries left out of an export, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    /// Categories without a validity window or articles.
    pub categories: usize,
    /// Articles without a title or price.
    pub articles: usize,
    /// Articles flagged as online-only.
    pub online_only: usize,
}

impl SkipCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.categories + self.articles + self.online_only
    }
}

/// Everything one offers feed produced, ready for the writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferExport {
    /// Records in feed order.
    pub records: Vec<DiscountRecord>,
    /// Human-readable export: category headers and one line per record.
    pub buffer: String,
    pub skipped: SkipCounts,
    /// Highlight names supplied by the caller, passed through untouched.
    pub highlights: Vec<String>,
}

impl OfferExport {
    /// Number of offers written to the buffer.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// `true` when at least one category or article was left out.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.skipped.total() > 0
    }
}

/// Walks an offers feed body.
///
/// `highlights` is carried into the export unchanged.
#[must_use]
pub fn extract_offers(body: &str, highlights: Vec<String>) -> FeedOutcome {
    let root: Value = match serde_json::from_str(body) {
        Ok(root) => root,
        Err(e) => {
            tracing::debug!(error = %e, "offers body is not JSON");
            return FeedOutcome::NoData;
        }
    };

    if !root.is_object() {
        return FeedOutcome::MalformedFeed(format!("feed root is {}, not an object", kind_of(&root)));
    }

    let Some(data) = present_field(&root, "data") else {
        tracing::debug!("offers feed has no data");
        return FeedOutcome::NoData;
    };

    let Some(categories) = data.as_array() else {
        return FeedOutcome::MalformedFeed(format!("\"data\" is {}, not an array", kind_of(data)));
    };

    let mut export = OfferExport {
        highlights,
        ..OfferExport::default()
    };

    for (index, category) in categories.iter().enumerate() {
        if let Err(reason) = extract_category(&mut export, category) {
            return FeedOutcome::MalformedFeed(format!("category {index}: {reason}"));
        }
    }

    tracing::debug!(
        count = export.count(),
        skipped = export.skipped.total(),
        "offers feed extracted"
    );
    FeedOutcome::Extracted(export)
}

/// Appends one category's header and offer lines to `export`.
fn extract_category(export: &mut OfferExport, category: &Value) -> Result<(), String> {
    if !category.is_object() {
        return Err(format!("entry is {}, not an object", kind_of(category)));
    }

    let (Some(from), Some(to), Some(articles)) = (
        present_field(category, "offer_date_valid_from"),
        present_field(category, "offer_date_valid_to"),
        present_field(category, "article"),
    ) else {
        tracing::debug!("skipping category without validity window or articles");
        export.skipped.categories += 1;
        return Ok(());
    };

    let valid_from = parse_feed_date(from)?;
    let valid_to = parse_feed_date(to)?;
    let articles = articles
        .as_array()
        .ok_or_else(|| format!("\"article\" is {}, not an array", kind_of(articles)))?;
    let title = str_field(category, "link_title").ok_or("missing \"link_title\"")?;

    export
        .buffer
        .push_str(&format!("\n# {} ab {}\n", clean_text(title), valid_from));

    for (index, article) in articles.iter().enumerate() {
        match build_record(article, valid_from, valid_to)
            .map_err(|reason| format!("article {index}: {reason}"))?
        {
            ArticleOutcome::Record(record) => {
                export.buffer.push_str(&format_offer_line(&record));
                export.records.push(record);
            }
            ArticleOutcome::OnlineOnly => export.skipped.online_only += 1,
            ArticleOutcome::Incomplete => {
                tracing::debug!(article = index, "skipping article without title or price");
                export.skipped.articles += 1;
            }
        }
    }

    Ok(())
}

enum ArticleOutcome {
    Record(DiscountRecord),
    OnlineOnly,
    Incomplete,
}

fn build_record(
    article: &Value,
    valid_from: NaiveDate,
    valid_to: NaiveDate,
) -> Result<ArticleOutcome, String> {
    if !article.is_object() {
        return Err(format!("entry is {}, not an object", kind_of(article)));
    }

    // The feed sends this flag as a string; boolean `true` does not count.
    if str_field(article, "isOnline") == Some("true") {
        return Ok(ArticleOutcome::OnlineOnly);
    }

    let (Some(title), Some(price_info)) =
        (present_field(article, "title"), present_field(article, "price"))
    else {
        return Ok(ArticleOutcome::Incomplete);
    };
    if !price_info.is_object() {
        return Err(format!("\"price\" is {}, not an object", kind_of(price_info)));
    }
    let Some(price) = present_field(price_info, "price") else {
        return Ok(ArticleOutcome::Incomplete);
    };

    let title = title
        .as_str()
        .ok_or_else(|| format!("\"title\" is {}, not a string", kind_of(title)))?;
    let price = scalar_text(price)
        .ok_or_else(|| format!("\"price.price\" is {}, not a scalar", kind_of(price)))?;

    let mut builder =
        DiscountRecord::builder(title, strip_suffix(&price, "*"), valid_from, valid_to)
            .link(str_field(article, "image").unwrap_or_default())
            .quantity(str_field(article, "text_gebinde").unwrap_or_default())
            .description(describe(article));

    if let Some((amount, unit)) = str_field(article, "hp_grundpreis")
        .filter(|raw| !raw.is_empty())
        .and_then(split_unit_price)
    {
        builder = builder.base_price(amount, unit);
    }

    // The "UVP"/"statt" label stays on the stored value.
    if let Some(before) = str_field(price_info, "save_price")
        .filter(|raw| first_numeric_token(raw).is_some())
    {
        builder = builder.price_before(before);
    }

    Ok(ArticleOutcome::Record(builder.build()))
}

/// Short description plus the optional "more info" fragment.
fn describe(article: &Value) -> String {
    let short = truncate_at_first_tag(str_field(article, "description_short").unwrap_or_default());
    let extra = truncate_at_first_tag(str_field(article, "text_more_info").unwrap_or_default());
    let joined = if extra.is_empty() {
        short
    } else {
        format!("{short}, {extra}")
    };
    clean_text(strip_prefix(&joined, DESCRIPTION_BOILERPLATE))
}

fn parse_feed_date(value: &Value) -> Result<NaiveDate, String> {
    let raw = value
        .as_str()
        .ok_or_else(|| format!("validity date is {}, not a string", kind_of(value)))?;
    NaiveDateTime::parse_from_str(raw, FEED_TIMESTAMP_FORMAT)
        .map(|ts| ts.date())
        .map_err(|e| format!("invalid validity date \"{raw}\": {e}"))
}

/// Renders one export line:
/// `name;price €;link;quantity[ (amount/unit)][;description]`.
#[must_use]
pub fn format_offer_line(record: &DiscountRecord) -> String {
    let mut line = format!(
        "{};{} €;{};{}",
        record.name(),
        record.price(),
        record.link().unwrap_or_default(),
        record.quantity().unwrap_or_default(),
    );
    if let Some(label) = record.unit_price_label() {
        line.push_str(&format!(" ({label})"));
    }
    if let Some(description) = record.description() {
        line.push(';');
        line.push_str(description);
    }
    line.push('\n');
    line
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
