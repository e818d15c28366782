//! Query parsing and catalog matching.
//!
//! Matching is a full linear scan: O(catalog size x average field length)
//! per query. The catalog is small and in-memory, so no index is kept.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::types::{Catalog, Product};

/// Errors from query construction.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("query is not valid text: {0}")]
    InvalidQuery(String),
}

/// Result ordering for a search run.
///
/// The default keeps catalog insertion order; price sorts are stable, so
/// equal prices also keep catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortMode {
    #[default]
    CatalogOrder,
    PriceAsc,
    PriceDesc,
}

/// "under 10k" / "below 15k" style budget phrases.
static BUDGET_K: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:below|under|less than|<=|<)\s*(\d+)\s*k\b").expect("budget-k regex")
});

/// "under 10000" / "below 15000" style budget phrases.
static BUDGET_NUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:below|under|less than|<=|<)\s*(\d{3,7})").expect("budget regex"));

/// A parsed, normalized search query.
///
/// Budget phrases embedded in the raw text ("phones under 15000") are
/// extracted into `max_price` and stripped from the match text, so the
/// remaining words are what gets substring-matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    max_price: Option<f64>,
}

impl Query {
    /// Parse a raw query string.
    ///
    /// Fails only when the input is not usable text (interior NUL from a
    /// hostile caller); empty input parses fine and simply matches nothing.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        if raw.contains('\0') {
            return Err(SearchError::InvalidQuery(
                "contains an embedded NUL byte".into(),
            ));
        }

        let lowered = raw.to_lowercase();
        let (remainder, max_price) = extract_max_price(&lowered);
        let text = remainder.split_whitespace().collect::<Vec<_>>().join(" ");

        Ok(Self { text, max_price })
    }

    /// Override the price cap, regardless of what the text said.
    pub fn with_budget(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Normalized match text with any budget clause removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    /// A query with neither match text nor a price cap matches nothing.
    pub fn is_vacuous(&self) -> bool {
        self.text.is_empty() && self.max_price.is_none()
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(cap) = self.max_price
            && effective_price(product) > cap
        {
            return false;
        }
        // A budget-only query (text fully consumed by the clause) matches
        // everything within budget.
        self.text.is_empty() || self.matches_text(product)
    }

    fn matches_text(&self, product: &Product) -> bool {
        let fields = [
            Some(product.name.as_str()),
            product.description.as_deref(),
            product.category.as_deref(),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|f| f.to_lowercase().contains(&self.text))
    }
}

/// Pull a price cap out of a lowercased query, returning the query text
/// with the matched clause removed.
fn extract_max_price(q: &str) -> (String, Option<f64>) {
    if let Some(caps) = BUDGET_K.captures(q) {
        let m = caps.get(0).expect("whole match");
        if let Ok(n) = caps[1].parse::<f64>() {
            let rest = format!("{}{}", &q[..m.start()], &q[m.end()..]);
            return (rest, Some(n * 1000.0));
        }
    }
    if let Some(caps) = BUDGET_NUM.captures(q) {
        let m = caps.get(0).expect("whole match");
        if let Ok(n) = caps[1].parse::<f64>() {
            let rest = format!("{}{}", &q[..m.start()], &q[m.end()..]);
            return (rest, Some(n));
        }
    }
    (q.to_string(), None)
}

/// Products with no usable price sort and filter as price 0.
fn effective_price(product: &Product) -> f64 {
    product.price.unwrap_or(0.0)
}

/// Scan the catalog and return matching products in catalog order.
///
/// Pure function over `(catalog, query)`: running it twice yields identical
/// results. An empty query returns nothing rather than dumping the catalog.
pub fn search<'a>(catalog: &'a Catalog, query: &Query) -> Vec<&'a Product> {
    if query.is_vacuous() {
        return Vec::new();
    }
    catalog.iter().filter(|p| query.matches(p)).collect()
}

/// Reorder hits in place. `CatalogOrder` is a no-op; the price sorts are
/// stable.
pub fn apply_sort(hits: &mut [&Product], mode: SortMode) {
    match mode {
        SortMode::CatalogOrder => {}
        SortMode::PriceAsc => {
            hits.sort_by(|a, b| effective_price(a).total_cmp(&effective_price(b)));
        }
        SortMode::PriceDesc => {
            hits.sort_by(|a, b| effective_price(b).total_cmp(&effective_price(a)));
        }
    }
}
