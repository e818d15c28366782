//! Search layer facade.
//!
//! - **[`query`]**: query parsing (budget phrase extraction, normalization)
//!   and the linear-scan substring matcher over the catalog.

pub mod query;

pub use query::{Query, SearchError, SortMode, apply_sort, search};
