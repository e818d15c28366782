//! Catalog ingestion.
//!
//! One file read, one parse, one in-memory [`Catalog`]. Failures are fatal
//! for the invocation; a partial catalog is never returned.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::model::types::{Catalog, Product};

/// Errors that can occur while loading a catalog file.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: expected a top-level JSON array of products, found {found}")]
    NotAnArray { path: String, found: &'static str },

    #[error("{path}: product at index {index} is malformed")]
    Record {
        path: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON file containing an array of product objects and materialize
/// it into a [`Catalog`], preserving array order.
///
/// Recognized fields are typed on [`Product`]; unrecognized keys are kept
/// as opaque attributes. Any malformed element fails the whole load.
pub fn load_catalog(path: &Path) -> Result<Catalog, IngestError> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path_str.clone(),
        source,
    })?;

    let doc: Value = serde_json::from_str(&content).map_err(|source| IngestError::Parse {
        path: path_str.clone(),
        source,
    })?;

    let items = match doc {
        Value::Array(items) => items,
        other => {
            return Err(IngestError::NotAnArray {
                path: path_str,
                found: json_kind(&other),
            });
        }
    };

    let mut products = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let product: Product =
            serde_json::from_value(item).map_err(|source| IngestError::Record {
                path: path_str.clone(),
                index,
                source,
            })?;
        products.push(product);
    }

    let catalog = Catalog::new(products);
    if catalog.is_empty() {
        tracing::warn!(file = %path_str, "catalog file holds no products");
    } else {
        tracing::info!(file = %path_str, products = catalog.len(), "catalog loaded");
    }
    Ok(catalog)
}

fn json_kind(val: &Value) -> &'static str {
    match val {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_reports_not_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("products.json");
        fs::write(&file, r#"{"id":1,"name":"Mug"}"#).unwrap();

        let err = load_catalog(&file).unwrap_err();
        assert!(matches!(err, IngestError::NotAnArray { found: "an object", .. }));
    }

    #[test]
    fn malformed_element_reports_index() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("products.json");
        fs::write(&file, r#"[{"id":1,"name":"Mug"},{"id":2}]"#).unwrap();

        let err = load_catalog(&file).unwrap_err();
        match err {
            IngestError::Record { index, .. } => assert_eq!(index, 1),
            other => panic!("expected Record error, got {other:?}"),
        }
    }
}
