pub mod types;

pub use types::{Catalog, Product, ProductId};
