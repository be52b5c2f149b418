//! Data module - practice table loading and catalogue queries

mod catalog;
mod loader;

pub use catalog::{Catalog, CatalogError, PracticeRecord};
pub use loader::{Dataset, LoaderError};
