//! Schema Module - Trained-Model Column Catalog
//!
//! The authoritative description of what the trained classifier expects:
//! column order, numeric/indicator partition, categorical level orderings.

pub mod catalog;

pub use catalog::{SchemaCatalog, SCHEMA_VERSION};
