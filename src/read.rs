//! Read operations against the catalog table.
//!
//! - Getting a single item by its key
//! - Scanning the table with an optional filter, across all pages

/// Get item operation for retrieving a single item by key.
pub mod get_item;

/// Scan operation for retrieving every item matching a filter.
pub mod scan;
