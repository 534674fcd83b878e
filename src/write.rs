//! Write operations against the catalog table.
//!
//! Both operations accept a condition guard so that writes only apply to
//! items that already exist.

/// Common arguments shared by write operations.
pub mod common;

/// Delete item operation for removing an item by key.
pub mod delete_item;

/// Update item operation for assigning top-level attributes.
pub mod update_item;
