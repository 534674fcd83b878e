//! Catalog record and the store attribute schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Partition key attribute.
pub const SERVICE_ID: &str = "SERVICE_ID";
/// Service name attribute.
pub const SERVICE_NAME: &str = "SERVICE_NAME";
/// Domain attribute.
pub const SERVICE_DOMAIN: &str = "SERVICE_DOMAIN";
/// Deployment region attribute.
pub const SERVICE_REGION: &str = "SERVICE_REGION";
/// Service type attribute.
pub const SERVICE_TYPE: &str = "SERVICE_TYPE";
/// Runtime attribute.
pub const SERVICE_RUNTIME: &str = "SERVICE_RUNTIME";
/// Lifecycle status attribute.
pub const SERVICE_STATUS: &str = "SERVICE_STATUS";
/// Owner attribute.
pub const SERVICE_CREATED_BY: &str = "SERVICE_CREATED_BY";
/// Last-updated timestamp attribute.
pub const SERVICE_TIMESTAMP: &str = "SERVICE_TIMESTAMP";

/// Store attribute backing an updatable request field: `email` is `SERVICE_EMAIL`.
///
/// camelCase fields are split on their humps, so `createdBy` and `created_by`
/// both map to `SERVICE_CREATED_BY`.
pub fn attribute_name(field: &str) -> String {
    let mut name = String::from("SERVICE_");
    let mut after_lower = false;
    for c in field.chars() {
        if c.is_ascii_uppercase() && after_lower {
            name.push('_');
        }
        after_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        name.push(c.to_ascii_uppercase());
    }
    name
}

/// A catalog entry as stored.
///
/// Attributes beyond the named ones are carried opaquely in `extra`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ServiceRecord {
    /// Unique identifier.
    #[serde(rename = "SERVICE_ID")]
    pub id: String,
    /// Free-form description.
    #[serde(rename = "SERVICE_DESCRIPTION", default)]
    pub description: String,
    /// Contact email.
    #[serde(rename = "SERVICE_EMAIL", default)]
    pub email: String,
    /// Identifier of the owner.
    #[serde(rename = "SERVICE_CREATED_BY", default)]
    pub created_by: String,
    /// Last-updated timestamp, opaque to this crate.
    #[serde(rename = "SERVICE_TIMESTAMP", default)]
    pub timestamp: String,
    /// Remaining attributes.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
