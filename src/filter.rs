//! Scan filter construction from query parameters and caller identity.
//!
//! The ownership clause built here is the authorization boundary of the
//! collection read: callers outside the admin roster only ever see their own
//! services.

use crate::{common::condition, record};

use serde::Deserialize;

/// Bound parameter holding `lastUpdatedAfter`.
pub const AFTER: &str = ":AFTER";
/// Bound parameter holding `lastUpdatedBefore`.
pub const BEFORE: &str = ":BEFORE";

/// Query parameters recognized by the collection read.
///
/// Unrecognized parameters are ignored and empty values count as absent.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanQuery {
    /// Service name.
    pub service: Option<String>,
    /// Domain.
    pub domain: Option<String>,
    /// Deployment region.
    pub region: Option<String>,
    /// Service type.
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    /// Runtime.
    pub runtime: Option<String>,
    /// Owner; only honoured for admins.
    #[serde(alias = "created_by")]
    pub created_by: Option<String>,
    /// Lifecycle status.
    pub status: Option<String>,
    /// Upper end of the last-updated range.
    #[serde(alias = "last_updated_before")]
    pub last_updated_before: Option<String>,
    /// Lower end of the last-updated range.
    #[serde(alias = "last_updated_after")]
    pub last_updated_after: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Build the scan filter for `caller_id`.
///
/// Clauses come out in a fixed order: the last-updated range (only when both
/// ends are given), ownership, then the catalog attributes.
///
/// ```rust
/// use platform_services::filter;
///
/// let query = filter::ScanQuery {
///     domain: Some("jazz".to_string()),
///     ..Default::default()
/// };
/// let condition = filter::build(&query, "jane", false);
/// assert_eq!(
///     condition.to_string(),
///     "SERVICE_CREATED_BY = :SERVICE_CREATED_BY AND SERVICE_DOMAIN = :SERVICE_DOMAIN"
/// );
/// ```
pub fn build(query: &ScanQuery, caller_id: &str, is_admin: bool) -> condition::ConditionExpression {
    let mut filter = condition::ConditionExpression::default();
    if let (Some(after), Some(before)) = (
        present(&query.last_updated_after),
        present(&query.last_updated_before),
    ) {
        filter.between(
            record::SERVICE_TIMESTAMP,
            (BEFORE, condition::Binding::string(before)),
            (AFTER, condition::Binding::string(after)),
        );
    }
    let owner = if is_admin {
        present(&query.created_by)
    } else {
        Some(caller_id)
    };
    if let Some(owner) = owner {
        filter.equals(record::SERVICE_CREATED_BY, condition::Binding::string(owner));
    }
    let attributes = [
        (record::SERVICE_NAME, &query.service),
        (record::SERVICE_DOMAIN, &query.domain),
        (record::SERVICE_REGION, &query.region),
        (record::SERVICE_TYPE, &query.service_type),
        (record::SERVICE_RUNTIME, &query.runtime),
        (record::SERVICE_STATUS, &query.status),
    ];
    for (attribute, value) in attributes {
        if let Some(value) = present(value) {
            filter.equals(attribute, condition::Binding::string(value));
        }
    }
    filter
}
