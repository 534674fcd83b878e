//! Store access used by the request handler.
//!
//! [`RecordGateway`] is the seam between request handling and the store: each
//! call is a single attempt that resolves to a payload or a [`GatewayError`].
//! [`DynamoGateway`] implements it over the typed DynamoDB operations.

use crate::{
    common::{self, condition},
    read, record, write,
};

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types,
};
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_dynamo::from_item;
use serde_json::Value;
use std::{error, fmt};
use thiserror::Error;

/// Why a store call failed, kept verbatim for operator logs.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{error_type} {message}")]
pub struct GatewayError {
    /// Machine-readable category, such as the service error code.
    pub error_type: String,
    /// Human-readable detail.
    pub message: String,
}

impl GatewayError {
    /// Build an error from its parts.
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

impl<E, R> From<SdkError<E, R>> for GatewayError
where
    E: ProvideErrorMetadata + error::Error + 'static,
    R: fmt::Debug,
{
    fn from(err: SdkError<E, R>) -> Self {
        let error_type = err.code().unwrap_or("SdkError").to_string();
        let message = match err.message() {
            Some(message) => message.to_string(),
            None => DisplayErrorContext(&err).to_string(),
        };
        Self {
            error_type,
            message,
        }
    }
}

impl From<serde_dynamo::Error> for GatewayError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::new("SerializationError", err.to_string())
    }
}

/// Point-read, filtered scan, update and remove over catalog records.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Fetch the record with `id`, or `None` when there is none.
    async fn read(&self, id: &str) -> Result<Option<record::ServiceRecord>, GatewayError>;

    /// Fetch every record matching `filter`; an empty filter matches all records.
    async fn scan(
        &self,
        filter: condition::ConditionExpression,
    ) -> Result<Vec<record::ServiceRecord>, GatewayError>;

    /// Assign `fields` on the record with `id` and return the updated record.
    async fn update(
        &self,
        id: &str,
        fields: IndexMap<String, Value>,
    ) -> Result<record::ServiceRecord, GatewayError>;

    /// Delete the record with `id`.
    async fn remove(&self, id: &str) -> Result<(), GatewayError>;
}

/// [`RecordGateway`] backed by a DynamoDB table keyed by `SERVICE_ID`.
#[derive(Clone, Debug)]
pub struct DynamoGateway {
    client: Client,
    table_name: String,
}

impl DynamoGateway {
    /// Gateway over `table_name`.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn key(id: &str) -> common::key::ItemKey {
        common::key::ItemKey {
            name: record::SERVICE_ID.to_string(),
            value: id.to_string(),
        }
    }
}

/// Store assignments for an update: each field under its attribute name, then
/// the refreshed last-updated timestamp.
fn update_assignments(fields: IndexMap<String, Value>, timestamp: String) -> Vec<(String, Value)> {
    let mut set: Vec<(String, Value)> = fields
        .into_iter()
        .map(|(field, value)| (record::attribute_name(&field), value))
        .collect();
    set.push((record::SERVICE_TIMESTAMP.to_string(), Value::String(timestamp)));
    set
}

#[async_trait]
impl RecordGateway for DynamoGateway {
    async fn read(&self, id: &str) -> Result<Option<record::ServiceRecord>, GatewayError> {
        let get_item = read::get_item::GetItem {
            key: Self::key(id),
            table_name: self.table_name.clone(),
            ..Default::default()
        };
        let output = get_item.send(&self.client).await?;
        let record = output.item.map(from_item).transpose()?;
        Ok(record)
    }

    async fn scan(
        &self,
        filter: condition::ConditionExpression,
    ) -> Result<Vec<record::ServiceRecord>, GatewayError> {
        let scan = read::scan::Scan {
            filter: Some(filter),
            table_name: self.table_name.clone(),
            ..Default::default()
        };
        let output = scan.send(&self.client).await?;
        let mut records = Vec::new();
        for item in output.items.unwrap_or_default() {
            records.push(from_item(item)?);
        }
        Ok(records)
    }

    async fn update(
        &self,
        id: &str,
        fields: IndexMap<String, Value>,
    ) -> Result<record::ServiceRecord, GatewayError> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let update_item = write::update_item::UpdateItem {
            key: Self::key(id),
            set: update_assignments(fields, timestamp),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::AllNew),
                ..write::common::WriteArgs::guarded(&self.table_name, record::SERVICE_ID)
            },
        };
        let output = update_item.send(&self.client).await?;
        match output.attributes {
            Some(attributes) => Ok(from_item(attributes)?),
            None => Err(GatewayError::new(
                "MissingAttributes",
                format!("update of {id} returned no attributes"),
            )),
        }
    }

    async fn remove(&self, id: &str) -> Result<(), GatewayError> {
        let delete_item = write::delete_item::DeleteItem {
            key: Self::key(id),
            write_args: write::common::WriteArgs::guarded(&self.table_name, record::SERVICE_ID),
        };
        delete_item.send(&self.client).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_update_assignments_map_fields_and_refresh_timestamp() {
        let fields = IndexMap::from([
            ("email".to_string(), json!("a@b.c")),
            ("description".to_string(), json!("d")),
        ]);
        let actual = update_assignments(fields, "2017-01-01T00:00:00.000Z".to_string());
        assert_eq!(
            actual,
            vec![
                ("SERVICE_EMAIL".to_string(), json!("a@b.c")),
                ("SERVICE_DESCRIPTION".to_string(), json!("d")),
                (
                    "SERVICE_TIMESTAMP".to_string(),
                    json!("2017-01-01T00:00:00.000Z")
                ),
            ]
        );
    }

    #[test]
    fn test_gateway_error_display_keeps_type_and_message() {
        let err = GatewayError::new("svtfoe", "starco");
        assert_eq!(err.to_string(), "svtfoe starco");
    }

    #[test]
    fn test_gateway_error_from_serialization_error() {
        let item = std::collections::HashMap::from([(
            "SERVICE_ID".to_string(),
            types::AttributeValue::Bool(true),
        )]);
        let err: GatewayError = from_item::<_, record::ServiceRecord>(item)
            .unwrap_err()
            .into();
        assert_eq!(err.error_type, "SerializationError");
    }

    #[test]
    fn test_record_from_item() {
        let item = std::collections::HashMap::from([
            (
                "SERVICE_ID".to_string(),
                types::AttributeValue::S("b100dM00n".to_string()),
            ),
            (
                "SERVICE_EMAIL".to_string(),
                types::AttributeValue::S("gonnaGetALittle@Wild.com".to_string()),
            ),
            (
                "SERVICE_REGION".to_string(),
                types::AttributeValue::S("mewni".to_string()),
            ),
        ]);
        let record: record::ServiceRecord = from_item(item).unwrap();
        assert_eq!(record.id, "b100dM00n");
        assert_eq!(record.email, "gonnaGetALittle@Wild.com");
        assert_eq!(record.extra.get("SERVICE_REGION"), Some(&json!("mewni")));
    }
}
