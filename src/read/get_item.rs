use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    consistent_read: Option<bool>,
    key: collections::HashMap<String, types::AttributeValue>,
    table_name: String,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use platform_services::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     key: common::key::ItemKey {
///         name: "SERVICE_ID".to_string(),
///         value: "1".to_string(),
///     },
///     table_name: "services".to_string(),
///     ..Default::default()
/// };
/// get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem {
    /// Whether to use a strongly consistent read.
    pub consistent_read: Option<bool>,
    /// The key of the item to retrieve.
    pub key: common::key::ItemKey,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<GetItem> for GetItemInput {
    fn from(get_item: GetItem) -> Self {
        Self {
            consistent_read: get_item.consistent_read,
            key: get_item.key.into(),
            table_name: get_item.table_name,
        }
    }
}

impl GetItem {
    /// Execute the get item operation.
    #[tracing::instrument(name = "platform_services.get_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.into();
        client
            .get_item()
            .set_consistent_read(get_item.consistent_read)
            .set_key(Some(get_item.key))
            .table_name(get_item.table_name)
            .send()
            .await
    }
}
