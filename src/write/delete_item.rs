use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// delete item operation
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use platform_services::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     key: common::key::ItemKey {
///         name: "SERVICE_ID".to_string(),
///         value: "1".to_string(),
///     },
///     write_args: write::common::WriteArgs::guarded("services", "SERVICE_ID"),
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct DeleteItem {
    /// The key of the item to delete.
    pub key: common::key::ItemKey,
    /// Additional write arguments (table name, condition, return values).
    pub write_args: write::common::WriteArgs,
}

impl From<DeleteItem> for DeleteItemInput {
    fn from(delete_item: DeleteItem) -> Self {
        Self {
            key: delete_item.key.into(),
            write_operation: delete_item.write_args.into(),
        }
    }
}

impl DeleteItem {
    /// Execute the delete item operation.
    #[tracing::instrument(name = "platform_services.delete_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.into();
        let builder = client.delete_item().set_key(Some(delete_item.key));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}
