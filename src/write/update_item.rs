use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Separator between SET actions.
const SET_SEPARATOR: &str = ", ";

fn get_set_expression<T: Serialize>(set: Vec<(String, T)>) -> Result<common::ExpressionInput> {
    let mut operations = Vec::with_capacity(set.len());
    for (index, (name, value)) in set.into_iter().enumerate() {
        let placeholder = format!("#{name}");
        let value_placeholder = format!(":set{index}");
        let value = to_attribute_value(value)?;
        let expression = format!("{placeholder} = {value_placeholder}");
        let operation = common::ExpressionInput {
            expression,
            expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
            expression_attribute_values: collections::HashMap::from([(value_placeholder, value)]),
        };
        operations.push(operation);
    }
    let mut operation = common::ExpressionInput::merge(SET_SEPARATOR, operations);
    operation.expression = format!("SET {}", operation.expression);
    Ok(operation)
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation assigning new values to top-level attributes.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use platform_services::{common, write};
/// use serde_json::Value;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::ItemKey {
///         name: "SERVICE_ID".to_string(),
///         value: "1".to_string(),
///     },
///     set: vec![(
///         "SERVICE_EMAIL".to_string(),
///         Value::String("team@example.com".to_string()),
///     )],
///     write_args: write::common::WriteArgs::guarded("services", "SERVICE_ID"),
/// };
/// // SET #SERVICE_EMAIL = :set0, only if attribute_exists(SERVICE_ID)
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The key of the item to update.
    pub key: common::key::ItemKey,
    /// `(attribute, value)` assignments, applied in order.
    pub set: Vec<(String, T)>,
    /// Additional write arguments (table name, condition, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let operation = get_set_expression(update_item.set)?;
        let update_expression = write_operation.merge_expression(operation);
        let operation = Self {
            key: update_item.key.into(),
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize> UpdateItem<T> {
    /// Execute the update item operation.
    #[tracing::instrument(name = "platform_services.update_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}
