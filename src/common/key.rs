use aws_sdk_dynamodb::types;
use std::collections;

/// Partition key of a single item.
///
/// Catalog tables are keyed by a string partition key only.
///
/// ```rust
/// use platform_services::common::key;
///
/// let key = key::ItemKey {
///     name: "SERVICE_ID".to_string(),
///     value: "1".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ItemKey {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: String,
}

impl From<ItemKey> for collections::HashMap<String, types::AttributeValue> {
    fn from(key: ItemKey) -> Self {
        Self::from([(key.name, types::AttributeValue::S(key.value))])
    }
}
