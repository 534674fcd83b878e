use crate::common;

use aws_sdk_dynamodb::types;
use std::collections;

/// Write parameters resolved into expression strings and attribute maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WriteInput {
    pub(crate) condition_expression: Option<String>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) return_values: Option<types::ReturnValue>,
    pub(crate) table_name: String,
}

impl WriteInput {
    /// Merge an expression operation into this write operation.
    pub(crate) fn merge_expression(&mut self, operation: common::ExpressionInput) -> String {
        operation.merge_into(
            &mut self.expression_attribute_names,
            &mut self.expression_attribute_values,
        )
    }
}

/// Arguments common to update and delete operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// Condition that must hold on the stored item for the write to succeed.
    ///
    /// A failed condition surfaces as a conditional check error from the store.
    pub condition: Option<common::condition::ConditionExpression>,
    /// Which item attributes to return in the response.
    pub return_values: Option<types::ReturnValue>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl WriteArgs {
    /// Arguments for a write that only applies to an item already carrying `attribute`.
    pub fn guarded(table_name: &str, attribute: &str) -> Self {
        let mut condition = common::condition::ConditionExpression::default();
        condition.exists(attribute);
        Self {
            condition: Some(condition),
            table_name: table_name.to_string(),
            ..Default::default()
        }
    }
}

impl From<WriteArgs> for WriteInput {
    fn from(write_args: WriteArgs) -> Self {
        let mut operation = Self {
            return_values: write_args.return_values,
            table_name: write_args.table_name,
            ..Default::default()
        };
        if let Some(condition) = write_args.condition.filter(|condition| !condition.is_empty()) {
            let condition_expression = operation.merge_expression(condition.into());
            operation.condition_expression = Some(condition_expression);
        }
        operation
    }
}

/// apply common write operation settings to a builder
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_operation:expr) => {
        $builder
            .set_condition_expression($write_operation.condition_expression)
            .set_expression_attribute_names($write_operation.expression_attribute_names)
            .set_expression_attribute_values($write_operation.expression_attribute_values)
            .set_return_values($write_operation.return_values)
            .table_name($write_operation.table_name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::unguarded(
        WriteArgs {
            table_name: "a".to_string(),
            ..Default::default()
        },
        WriteInput {
            table_name: "a".to_string(),
            ..Default::default()
        }
    )]
    #[case::guarded(
        WriteArgs::guarded("a", "b"),
        WriteInput {
            condition_expression: Some(
                "attribute_exists(b)".to_string()
            ),
            table_name: "a".to_string(),
            ..Default::default()
        }
    )]
    fn test_write_args(#[case] args: WriteArgs, #[case] expected: WriteInput) {
        let actual: WriteInput = args.into();
        assert_eq!(actual, expected);
    }
}
