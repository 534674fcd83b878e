//! Common building blocks for store expressions.
//!
//! This module provides the types shared by the read and write operations:
//! condition clauses with typed parameter bindings, item keys, and the
//! expression triple handed to the DynamoDB client.

/// Condition clauses and typed parameter bindings for filters and write guards.
pub mod condition;

/// Item keys for point reads and writes.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// expression, attribute names and attribute values ready for the client
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    /// Move names and values into the request maps and return the bare expression.
    ///
    /// Empty maps stay `None`: DynamoDB rejects empty `ExpressionAttribute*` maps.
    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> String {
        if !self.expression_attribute_names.is_empty() {
            names
                .get_or_insert_with(collections::HashMap::new)
                .extend(self.expression_attribute_names);
        }
        if !self.expression_attribute_values.is_empty() {
            values
                .get_or_insert_with(collections::HashMap::new)
                .extend(self.expression_attribute_values);
        }
        self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::both_sides("a", "b", "a AND b")]
    #[case::empty_left("", "b", "b")]
    #[case::empty_right("a", "", "a")]
    fn test_get_expression(#[case] left: &str, #[case] right: &str, #[case] expected: &str) {
        let actual = get_expression(left.to_string(), " AND ", right.to_string());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_merge_into_skips_empty_maps() {
        let mut names = None;
        let mut values = None;
        let operation = ExpressionInput {
            expression: "attribute_exists(SERVICE_ID)".to_string(),
            ..Default::default()
        };
        let expression = operation.merge_into(&mut names, &mut values);
        assert_eq!(expression, "attribute_exists(SERVICE_ID)");
        assert_eq!(names, None);
        assert_eq!(values, None);
    }

    #[test]
    fn test_merge_into_extends_existing_maps() {
        let mut names = Some(collections::HashMap::from([(
            "#a".to_string(),
            "a".to_string(),
        )]));
        let mut values = None;
        let operation = ExpressionInput {
            expression: "#b = :b".to_string(),
            expression_attribute_names: collections::HashMap::from([(
                "#b".to_string(),
                "b".to_string(),
            )]),
            expression_attribute_values: collections::HashMap::from([(
                ":b".to_string(),
                types::AttributeValue::S("c".to_string()),
            )]),
        };
        operation.merge_into(&mut names, &mut values);
        assert_eq!(
            names,
            Some(collections::HashMap::from([
                ("#a".to_string(), "a".to_string()),
                ("#b".to_string(), "b".to_string()),
            ]))
        );
        assert_eq!(
            values,
            Some(collections::HashMap::from([(
                ":b".to_string(),
                types::AttributeValue::S("c".to_string()),
            )]))
        );
    }
}
