use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    consistent_read: Option<bool>,
    expression_attribute_names: Option<collections::HashMap<String, String>>,
    expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    filter_expression: Option<String>,
    limit: Option<i32>,
    table_name: String,
}

/// Scan operation.
///
/// All pages are fetched and merged into a single output.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use platform_services::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let mut filter = common::condition::ConditionExpression::default();
/// filter.equals("SERVICE_CREATED_BY", common::condition::Binding::string("jane"));
/// let scan = read::scan::Scan {
///     filter: Some(filter),
///     table_name: "services".to_string(),
///     ..Default::default()
/// };
/// scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Whether to use strongly consistent reads.
    pub consistent_read: Option<bool>,
    /// Filter applied to every scanned item; an empty filter is not sent.
    pub filter: Option<common::condition::ConditionExpression>,
    /// The maximum number of items evaluated per page.
    pub limit: Option<i32>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<Scan> for ScanInput {
    fn from(scan: Scan) -> Self {
        let mut expression_attribute_names = None;
        let mut expression_attribute_values = None;
        let filter_expression = scan
            .filter
            .filter(|filter| !filter.is_empty())
            .map(|filter| {
                let operation: common::ExpressionInput = filter.into();
                operation.merge_into(
                    &mut expression_attribute_names,
                    &mut expression_attribute_values,
                )
            });
        Self {
            consistent_read: scan.consistent_read,
            expression_attribute_names,
            expression_attribute_values,
            filter_expression,
            limit: scan.limit,
            table_name: scan.table_name,
        }
    }
}

impl Scan {
    /// Execute the scan operation.
    #[tracing::instrument(name = "platform_services.scan", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.into();
        let mut paginator = client
            .scan()
            .set_consistent_read(scan.consistent_read)
            .set_expression_attribute_names(scan.expression_attribute_names)
            .set_expression_attribute_values(scan.expression_attribute_values)
            .set_filter_expression(scan.filter_expression)
            .set_limit(scan.limit)
            .table_name(scan.table_name)
            .into_paginator()
            .send();
        let mut items = Vec::new();
        let mut count = 0;
        let mut scanned_count = 0;
        while let Some(page) = paginator.next().await {
            let page = page?;
            count += page.count;
            scanned_count += page.scanned_count;
            if let Some(page_items) = page.items {
                items.extend(page_items);
            }
        }
        tracing::debug!(count, scanned_count, "scan complete");
        let output = operation::scan::ScanOutput::builder()
            .set_items(Some(items))
            .set_count(Some(count))
            .set_scanned_count(Some(scanned_count))
            .build();
        Ok(output)
    }
}
