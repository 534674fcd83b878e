#![deny(missing_docs)]

//! # Platform Services
//!
//! A CRUD request handler for a service catalog stored in a DynamoDB table.
//!
//! ## Overview
//!
//! The handler receives a normalized request (method, path id, query, body and
//! caller identity) and answers with a [`handler::Success`] or a typed
//! [`handler::Failure`]:
//! - `GET` with an id reads one record, without one it scans the catalog
//! - `PUT` updates the allow-listed fields of an existing record
//! - `DELETE` removes an existing record
//!
//! Scans are scoped to the caller's own records unless the caller is an admin,
//! and every store failure is logged with its raw cause before the caller gets a
//! generic message.
//!
//! ## Quick Example
//!
//! ```no_run
//! use aws_sdk_dynamodb::Client;
//! use platform_services::{gateway, handler, notifier};
//! use std::collections::HashSet;
//!
//! # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
//! let handler = handler::Handler::new(
//!     gateway::DynamoGateway::new(client, "services"),
//!     notifier::TracingNotifier,
//!     HashSet::from(["ecl!psa".to_string()]),
//!     vec!["description".to_string(), "email".to_string()],
//! );
//! let request: handler::Request = serde_json::from_str(
//!     r#"{"method": "GET", "query": {"domain": "jazz"}, "callerId": "Mete0ra"}"#,
//! )?;
//! // scans with "SERVICE_CREATED_BY = :SERVICE_CREATED_BY AND SERVICE_DOMAIN = :SERVICE_DOMAIN"
//! let outcome = handler.handle(request).await;
//! println!("{}", handler::render(&outcome)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@handler`] - Request dispatch and response rendering
//! - [`mod@filter`] - Scan filter construction
//! - [`mod@validation`] - Update payload validation
//! - [`mod@gateway`] - Store access contract and its DynamoDB implementation
//! - [`mod@read`] and [`mod@write`] - Typed DynamoDB operations

/// Common building blocks for condition expressions and keys.
pub mod common;

/// Configuration loaded at start-up.
pub mod config;

/// Scan filter construction from query parameters.
pub mod filter;

/// Record store access.
pub mod gateway;

/// Request dispatch.
pub mod handler;

/// Tracing subscriber setup.
pub mod logging;

/// Operator log sink.
pub mod notifier;

/// Read operations for retrieving catalog records.
///
/// This module provides operations for:
/// - Getting individual records by id
/// - Scanning the table with a filter
pub mod read;

/// Catalog record and attribute schema.
pub mod record;

/// Admin lookup.
pub mod roster;

/// Update payload validation.
pub mod validation;

/// Write operations for modifying catalog records.
///
/// This module provides operations for:
/// - Updating top-level attributes
/// - Deleting records by id
pub mod write;
