//! Handler configuration read from the process environment.

use crate::validation;

use std::{collections, env};
use thiserror::Error;

/// Table holding the catalog records.
pub const TABLE_NAME_KEY: &str = "SERVICES_TABLE_NAME";
/// Comma-separated administrator caller ids.
pub const ADMIN_USERS_KEY: &str = "ADMIN_USERS";
/// Comma-separated fields a caller may update.
pub const UPDATABLE_FIELDS_KEY: &str = "UPDATABLE_FIELDS";

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A required key is missing or empty.
    #[error("missing configuration key: {0}")]
    MissingKey(&'static str),
}

/// Everything the handler needs besides the store client.
#[derive(Clone, Debug, PartialEq)]
pub struct HandlerConfig {
    /// Catalog table name.
    pub table_name: String,
    /// Callers allowed to scan every owner's records.
    pub admin_users: collections::HashSet<String>,
    /// Allow-list for updates, in the order used in error messages.
    pub updatable_fields: Vec<String>,
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

impl HandlerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: collections::HashMap<String, String> = env::vars().collect();
        Self::from_kv(&vars)
    }

    /// Load from a key-value map.
    pub fn from_kv(vars: &collections::HashMap<String, String>) -> Result<Self, ConfigError> {
        let table_name = vars
            .get(TABLE_NAME_KEY)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingKey(TABLE_NAME_KEY))?
            .to_string();
        let admin_users = vars
            .get(ADMIN_USERS_KEY)
            .map(|value| split_list(value).collect())
            .unwrap_or_default();
        let updatable_fields: Vec<String> = vars
            .get(UPDATABLE_FIELDS_KEY)
            .map(|value| split_list(value).collect())
            .unwrap_or_default();
        let updatable_fields = if updatable_fields.is_empty() {
            validation::DEFAULT_UPDATABLE_FIELDS
                .iter()
                .map(|field| field.to_string())
                .collect()
        } else {
            updatable_fields
        };
        Ok(Self {
            table_name,
            admin_users,
            updatable_fields,
        })
    }
}
