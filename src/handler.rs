//! Request dispatch for the service catalog.
//!
//! [`Handler::handle`] checks the request shape, routes by method and turns every
//! store interaction into exactly one [`Outcome`]. Failures are logged once
//! through the [`Notifier`] with their raw cause, while the caller only sees a
//! category and a generic message.

use crate::{
    filter,
    gateway::{GatewayError, RecordGateway},
    notifier::Notifier,
    record,
    roster::AdminRoster,
    validation::{self, ValidationOutcome},
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use thiserror::Error;

const METHOD_REQUIRED: &str = "method cannot be empty";
const ID_REQUIRED: &str = "service id is required";
const UNEXPECTED_ERROR: &str = "unexpected error occured";
const NOTHING_TO_UPDATE: &str = "No input data. Nothing to update service";

/// Request verbs served by the handler.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Method {
    /// Point-read by id, or a filtered scan without one.
    Get,
    /// Update of an existing record.
    Put,
    /// Removal of an existing record.
    Delete,
}

/// A method string that is not one of the served verbs.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown method: {0:?}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        if method.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if method.eq_ignore_ascii_case("PUT") {
            Ok(Self::Put)
        } else if method.eq_ignore_ascii_case("DELETE") {
            Ok(Self::Delete)
        } else {
            Err(UnknownMethod(method.to_string()))
        }
    }
}

/// Decode `null` as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep string methods only; any other JSON value reaches the method check as absent.
fn lenient_method<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(method) => Ok(Some(method)),
        _ => Ok(None),
    }
}

/// Path parameters of a request.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct PathParams {
    /// Record id; empty counts as absent.
    pub id: Option<String>,
}

/// Normalized invocation event.
///
/// `null` in place of `path`, `query` or `callerId` decodes as the default.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    /// Request verb, matched without regard to ASCII case.
    #[serde(deserialize_with = "lenient_method")]
    pub method: Option<String>,
    /// Path parameters.
    #[serde(deserialize_with = "null_as_default")]
    pub path: PathParams,
    /// Query parameters for the collection read.
    #[serde(deserialize_with = "null_as_default")]
    pub query: filter::ScanQuery,
    /// Update payload.
    pub body: Option<Value>,
    /// Resolved identity of the requester.
    #[serde(deserialize_with = "null_as_default")]
    pub caller_id: String,
}

/// Failure category exposed to the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// The request is malformed or its payload is rejected.
    BadRequest,
    /// The addressed record does not exist.
    NotFound,
    /// A store call failed.
    InternalServerError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::BadRequest => "BadRequest",
            Self::NotFound => "NotFound",
            Self::InternalServerError => "InternalServerError",
        };
        f.write_str(kind)
    }
}

/// A failed request.
///
/// `cause` is operator detail and never reaches the caller.
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
#[error("{kind}: {message}")]
pub struct Failure {
    /// Category.
    #[serde(rename = "errorType")]
    pub kind: ErrorKind,
    /// Caller-facing message.
    pub message: String,
    /// Store failure behind an internal error.
    #[serde(skip)]
    #[source]
    pub cause: Option<GatewayError>,
}

/// Payload of a successful request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Data {
    /// A single record.
    Record(record::ServiceRecord),
    /// Scan results.
    Records(Vec<record::ServiceRecord>),
    /// Id of a removed record.
    Deleted {
        /// Removed record id.
        id: String,
    },
}

/// A successful request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Success {
    /// Payload.
    pub data: Data,
    /// Caller-facing message.
    pub message: String,
}

/// Result of handling one request.
pub type Outcome = Result<Success, Failure>;

/// Serialize an outcome for the response channel.
///
/// Successes render as `{"data": .., "message": ..}` and failures as
/// `{"errorType": .., "message": ..}`.
pub fn render(outcome: &Outcome) -> serde_json::Result<String> {
    match outcome {
        Ok(success) => serde_json::to_string(success),
        Err(failure) => serde_json::to_string(failure),
    }
}

/// Request dispatcher over a store gateway.
#[derive(Debug)]
pub struct Handler<G, N, R> {
    gateway: G,
    notifier: N,
    roster: R,
    updatable_fields: Vec<String>,
}

impl<G, N, R> Handler<G, N, R>
where
    G: RecordGateway,
    N: Notifier,
    R: AdminRoster,
{
    /// Handler allowing updates of `updatable_fields` only.
    pub fn new(gateway: G, notifier: N, roster: R, updatable_fields: Vec<String>) -> Self {
        Self {
            gateway,
            notifier,
            roster,
            updatable_fields,
        }
    }

    /// Handle one request.
    #[tracing::instrument(
        name = "platform_services.handle",
        skip_all,
        fields(method = ?request.method, id = ?request.path.id)
    )]
    pub async fn handle(&self, request: Request) -> Outcome {
        let method: Method = match request.method.as_deref().unwrap_or_default().parse() {
            Ok(method) => method,
            Err(_) => return Err(self.reject(ErrorKind::BadRequest, METHOD_REQUIRED)),
        };
        let id = request.path.id.filter(|id| !id.is_empty());
        match (method, id) {
            (Method::Get, Some(id)) => self.get(&id).await,
            (Method::Get, None) => self.list(&request.query, &request.caller_id).await,
            (Method::Put, Some(id)) => self.update(&id, request.body.as_ref()).await,
            (Method::Delete, Some(id)) => self.delete(&id).await,
            (Method::Put | Method::Delete, None) => {
                Err(self.reject(ErrorKind::BadRequest, ID_REQUIRED))
            }
        }
    }

    async fn get(&self, id: &str) -> Outcome {
        match self.gateway.read(id).await {
            Err(cause) => Err(self.fail(
                format!("Error occured. {cause}"),
                "Unexpected Error occured.",
                cause,
            )),
            Ok(None) => Err(self.not_found(id)),
            Ok(Some(record)) => {
                self.notifier.verbose("Get Success");
                Ok(Success {
                    data: Data::Record(record),
                    message: "Get Success".to_string(),
                })
            }
        }
    }

    async fn list(&self, query: &filter::ScanQuery, caller_id: &str) -> Outcome {
        let is_admin = self.roster.is_admin(caller_id);
        let filter = filter::build(query, caller_id, is_admin);
        match self.gateway.scan(filter).await {
            Err(cause) => Err(self.fail(format!("Error occured. {cause}"), UNEXPECTED_ERROR, cause)),
            Ok(records) => {
                self.notifier.verbose("Scan Success");
                Ok(Success {
                    data: Data::Records(records),
                    message: "Scan Success".to_string(),
                })
            }
        }
    }

    async fn update(&self, id: &str, body: Option<&Value>) -> Outcome {
        match self.gateway.read(id).await {
            Err(cause) => {
                return Err(self.fail(
                    format!("error occured while updating service {cause}"),
                    UNEXPECTED_ERROR,
                    cause,
                ));
            }
            Ok(None) => return Err(self.not_found(id)),
            Ok(Some(_)) => {}
        }
        self.notifier.info("validateInputData");
        match body {
            Some(body) => self.notifier.info_object(body),
            None => self.notifier.info_object(&Value::Null),
        }
        let fields = match validation::validate(body, &self.updatable_fields) {
            ValidationOutcome::Empty => {
                self.notifier.error("input data is empty");
                return Err(failure(ErrorKind::BadRequest, "Service Data cannot be empty"));
            }
            ValidationOutcome::DisallowedField(field) => {
                self.notifier
                    .error("input contains fields other than allowed fields");
                let message = format!(
                    "Invalid field {field}. Only following fields can be updated {}",
                    self.updatable_fields.join(", ")
                );
                return Err(failure(ErrorKind::BadRequest, message));
            }
            ValidationOutcome::InvalidValue(field) => {
                self.notifier.error("input contains invalid field values");
                return Err(failure(
                    ErrorKind::BadRequest,
                    format!("Invalid value for field {field}"),
                ));
            }
            ValidationOutcome::NoEffectiveContent => {
                return Err(self.reject(ErrorKind::BadRequest, NOTHING_TO_UPDATE));
            }
            ValidationOutcome::Accepted(fields) => fields,
        };
        match self.gateway.update(id, fields).await {
            Err(cause) => Err(self.fail(
                format!("error occured while updating service {cause}"),
                UNEXPECTED_ERROR,
                cause,
            )),
            Ok(updated) => {
                self.notifier.info("Updated service");
                Ok(Success {
                    data: Data::Record(updated),
                    message: "Updated service".to_string(),
                })
            }
        }
    }

    async fn delete(&self, id: &str) -> Outcome {
        match self.gateway.read(id).await {
            Err(cause) => {
                return Err(self.fail(format!("Error in DeleteItem {cause}"), UNEXPECTED_ERROR, cause));
            }
            Ok(None) => return Err(self.not_found(id)),
            Ok(Some(_)) => {}
        }
        match self.gateway.remove(id).await {
            Err(cause) => Err(self.fail(format!("Error in DeleteItem {cause}"), UNEXPECTED_ERROR, cause)),
            Ok(()) => {
                let message = format!("Deleted service with id: {id}");
                self.notifier.info(&message);
                Ok(Success {
                    data: Data::Deleted { id: id.to_string() },
                    message,
                })
            }
        }
    }

    /// Log `message` and fail with it.
    fn reject(&self, kind: ErrorKind, message: &str) -> Failure {
        self.notifier.error(message);
        failure(kind, message)
    }

    fn not_found(&self, id: &str) -> Failure {
        self.reject(
            ErrorKind::NotFound,
            &format!("Cannot find service with id: {id}"),
        )
    }

    /// Log the raw store failure and hide it behind an internal error.
    fn fail(&self, log: String, message: &str, cause: GatewayError) -> Failure {
        self.notifier.error(&log);
        Failure {
            kind: ErrorKind::InternalServerError,
            message: message.to_string(),
            cause: Some(cause),
        }
    }
}

fn failure(kind: ErrorKind, message: impl Into<String>) -> Failure {
    Failure {
        kind,
        message: message.into(),
        cause: None,
    }
}
