//! Update payload validation.

use indexmap::IndexMap;
use serde_json::Value;

/// Fields a caller may update unless configured otherwise.
pub const DEFAULT_UPDATABLE_FIELDS: [&str; 2] = ["description", "email"];

/// Result of checking an update payload against the allow-list.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationOutcome {
    /// No payload, or a payload without any named field.
    Empty,
    /// The first field, in payload order, that may not be updated.
    DisallowedField(String),
    /// The first allow-listed field, in payload order, whose value is neither a
    /// string nor null.
    InvalidValue(String),
    /// Only allow-listed fields, all of them null.
    NoEffectiveContent,
    /// Allow-listed fields with their non-null values, in payload order.
    Accepted(IndexMap<String, Value>),
}

/// Check `body` against `allow_list`.
///
/// Non-object bodies carry no named fields and are reported as [`ValidationOutcome::Empty`].
/// Updatable attributes are stored as strings, so any other non-null value is
/// rejected before it reaches the store.
///
/// ```rust
/// use platform_services::validation::{self, ValidationOutcome};
/// use serde_json::json;
///
/// let allow_list = ["description".to_string(), "email".to_string()];
/// let body = json!({"email": "a@b.c", "description": null});
/// match validation::validate(Some(&body), &allow_list) {
///     ValidationOutcome::Accepted(fields) => assert_eq!(fields.len(), 1),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn validate(body: Option<&Value>, allow_list: &[String]) -> ValidationOutcome {
    let fields = match body {
        Some(Value::Object(fields)) if !fields.is_empty() => fields,
        _ => return ValidationOutcome::Empty,
    };
    if let Some(field) = fields
        .keys()
        .find(|field| !allow_list.iter().any(|allowed| allowed == *field))
    {
        return ValidationOutcome::DisallowedField(field.clone());
    }
    if let Some(field) = fields
        .iter()
        .find(|(_, value)| !(value.is_null() || value.is_string()))
        .map(|(field, _)| field)
    {
        return ValidationOutcome::InvalidValue(field.clone());
    }
    let accepted: IndexMap<String, Value> = fields
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect();
    if accepted.is_empty() {
        ValidationOutcome::NoEffectiveContent
    } else {
        ValidationOutcome::Accepted(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    fn allow_list() -> Vec<String> {
        DEFAULT_UPDATABLE_FIELDS.iter().map(|field| field.to_string()).collect()
    }

    #[rstest]
    #[case::absent(None)]
    #[case::null(Some(Value::Null))]
    #[case::empty_string(Some(json!("")))]
    #[case::empty_object(Some(json!({})))]
    #[case::array(Some(json!(["description"])))]
    fn test_empty(#[case] body: Option<Value>) {
        assert_eq!(validate(body.as_ref(), &allow_list()), ValidationOutcome::Empty);
    }

    #[rstest]
    #[case::extra_field(
        json!({"description": "d", "email": "e", "newProperty": "Ludo!"}),
        "newProperty"
    )]
    #[case::first_in_payload_order(
        json!({"zeta": 1, "alpha": 2, "email": "e"}),
        "zeta"
    )]
    #[case::disallowed_wins_over_invalid_values(
        json!({"email": 1, "zeta": "z"}),
        "zeta"
    )]
    #[case::disallowed_wins_over_null_values(
        json!({"description": null, "owner": null}),
        "owner"
    )]
    fn test_disallowed_field(#[case] body: Value, #[case] expected: &str) {
        assert_eq!(
            validate(Some(&body), &allow_list()),
            ValidationOutcome::DisallowedField(expected.to_string())
        );
    }

    #[rstest]
    #[case::number(json!({"email": 42}), "email")]
    #[case::boolean(json!({"description": true}), "description")]
    #[case::object(json!({"email": {"primary": "a@b.c"}}), "email")]
    #[case::array(json!({"description": ["d"]}), "description")]
    #[case::first_in_payload_order(json!({"email": 1, "description": false}), "email")]
    #[case::after_valid_string(json!({"description": "d", "email": 42}), "email")]
    fn test_invalid_value(#[case] body: Value, #[case] expected: &str) {
        assert_eq!(
            validate(Some(&body), &allow_list()),
            ValidationOutcome::InvalidValue(expected.to_string())
        );
    }

    #[rstest]
    #[case::all_null(json!({"description": null, "email": null}))]
    #[case::one_null(json!({"email": null}))]
    fn test_no_effective_content(#[case] body: Value) {
        assert_eq!(
            validate(Some(&body), &allow_list()),
            ValidationOutcome::NoEffectiveContent
        );
    }

    #[test]
    fn test_accepted_keeps_only_defined_values() {
        let body = json!({
            "email": "gonnaGetALittle@Wild.com",
            "description": null,
        });
        assert_eq!(
            validate(Some(&body), &allow_list()),
            ValidationOutcome::Accepted(IndexMap::from([(
                "email".to_string(),
                json!("gonnaGetALittle@Wild.com"),
            )]))
        );
    }

    #[test]
    fn test_accepted_honours_custom_allow_list() {
        let body = json!({"status": "retired"});
        let allow_list = vec!["status".to_string()];
        assert_eq!(
            validate(Some(&body), &allow_list),
            ValidationOutcome::Accepted(IndexMap::from([(
                "status".to_string(),
                json!("retired"),
            )]))
        );
    }
}
