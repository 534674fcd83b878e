use crate::common;

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::{collections, fmt};

/// Separator between clauses of a condition expression.
const AND: &str = " AND ";

/// Scalar type tag of a bound parameter value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeTag {
    /// String value.
    S,
    /// Number value, carried in its decimal string form.
    N,
}

/// A value bound to a named expression parameter.
///
/// ```rust
/// use platform_services::common::condition;
///
/// let binding = condition::Binding::string("someTime");
/// assert_eq!(binding.type_tag, condition::TypeTag::S);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    /// The raw value.
    pub value: String,
    /// How the store should interpret the value.
    pub type_tag: TypeTag,
}

impl Binding {
    /// Bind a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_tag: TypeTag::S,
        }
    }
}

impl From<Binding> for types::AttributeValue {
    fn from(binding: Binding) -> Self {
        match binding.type_tag {
            TypeTag::S => Self::S(binding.value),
            TypeTag::N => Self::N(binding.value),
        }
    }
}

/// Predicate applied to a single attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    /// Attribute value lies between two bound parameters (inclusive).
    Between {
        /// Parameter holding the lower bound.
        lower: String,
        /// Parameter holding the upper bound.
        upper: String,
    },
    /// Attribute value equals the bound parameter.
    Equals(String),
    /// Attribute is present on the item.
    Exists,
}

impl Predicate {
    fn parameters(&self) -> Vec<&str> {
        match self {
            Self::Between { lower, upper } => vec![lower.as_str(), upper.as_str()],
            Self::Equals(parameter) => vec![parameter.as_str()],
            Self::Exists => Vec::new(),
        }
    }
}

/// One `attribute op parameter` clause.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clause {
    /// Store attribute the predicate applies to.
    pub attribute: String,
    /// The predicate.
    pub predicate: Predicate,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::Between { lower, upper } => {
                write!(f, "{} BETWEEN {} AND {}", self.attribute, lower, upper)
            }
            Predicate::Equals(parameter) => write!(f, "{} = {}", self.attribute, parameter),
            Predicate::Exists => write!(f, "attribute_exists({})", self.attribute),
        }
    }
}

/// Conjunction of clauses plus the values bound to their parameters.
///
/// Every parameter referenced by a clause has exactly one binding, and each
/// attribute is constrained at most once: adding a clause for an attribute that
/// already has one replaces it in place and drops its old bindings.
///
/// ```rust
/// use platform_services::common::condition;
///
/// let mut condition = condition::ConditionExpression::default();
/// condition
///     .between(
///         "SERVICE_TIMESTAMP",
///         (":AFTER", condition::Binding::string("2017-01-01")),
///         (":BEFORE", condition::Binding::string("2018-01-01")),
///     )
///     .equals("SERVICE_CREATED_BY", condition::Binding::string("jane"));
/// assert_eq!(
///     condition.to_string(),
///     "SERVICE_TIMESTAMP BETWEEN :AFTER AND :BEFORE AND SERVICE_CREATED_BY = :SERVICE_CREATED_BY"
/// );
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConditionExpression {
    clauses: Vec<Clause>,
    bindings: IndexMap<String, Binding>,
}

impl ConditionExpression {
    /// Constrain `attribute` to equal `value`, bound as `:<attribute>`.
    pub fn equals(&mut self, attribute: &str, value: Binding) -> &mut Self {
        let parameter = format!(":{attribute}");
        let clause = Clause {
            attribute: attribute.to_string(),
            predicate: Predicate::Equals(parameter.clone()),
        };
        self.add(clause, vec![(parameter, value)])
    }

    /// Constrain `attribute` to the inclusive range `lower..=upper`.
    ///
    /// Each bound is a `(parameter, value)` pair; the parameter names must not be
    /// used by any other clause of this expression.
    pub fn between(
        &mut self,
        attribute: &str,
        lower: (&str, Binding),
        upper: (&str, Binding),
    ) -> &mut Self {
        let clause = Clause {
            attribute: attribute.to_string(),
            predicate: Predicate::Between {
                lower: lower.0.to_string(),
                upper: upper.0.to_string(),
            },
        };
        self.add(
            clause,
            vec![(lower.0.to_string(), lower.1), (upper.0.to_string(), upper.1)],
        )
    }

    /// Require `attribute` to be present.
    pub fn exists(&mut self, attribute: &str) -> &mut Self {
        let clause = Clause {
            attribute: attribute.to_string(),
            predicate: Predicate::Exists,
        };
        self.add(clause, Vec::new())
    }

    fn add(&mut self, clause: Clause, bindings: Vec<(String, Binding)>) -> &mut Self {
        let existing = self
            .clauses
            .iter()
            .position(|existing| existing.attribute == clause.attribute);
        match existing {
            Some(index) => {
                for parameter in self.clauses[index].predicate.parameters() {
                    self.bindings.shift_remove(parameter);
                }
                self.clauses[index] = clause;
            }
            None => self.clauses.push(clause),
        }
        self.bindings.extend(bindings);
        self
    }

    /// The clauses, in the order they were added.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Parameter bindings, in the order they were added.
    pub fn bindings(&self) -> &IndexMap<String, Binding> {
        &self.bindings
    }

    /// Look up the value bound to `parameter`.
    pub fn binding(&self, parameter: &str) -> Option<&Binding> {
        self.bindings.get(parameter)
    }

    /// Whether no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for ConditionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                f.write_str(AND)?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl From<ConditionExpression> for common::ExpressionInput {
    fn from(condition: ConditionExpression) -> Self {
        let expression = condition.to_string();
        let expression_attribute_values: collections::HashMap<_, _> = condition
            .bindings
            .into_iter()
            .map(|(parameter, binding)| (parameter, binding.into()))
            .collect();
        Self {
            expression,
            expression_attribute_values,
            ..Default::default()
        }
    }
}
