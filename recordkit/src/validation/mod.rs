//! Field validators.
//!
//! A [`Validator`] pairs one [`Rule`] with the default value used when the
//! field is omitted at construction time. Validators run exactly once per
//! field, when a record is constructed; later assignments are not checked.
//!
//! | Rule | Accepts | Default |
//! |------|---------|---------|
//! | `instance_of(kind)` | values of `kind` | required |
//! | `instance_or_none(kind)` | `null` or values of `kind` | `null` |
//! | `one_of(values)` | members of `values` | `null` |
//! | `length(n)` | strings, arrays, objects of length `n` | `null` |
//! | `must_satisfy(predicate)` | values the predicate accepts | required |
//!
//! `one_of` and `length` skip validation when the value is `null` and the
//! validator carries a non-null default.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DataError, DataResult};
use crate::record::spec::FieldDefault;

// =============================================================================
// Value Kinds
// =============================================================================

/// The dynamic kind of a field value, as checked by `instance_of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Every value.
    Any,
    Null,
    Bool,
    /// Integers and floats.
    Number,
    /// Numbers representable as i64 or u64.
    Integer,
    /// Numbers stored as f64.
    Float,
    String,
    Array,
    Object,
}

impl Kind {
    /// Whether `value` is an instance of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Kind::Any => true,
            Kind::Null => value.is_null(),
            Kind::Bool => value.is_boolean(),
            Kind::Number => value.is_number(),
            Kind::Integer => value.is_i64() || value.is_u64(),
            Kind::Float => value.is_f64(),
            Kind::String => value.is_string(),
            Kind::Array => value.is_array(),
            Kind::Object => value.is_object(),
        }
    }

    /// The most specific kind of `value`.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) if n.is_f64() => Kind::Float,
            Value::Number(_) => Kind::Integer,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length of a value: characters of a string, elements of an array, keys of
/// an object. Other values have no length.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// A caller-supplied check used by `must_satisfy`.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// =============================================================================
// Rules
// =============================================================================

/// All available validation rules.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be of the given kind.
    InstanceOf(Kind),

    /// Value must be `null` or of the given kind.
    InstanceOrNone(Kind),

    /// Value must equal one of the listed values.
    OneOf(Vec<Value>),

    /// Value must have exactly this length.
    Length(usize),

    /// Value must satisfy the predicate.
    MustSatisfy(Predicate),
}

impl Rule {
    /// Short name used in diagnostics and definition files.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::InstanceOf(_) => "instance_of",
            Rule::InstanceOrNone(_) => "instance_or_none",
            Rule::OneOf(_) => "one_of",
            Rule::Length(_) => "length",
            Rule::MustSatisfy(_) => "must_satisfy",
        }
    }

    fn check(&self, value: &Value, field: &str) -> DataResult<()> {
        match self {
            Rule::InstanceOf(kind) => Self::check_instance(value, field, *kind, false),
            Rule::InstanceOrNone(kind) => Self::check_instance(value, field, *kind, true),
            Rule::OneOf(values) => Self::check_one_of(value, field, values),
            Rule::Length(n) => Self::check_length(value, field, *n),
            Rule::MustSatisfy(predicate) => Self::check_predicate(value, field, predicate),
        }
    }

    fn check_instance(value: &Value, field: &str, kind: Kind, allow_null: bool) -> DataResult<()> {
        if (allow_null && value.is_null()) || kind.matches(value) {
            return Ok(());
        }
        Err(DataError::TypeMismatch {
            field: field.to_string(),
            expected: kind,
            value: value.clone(),
        })
    }

    fn check_one_of(value: &Value, field: &str, values: &[Value]) -> DataResult<()> {
        if values.contains(value) {
            return Ok(());
        }
        Err(DataError::InvalidEnumValue {
            field: field.to_string(),
            value: value.clone(),
        })
    }

    fn check_length(value: &Value, field: &str, n: usize) -> DataResult<()> {
        match length_of(value) {
            Some(actual) if actual == n => Ok(()),
            Some(actual) => Err(DataError::LengthMismatch {
                field: field.to_string(),
                value: value.clone(),
                actual,
                expected: n,
            }),
            None => Err(DataError::NoLength {
                field: field.to_string(),
                value: value.clone(),
            }),
        }
    }

    fn check_predicate(value: &Value, field: &str, predicate: &Predicate) -> DataResult<()> {
        if predicate.test(value) {
            return Ok(());
        }
        Err(DataError::PredicateFailed {
            field: field.to_string(),
            value: value.clone(),
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::InstanceOf(kind) | Rule::InstanceOrNone(kind) => {
                write!(f, "{}({})", self.name(), kind)
            }
            Rule::OneOf(values) => {
                let rendered: Vec<String> = values.iter().map(Value::to_string).collect();
                write!(f, "one_of({})", rendered.join(", "))
            }
            Rule::Length(n) => write!(f, "length({})", n),
            Rule::MustSatisfy(_) => f.write_str("must_satisfy(..)"),
        }
    }
}

// =============================================================================
// Validators
// =============================================================================

/// A validation rule paired with the field's default value.
#[derive(Debug, Clone)]
pub struct Validator {
    rule: Rule,
    default: FieldDefault,
}

impl Validator {
    pub fn new(rule: Rule, default: impl Into<FieldDefault>) -> Self {
        Self {
            rule,
            default: default.into(),
        }
    }

    /// Requires a value of `kind`. No default.
    pub fn instance_of(kind: Kind) -> Self {
        Self::new(Rule::InstanceOf(kind), FieldDefault::Required)
    }

    /// Requires `null` or a value of `kind`. Defaults to `null`.
    pub fn instance_or_none(kind: Kind) -> Self {
        Self::new(Rule::InstanceOrNone(kind), Value::Null)
    }

    /// Requires one of `values`. Defaults to `null`.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(
            Rule::OneOf(values.into_iter().map(Into::into).collect()),
            Value::Null,
        )
    }

    /// Requires a length of exactly `n`. Defaults to `null`.
    pub fn length(n: usize) -> Self {
        Self::new(Rule::Length(n), Value::Null)
    }

    /// Requires `predicate` to accept the value. No default.
    pub fn must_satisfy(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::new(Rule::MustSatisfy(Predicate::new(predicate)), FieldDefault::Required)
    }

    /// Replace the default value.
    pub fn with_default(mut self, default: impl Into<FieldDefault>) -> Self {
        self.default = default.into();
        self
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn default_value(&self) -> &FieldDefault {
        &self.default
    }

    /// Check `value` for the field named `field`.
    pub fn validate(&self, value: &Value, field: &str) -> DataResult<()> {
        if self.skips_absent(value) {
            return Ok(());
        }
        self.rule.check(value, field)
    }

    /// `one_of` and `length` accept an absent value when a default exists.
    fn skips_absent(&self, value: &Value) -> bool {
        matches!(self.rule, Rule::OneOf(_) | Rule::Length(_))
            && value.is_null()
            && !self.default.is_null()
    }
}

/// Reference table of the available validators.
pub fn validators_description() -> String {
    r#"Available field validators:

| Rule | Accepts | Default | Parameters |
|------|---------|---------|------------|
| instance_of | values of the given kind | required | kind |
| instance_or_none | null or values of the given kind | null | kind |
| one_of | one of the listed values | null | values: list |
| length | strings, arrays or objects of exactly n | null | n: length |
| must_satisfy | values accepted by a predicate (library only) | required | - |

Kinds: any, null, bool, number, integer, float, string, array, object

one_of and length accept null without checking when a non-null default is set.

Example fields in JSON:
[
  {"name": "id", "required": true, "rule": {"type": "instance_of", "kind": "integer"}},
  {"name": "label", "rule": {"type": "instance_or_none", "kind": "string"}},
  {"name": "size", "rule": {"type": "one_of", "values": ["s", "m", "l"]}, "default": "m"},
  {"name": "rgb", "rule": {"type": "length", "n": 3}, "default": [0, 0, 0]},
  {"name": "tags", "default": []}
]"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::spec::Required;
    use serde_json::json;

    #[test]
    fn test_kind_matches() {
        assert!(Kind::Object.matches(&json!({})));
        assert!(!Kind::Object.matches(&json!(1)));
        assert!(Kind::Number.matches(&json!(1.5)));
        assert!(Kind::Integer.matches(&json!(-3)));
        assert!(!Kind::Integer.matches(&json!(1.5)));
        assert!(Kind::Float.matches(&json!(1.5)));
        assert!(Kind::Any.matches(&Value::Null));
        assert_eq!(Kind::of(&json!("x")), Kind::String);
        assert_eq!(Kind::of(&json!(2)), Kind::Integer);
    }

    #[test]
    fn test_instance_of() {
        let v = Validator::instance_of(Kind::Object);
        assert!(v.validate(&json!({}), "a").is_ok());
        assert!(matches!(
            v.validate(&json!(1), "a"),
            Err(DataError::TypeMismatch { expected: Kind::Object, .. })
        ));
        assert!(v.validate(&Value::Null, "a").is_err());
        assert!(v.default_value().is_required());
    }

    #[test]
    fn test_instance_or_none() {
        let v = Validator::instance_or_none(Kind::Object);
        assert!(v.validate(&Value::Null, "a").is_ok());
        assert!(v.validate(&json!({"k": 1}), "a").is_ok());
        assert!(v.validate(&json!(1), "a").is_err());
        assert_eq!(v.default_value(), &FieldDefault::Value(Value::Null));
    }

    #[test]
    fn test_one_of_without_default() {
        let v = Validator::one_of(["a", "b", "c"]);
        assert!(v.validate(&json!("a"), "f").is_ok());
        let err = v.validate(&json!("d"), "f").unwrap_err();
        assert_eq!(err.to_string(), "\"d\" is not a valid value for f");
        assert!(v.validate(&Value::Null, "f").is_err());
    }

    #[test]
    fn test_one_of_with_default_skips_null() {
        let v = Validator::one_of(["a", "b", "c"]).with_default(json!("c"));
        assert!(v.validate(&Value::Null, "f").is_ok());
        assert!(v.validate(&json!("d"), "f").is_err());

        let v = Validator::one_of(["a"]).with_default(Required);
        assert!(v.validate(&Value::Null, "f").is_ok());
    }

    #[test]
    fn test_length() {
        let v = Validator::length(3);
        assert!(v.validate(&json!([1, 2, 3]), "f").is_ok());
        assert!(v.validate(&json!("abc"), "f").is_ok());
        assert!(matches!(
            v.validate(&json!([1, 2]), "f"),
            Err(DataError::LengthMismatch { actual: 2, expected: 3, .. })
        ));
        assert!(matches!(
            v.validate(&json!(1), "f"),
            Err(DataError::NoLength { .. })
        ));
        assert!(matches!(
            v.validate(&Value::Null, "f"),
            Err(DataError::NoLength { .. })
        ));
    }

    #[test]
    fn test_length_counts_chars_and_keys() {
        let v = Validator::length(2);
        assert!(v.validate(&json!("né"), "f").is_ok());
        assert!(v.validate(&json!({"a": 1, "b": 2}), "f").is_ok());
    }

    #[test]
    fn test_must_satisfy() {
        let v = Validator::must_satisfy(|v| v.as_i64().is_some_and(|n| n > 0));
        assert!(v.validate(&json!(5), "n").is_ok());
        let err = v.validate(&json!(-5), "n").unwrap_err();
        assert_eq!(err.to_string(), "n failed validation (value was -5)");
        // null is not skipped, even with a default
        let v = v.with_default(json!(1));
        assert!(v.validate(&Value::Null, "n").is_err());
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::InstanceOf(Kind::String).to_string(), "instance_of(string)");
        assert_eq!(
            Rule::OneOf(vec![json!("ham"), json!(2)]).to_string(),
            "one_of(\"ham\", 2)"
        );
        assert_eq!(Rule::Length(3).to_string(), "length(3)");
    }
}
