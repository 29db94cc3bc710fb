//! Field specifications and declared members.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::instance::Record;
use crate::error::DataResult;
use crate::validation::Validator;

/// Marks a field as mandatory: it has no default and must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required;

/// The default of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// No default; construction fails when the field is omitted.
    Required,
    /// Cloned into every record that omits the field.
    Value(Value),
}

impl FieldDefault {
    pub fn is_required(&self) -> bool {
        matches!(self, FieldDefault::Required)
    }

    /// `true` only for an explicit `null` default.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldDefault::Value(Value::Null))
    }
}

impl From<Required> for FieldDefault {
    fn from(_: Required) -> Self {
        FieldDefault::Required
    }
}

impl From<Value> for FieldDefault {
    fn from(value: Value) -> Self {
        FieldDefault::Value(value)
    }
}

impl fmt::Display for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Required => f.write_str("required"),
            FieldDefault::Value(value) => write!(f, "{}", value),
        }
    }
}

/// The declared shape of one field: a bare default, or a validator that
/// carries its own default.
#[derive(Debug, Clone)]
pub enum FieldSpec {
    Plain(FieldDefault),
    Validated(Validator),
}

impl FieldSpec {
    /// Split the spec into its validator (if any) and default.
    pub fn resolve(&self) -> (Option<&Validator>, &FieldDefault) {
        match self {
            FieldSpec::Plain(default) => (None, default),
            FieldSpec::Validated(validator) => (Some(validator), validator.default_value()),
        }
    }
}

impl From<Required> for FieldSpec {
    fn from(_: Required) -> Self {
        FieldSpec::Plain(FieldDefault::Required)
    }
}

impl From<Value> for FieldSpec {
    fn from(value: Value) -> Self {
        FieldSpec::Plain(FieldDefault::Value(value))
    }
}

impl From<FieldDefault> for FieldSpec {
    fn from(default: FieldDefault) -> Self {
        FieldSpec::Plain(default)
    }
}

impl From<Validator> for FieldSpec {
    fn from(validator: Validator) -> Self {
        FieldSpec::Validated(validator)
    }
}

/// Behavior attached to a record type, called by name through
/// [`Record::call`].
#[derive(Clone)]
pub struct Method(Arc<dyn Fn(&Record, &[Value]) -> DataResult<Value> + Send + Sync>);

impl Method {
    pub fn new(f: impl Fn(&Record, &[Value]) -> DataResult<Value> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self, record: &Record, args: &[Value]) -> DataResult<Value> {
        (self.0)(record, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Method(..)")
    }
}

/// One declared member of a record definition. Fields carry data; methods
/// carry behavior and never become fields.
#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldSpec),
    Method(Method),
}

impl From<FieldSpec> for Member {
    fn from(spec: FieldSpec) -> Self {
        Member::Field(spec)
    }
}

impl From<Validator> for Member {
    fn from(validator: Validator) -> Self {
        Member::Field(validator.into())
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Member::Field(value.into())
    }
}

impl From<Required> for Member {
    fn from(required: Required) -> Self {
        Member::Field(required.into())
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Member::Method(method)
    }
}
