//! Record instances and their construction.

use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;
use serde_json::Value;

use super::builder::RecordType;
use super::spec::FieldDefault;
use crate::error::{DataError, DataResult};

/// Named construction arguments, field name to value.
pub type Args = IndexMap<String, Value>;

/// One concrete value of a [`RecordType`], holding a value for every field.
///
/// Validators run once, in [`RecordType::construct`]. Assignments made
/// afterwards through [`Record::set`] are not re-validated.
#[derive(Clone)]
pub struct Record {
    record_type: RecordType,
    values: Vec<Value>,
}

impl RecordType {
    /// Construct a record from named arguments.
    ///
    /// Fields are resolved in declaration order: the supplied value, or a
    /// fresh copy of the default, then the field's validator. Names that
    /// match no field are rejected once every field has resolved.
    pub fn construct(&self, mut args: Args) -> DataResult<Record> {
        let mut values = Vec::with_capacity(self.field_count());

        for (name, spec) in self.fields() {
            let (validator, default) = spec.resolve();

            let value = match (args.shift_remove(name), default) {
                (Some(value), _) => value,
                (None, FieldDefault::Value(default)) => default.clone(),
                (None, FieldDefault::Required) => {
                    tracing::trace!(record_type = %self.name(), field = name, "missing required field");
                    return Err(DataError::MissingRequiredField(name.to_string()));
                }
            };

            if let Some(validator) = validator {
                if let Err(err) = validator.validate(&value, name) {
                    tracing::trace!(record_type = %self.name(), error = %err, "field rejected");
                    return Err(err);
                }
            }

            values.push(value);
        }

        if let Some(unknown) = args.keys().next() {
            return Err(DataError::UnknownField {
                type_name: self.name().to_string(),
                field: unknown.clone(),
            });
        }

        Ok(Record {
            record_type: self.clone(),
            values,
        })
    }

    /// Construct a record using only defaults.
    pub fn construct_default(&self) -> DataResult<Record> {
        self.construct(Args::new())
    }
}

impl Record {
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        let index = self.record_type.field_index(field)?;
        self.values.get(index)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        let index = self.record_type.field_index(field)?;
        self.values.get_mut(index)
    }

    /// Assign a field. The value is stored as-is, without validation.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> DataResult<()> {
        match self.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DataError::UnknownField {
                type_name: self.record_type.name().to_string(),
                field: field.to_string(),
            }),
        }
    }

    /// Field names and values in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.record_type.field_names().zip(self.values.iter())
    }

    /// Call a method declared on the record type.
    pub fn call(&self, method: &str, args: &[Value]) -> DataResult<Value> {
        match self.record_type.method(method) {
            Some(m) => m.invoke(self, args),
            None => Err(DataError::UnknownMethod {
                type_name: self.record_type.name().to_string(),
                method: method.to_string(),
            }),
        }
    }

    pub(crate) fn value_at(&self, index: usize) -> &Value {
        &self.values[index]
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> &mut Value {
        &mut self.values[index]
    }
}

/// Mutable access to a record stored in a [`RecordList`](super::RecordList).
///
/// Fields can be read and assigned, but the record itself cannot be
/// replaced, so a list never ends up holding a record of another type.
pub struct RecordMut<'a>(&'a mut Record);

impl<'a> RecordMut<'a> {
    pub(crate) fn new(record: &'a mut Record) -> Self {
        Self(record)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    /// Assign a field, without validation.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> DataResult<()> {
        self.0.set(field, value)
    }
}

impl Deref for RecordMut<'_> {
    type Target = Record;

    fn deref(&self) -> &Record {
        &*self.0
    }
}

impl fmt::Debug for RecordMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type && self.values == other.values
    }
}

/// Render a value for diagnostics: strings bare, everything else as JSON.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .fields()
            .map(|(name, value)| format!("{}={}", name, render_value(value)))
            .collect();
        write!(f, "{}({})", self.record_type.name(), fields.join(", "))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
