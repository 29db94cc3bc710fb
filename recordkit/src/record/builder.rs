//! Record type builder.
//!
//! Compiles an ordered table of members into a [`RecordType`]. Data members
//! become fields in declaration order; methods are kept apart as behavior.
//! Every field also gets a pluralized column accessor on the record list
//! (`x` → `xs`).

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::instance::Record;
use super::spec::{FieldSpec, Member, Method};
use crate::error::{DataError, DataResult};

/// Prefix reserved for internal bookkeeping names.
pub const RESERVED_PREFIX: &str = "__";

static IDENTIFIER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok());

// =============================================================================
// Record Type
// =============================================================================

struct TypeDef {
    name: String,
    list_name: String,
    fields: IndexMap<String, FieldSpec>,
    methods: IndexMap<String, Method>,
    /// Column accessor -> field index
    columns: IndexMap<String, usize>,
}

/// A built record type. Cheap to clone; clones share one identity.
///
/// Two types are equal only if they come from the same `build()` call, even
/// when their names and fields match.
#[derive(Clone)]
pub struct RecordType(Arc<TypeDef>);

impl RecordType {
    /// Start a new definition.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Name of the companion list type (`Foo` → `FooList`).
    pub fn list_name(&self) -> &str {
        &self.0.list_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.0.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.fields.keys().map(String::as_str)
    }

    pub fn field_count(&self) -> usize {
        self.0.fields.len()
    }

    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.0.fields.get(name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.0.fields.get_index_of(name)
    }

    pub(crate) fn field_name_at(&self, index: usize) -> &str {
        self.0
            .fields
            .get_index(index)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.0.methods.get(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.0.methods.keys().map(String::as_str)
    }

    /// Resolve a column accessor (`xs`) to its field index.
    pub fn column(&self, accessor: &str) -> Option<usize> {
        self.0.columns.get(accessor).copied()
    }

    /// Column accessors paired with their field names.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .columns
            .iter()
            .map(|(accessor, &index)| (accessor.as_str(), self.field_name_at(index)))
    }

    /// Whether both handles refer to the same built type.
    pub fn same_as(&self, other: &RecordType) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.0.name)
            .field("fields", &self.0.fields.keys().collect::<Vec<_>>())
            .field("methods", &self.0.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Bases
// =============================================================================

/// A named bundle of methods with no fields. The only kind of base a record
/// type may declare.
#[derive(Debug, Clone)]
pub struct Behavior {
    name: String,
    methods: IndexMap<String, Method>,
}

impl Behavior {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: IndexMap::new(),
        }
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Record, &[Value]) -> DataResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Method::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A declared base of a record definition.
#[derive(Debug, Clone)]
pub enum Base {
    Behavior(Behavior),
    /// Rejected by [`RecordTypeBuilder::build`].
    Record(RecordType),
}

impl From<Behavior> for Base {
    fn from(behavior: Behavior) -> Self {
        Base::Behavior(behavior)
    }
}

impl From<RecordType> for Base {
    fn from(record_type: RecordType) -> Self {
        Base::Record(record_type)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects members in declaration order and compiles them into a
/// [`RecordType`].
#[derive(Debug, Clone)]
pub struct RecordTypeBuilder {
    name: String,
    members: Vec<(String, Member)>,
    bases: Vec<Base>,
}

impl RecordTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            bases: Vec::new(),
        }
    }

    /// Declare a member; fields and methods are separated at build time.
    pub fn member(mut self, name: impl Into<String>, member: impl Into<Member>) -> Self {
        self.members.push((name.into(), member.into()));
        self
    }

    pub fn field(self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.member(name, Member::Field(spec.into()))
    }

    pub fn method(
        self,
        name: impl Into<String>,
        f: impl Fn(&Record, &[Value]) -> DataResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.member(name, Member::Method(Method::new(f)))
    }

    pub fn base(mut self, base: impl Into<Base>) -> Self {
        self.bases.push(base.into());
        self
    }

    /// Compile the definition.
    pub fn build(self) -> DataResult<RecordType> {
        if self.name.is_empty() {
            return Err(DataError::StructuralDefinitionError(
                "record type name must not be empty".to_string(),
            ));
        }

        let mut methods = IndexMap::new();
        for base in self.bases {
            match base {
                Base::Behavior(behavior) => methods.extend(behavior.methods),
                Base::Record(parent) => {
                    return Err(DataError::StructuralDefinitionError(format!(
                        "{} may not have a record base (base was {})",
                        self.name,
                        parent.name()
                    )));
                }
            }
        }

        let mut fields = IndexMap::new();
        let mut declared: Vec<&str> = Vec::with_capacity(self.members.len());
        for (name, member) in &self.members {
            check_member_name(&self.name, name)?;
            if declared.contains(&name.as_str()) {
                return Err(DataError::StructuralDefinitionError(format!(
                    "{} declares {} more than once",
                    self.name, name
                )));
            }
            declared.push(name);

            match member {
                Member::Field(spec) => {
                    fields.insert(name.clone(), spec.clone());
                }
                Member::Method(method) => {
                    methods.insert(name.clone(), method.clone());
                }
            }
        }

        // Behavior methods must not shadow fields.
        if let Some(clash) = methods.keys().find(|m| fields.contains_key(*m)) {
            return Err(DataError::StructuralDefinitionError(format!(
                "{} has both a field and a method named {}",
                self.name, clash
            )));
        }

        let columns = fields
            .keys()
            .enumerate()
            .map(|(index, field)| (format!("{}s", field), index))
            .collect();

        tracing::debug!(
            record_type = %self.name,
            fields = fields.len(),
            methods = methods.len(),
            "built record type"
        );

        Ok(RecordType(Arc::new(TypeDef {
            list_name: format!("{}List", self.name),
            name: self.name,
            fields,
            methods,
            columns,
        })))
    }
}

fn check_member_name(type_name: &str, name: &str) -> DataResult<()> {
    if name.starts_with(RESERVED_PREFIX) {
        return Err(DataError::StructuralDefinitionError(format!(
            "{}.{} uses the reserved prefix {}",
            type_name, name, RESERVED_PREFIX
        )));
    }
    if !IDENTIFIER.as_ref().is_some_and(|re| re.is_match(name)) {
        return Err(DataError::StructuralDefinitionError(format!(
            "{}.{} is not a valid member name",
            type_name, name
        )));
    }
    Ok(())
}

/// Build a record type from an ordered member table.
pub fn make_record_type<I, K>(name: impl Into<String>, members: I) -> DataResult<RecordType>
where
    I: IntoIterator<Item = (K, Member)>,
    K: Into<String>,
{
    members
        .into_iter()
        .fold(RecordTypeBuilder::new(name), |builder, (key, member)| {
            builder.member(key, member)
        })
        .build()
}
