//! Record type definitions loaded from JSON files.
//!
//! A definition lists fields in order. Each field is required, carries a
//! default, carries a validation rule, or combines a rule with a default:
//!
//! ```json
//! {
//!   "name": "Track",
//!   "fields": [
//!     {"name": "title", "required": true, "rule": {"type": "instance_of", "kind": "string"}},
//!     {"name": "rating", "rule": {"type": "one_of", "values": [1, 2, 3, 4, 5]}, "default": 3},
//!     {"name": "tags", "default": []}
//!   ]
//! }
//! ```
//!
//! Predicates (`must_satisfy`) are code and only exist in the library API.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DataResult, DefinitionResult};
use crate::record::{FieldDefault, FieldSpec, RecordType};
use crate::validation::{Kind, Validator};

/// A complete record type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Record type name
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Fields in declaration order
    pub fields: Vec<FieldDefinition>,
}

/// Definition of a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,

    /// Validation rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleDefinition>,

    /// Default value; `null` means "use the rule's default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Whether the field must be supplied
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// Serializable validation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleDefinition {
    InstanceOf { kind: Kind },
    InstanceOrNone { kind: Kind },
    OneOf { values: Vec<Value> },
    Length { n: usize },
}

impl RuleDefinition {
    fn to_validator(&self) -> Validator {
        match self {
            RuleDefinition::InstanceOf { kind } => Validator::instance_of(*kind),
            RuleDefinition::InstanceOrNone { kind } => Validator::instance_or_none(*kind),
            RuleDefinition::OneOf { values } => Validator::one_of(values.iter().cloned()),
            RuleDefinition::Length { n } => Validator::length(*n),
        }
    }
}

impl FieldDefinition {
    /// A plain field defaulting to `null`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: None,
            default: None,
            required: false,
        }
    }

    pub fn with_rule(mut self, rule: RuleDefinition) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Resolve to a field spec: required, then an explicit default, then
    /// the rule's own default, then `null`.
    pub fn to_spec(&self) -> FieldSpec {
        let default = if self.required {
            Some(FieldDefault::Required)
        } else {
            self.default.clone().map(FieldDefault::Value)
        };

        match (&self.rule, default) {
            (Some(rule), Some(default)) => rule.to_validator().with_default(default).into(),
            (Some(rule), None) => rule.to_validator().into(),
            (None, Some(default)) => FieldSpec::Plain(default),
            (None, None) => FieldSpec::Plain(FieldDefault::Value(Value::Null)),
        }
    }
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Parse a definition from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a definition from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> DefinitionResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build the record type this definition describes.
    pub fn to_record_type(&self) -> DataResult<RecordType> {
        self.fields
            .iter()
            .fold(RecordType::builder(self.name.clone()), |builder, field| {
                builder.field(field.name.clone(), field.to_spec())
            })
            .build()
    }

    /// Names of the required fields
    pub fn required_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.clone())
            .collect()
    }
}

/// Load a definition file and build its record type.
pub fn load_record_type(path: impl AsRef<Path>) -> DefinitionResult<RecordType> {
    let definition = TypeDefinition::from_file(path)?;
    Ok(definition.to_record_type()?)
}

/// Example definition covering every serializable rule.
pub fn example_definition() -> TypeDefinition {
    let mut definition = TypeDefinition::new("Track")
        .with_field(
            FieldDefinition::new("title")
                .with_rule(RuleDefinition::InstanceOf { kind: Kind::String })
                .required(),
        )
        .with_field(
            FieldDefinition::new("artist")
                .with_rule(RuleDefinition::InstanceOrNone { kind: Kind::String }),
        )
        .with_field(
            FieldDefinition::new("format")
                .with_rule(RuleDefinition::OneOf {
                    values: vec!["mp3".into(), "flac".into(), "ogg".into()],
                })
                .with_default("flac".into()),
        )
        .with_field(
            FieldDefinition::new("isrc")
                .with_rule(RuleDefinition::Length { n: 12 })
                .required(),
        )
        .with_field(FieldDefinition::new("tags").with_default(Value::Array(Vec::new())));
    definition.description = "A catalogue track".to_string();
    definition
}
