//! # Recordkit - declarative mutable record types
//!
//! Recordkit builds small structured record types at runtime from an ordered
//! field table. Each field carries a default, a validator, or the
//! [`Required`] marker.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Members   │────▶│   Builder   │────▶│ RecordType  │────▶│   Record    │
//! │ (ordered)   │     │ (validated) │     │ (shared id) │     │ RecordList  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                    │
//!                                                              ┌─────▼─────┐
//!                                                              │ FieldView │
//!                                                              └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use recordkit::{args, RecordType, Required, Validator};
//! use serde_json::json;
//!
//! let foo = RecordType::builder("Foo")
//!     .field("a", Required)
//!     .field("b", json!(2))
//!     .field("c", Validator::one_of(["ham", "spam"]).with_default(json!("ham")))
//!     .build()
//!     .unwrap();
//!
//! let mut fs = foo.new_list();
//! fs.append_new(args! { a: 1 }).unwrap();
//! fs.append_new(args! { a: 2, c: "spam" }).unwrap();
//!
//! let column = fs.column("as").unwrap();
//! assert_eq!(column.to_vec(), vec![json!(1), json!(2)]);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`validation`] - Field validators
//! - [`record`] - Record types, instances, lists and field views
//! - [`definition`] - JSON record definitions
//! - [`macros`] - `args!` and `record_type!`

// Core modules
pub mod error;
pub mod validation;

// Records
pub mod record;

// Definitions
pub mod definition;

// Declarative syntax
#[macro_use]
pub mod macros;

#[doc(hidden)]
pub use serde_json;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{DataError, DataResult, DefinitionError, DefinitionResult};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{length_of, validators_description, Kind, Predicate, Rule, Validator};

// =============================================================================
// Re-exports - Records
// =============================================================================

pub use record::{
    make_record_type,
    Args,
    Base,
    Behavior,
    FieldDefault,
    FieldSpec,
    FieldView,
    FieldViewMut,
    Member,
    Method,
    Record,
    RecordList,
    RecordMut,
    RecordType,
    RecordTypeBuilder,
    Required,
};

// =============================================================================
// Re-exports - Definitions
// =============================================================================

pub use definition::{
    example_definition,
    load_record_type,
    FieldDefinition,
    RuleDefinition,
    TypeDefinition,
};
