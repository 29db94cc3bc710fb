//! Record types, instances, lists and field views.
//!
//! ```text
//! members ──▶ RecordTypeBuilder ──▶ RecordType ──construct──▶ Record
//!                                       │
//!                                       └──new_list──▶ RecordList ──column──▶ FieldView
//! ```

pub mod builder;
pub mod instance;
pub mod list;
mod range;
pub mod spec;
pub mod view;

pub use builder::{make_record_type, Base, Behavior, RecordType, RecordTypeBuilder, RESERVED_PREFIX};
pub use instance::{Args, Record, RecordMut};
pub use list::RecordList;
pub use spec::{FieldDefault, FieldSpec, Member, Method, Required};
pub use view::{FieldView, FieldViewMut};
