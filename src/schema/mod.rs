//! Record description and flattening into named leaf fields.

pub mod record;
pub mod schema;

pub use record::{Member, MemberKind, Record, RecordSchema, Value};
pub use schema::{Collection, FieldDescriptor, Schema};
