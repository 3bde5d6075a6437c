//! Field bindings: which fields of which entities carry markup, and under
//! which policy.
//!
//! Stored text is always plain. Policy is attached at read time from the live
//! binding, for every locale of the field.

pub mod fields;
pub mod record;

pub use fields::FieldBindings;
pub use record::Record;
