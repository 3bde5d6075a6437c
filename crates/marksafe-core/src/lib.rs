//! marksafe core: markup policy primitives, runtime values, and the error
//! surface shared by the render crate and hosts.
//!
//! This crate carries no markup engine or sanitizer dependencies so hosts can
//! pass `MarkupValue`s and `TagPolicy`s around without pulling in the pipeline.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Bad declarations surface as `MarksafeError::Configuration` instead.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod policy;
pub mod value;

/// Shared result type.
pub use error::{MarksafeError, Result};
pub use policy::{Allow, Capability, Dialect, PolicyKey, TagPolicy};
pub use value::{Locale, MarkupValue, Rendered, SafeHtml};
