//! marksafe render library entry.
//!
//! This crate wires declaration resolution, the policy registry, the markup
//! engines, sanitization, and field bindings into one render pipeline. Hosts
//! normally go through `MarkupEnvironment`; the pieces are public for hosts
//! that want to swap a collaborator.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod binding;
pub mod config;
pub mod engine;
pub mod environment;
pub mod policy;
pub mod render;
pub mod sanitize;

pub use binding::{FieldBindings, Record};
pub use environment::MarkupEnvironment;
pub use policy::{MarkupDeclaration, PolicyRegistry, PolicyResolver};
pub use render::MarkupRenderer;
