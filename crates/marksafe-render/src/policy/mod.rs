//! Policy layer (declarations, resolution, shared registry).
//!
//! Raw declarations are normalized into `PolicyKey`s, expanded into
//! `TagPolicy`s against the sanitizer's vocabulary, and cached so every field
//! declared with the same options shares one policy instance.

pub mod declaration;
pub mod registry;
pub mod resolver;

pub use declaration::MarkupDeclaration;
pub use registry::PolicyRegistry;
pub use resolver::PolicyResolver;
