//! Top-level facade crate for marksafe.
//!
//! Re-exports core types and the render library so users can depend on a single crate.

pub mod core {
    pub use marksafe_core::*;
}

pub mod render {
    pub use marksafe_render::*;
}

pub use marksafe_core::{MarkupValue, Rendered, SafeHtml};
pub use marksafe_render::{MarkupDeclaration, MarkupEnvironment};
