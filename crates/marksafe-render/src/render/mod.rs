//! Render pipeline: markup engine -> sanitizer -> link marker.

pub mod renderer;

pub use renderer::MarkupRenderer;
