// Template Registry & Renderer.
// The registry owns the closed template set and its theme tokens; layout owns
// section placement; render turns a document into a presentation-ready view.

pub mod layout;
pub mod registry;
pub mod render;

pub use registry::{catalog, TemplateDescriptor, TemplateId};
pub use render::{render, RenderedView};
