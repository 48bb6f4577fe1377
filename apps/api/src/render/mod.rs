// Resume rendering: templates produce a document tree, the paginator places it
// on A4 pages, and the container writes the final HTML for screen or print.

pub mod container;
pub mod document;
pub mod html;
pub mod templates;

pub use container::{DocumentContainer, Medium};
pub use templates::TemplateId;
