//! String backend: serializes intrinsic elements into escaped markup.

mod escape;
mod render;
mod serializer;

pub use escape::{escape_text, print_attrs, print_style};
pub use render::render;
pub use serializer::MarkupEnvironment;
