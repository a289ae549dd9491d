//! Variant metadata inferred from image filenames.
//!
//! The suffix table, idiom identifiers and the inference routine live in
//! focused submodules so the priority order and fallback chains can be
//! tested in isolation.

mod idiom;
mod properties;
mod size_class;

pub use idiom::DeviceIdiom;
pub use properties::ImageProperties;
pub use size_class::SizeClass;
