//! Generated Swift accessor declarations.
//!
//! Identifier derivation, ordering and the platform targets are split into
//! focused submodules so the naming rules can be tested without rendering
//! whole files.

mod generation;
mod naming;
mod target;

pub use generation::generate_swift_code;
pub use target::SwiftTarget;
