//! Template expansion, overlay resolution and the defaulting pass.

pub mod overlay;
pub mod pass;
pub mod template;
