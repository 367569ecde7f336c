//! Id collection, lookup, and the per-compile identifier index.

pub mod index;
pub mod resolver;
