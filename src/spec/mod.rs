//! Typed boundary model of the input spec.

pub mod assembly;
pub mod channel;
pub mod data;
pub mod model;
