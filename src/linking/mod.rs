//! Zoom-group merging and brush targeting across renderer views.

pub mod resolver;
pub(crate) mod union_find;
