pub mod builder;
pub mod compiler;
pub mod options;
pub mod plan;
pub mod shapes;
