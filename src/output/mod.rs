// Output generation module

pub mod diagrams;
pub mod render;

pub use diagrams::*;
pub use render::*;
