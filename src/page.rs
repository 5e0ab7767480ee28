pub mod render;
pub mod writer;
