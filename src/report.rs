pub mod dto;
pub mod extract;
pub mod model;
