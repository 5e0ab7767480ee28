pub mod claude;
pub mod config;
pub mod date;
pub mod page;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod tracing;
