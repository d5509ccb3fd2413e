pub mod config;
pub mod page;
pub mod stages;
