pub mod active;
pub mod catalog;
pub mod config;
pub mod document;
pub mod dom;
pub mod error;
pub mod io;
pub mod page;
pub mod paths;
pub mod render;
pub mod sync;
pub mod throttle;
pub mod types;
pub mod visibility;

pub use error::{GuideError, Result};
