//! Data model shared by every stage of the chart pipeline.

pub mod location;
pub mod star;
pub mod time;

pub use location::*;
pub use star::*;
pub use time::*;
