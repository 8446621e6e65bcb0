//! Star catalogue loading and selection.

pub mod filter;
pub mod hipparcos;


pub use filter::{filter_by_magnitude, DEFAULT_MAGNITUDE_LIMIT};
pub use hipparcos::{load_hipparcos, parse_hipparcos, parse_hipparcos_line, HIPPARCOS_EPOCH};
