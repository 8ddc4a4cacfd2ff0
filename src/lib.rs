pub mod align;
pub mod compare;
pub mod error;
pub mod geometry;
pub mod math;
pub mod spatial;

pub use error::{CurvalignError, Result};
