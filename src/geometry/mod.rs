pub mod curve;

pub use curve::{ArcSpan, Curve};
