//! Features Module - Encoding & Schema Alignment
//!
//! Turns a raw student record into the exact ordered numeric vector the
//! trained classifier expects. Encoding is pure; alignment never fails.

pub mod encoder;
pub mod align;


// Re-export common types
pub use align::{align, AlignedFeatureVector};
pub use encoder::{encode, EncodedFeatureSet, EncodingError};
