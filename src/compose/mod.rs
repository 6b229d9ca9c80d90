//! Compositing of palette samples with tRNS alpha over a background

mod blend;
mod error;

// Re-export public API
pub use blend::{compose, compose_checked, Blend, Sample, SrgbCompose, Unclamped};
pub use error::{Channel, SampleError};
