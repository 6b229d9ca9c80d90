//! palette-compose - Verification of the sRGB composition formula for palette images
//!
//! Palette images with a tRNS chunk and gamma correction are composited
//! per channel: the gamma corrected entry, premultiplied against black, is
//! added to the background scaled by the remaining coverage. This library
//! provides:
//! - The formula itself ([`compose()`]) and a checked variant for wide integers
//! - A table of literal vectors and four property sweeps over the input domain
//! - Text and JSON reports of a verification run

pub mod cli;
pub mod compose;
pub mod config;
pub mod report;
pub mod verify;

pub use compose::{compose, compose_checked, Sample};
