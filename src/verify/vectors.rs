//! Literal test vectors with hand-computed results

use serde::Serialize;

use crate::compose::{Blend, Sample};

/// A fixed input triple and the output the formula must produce for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestVector {
    pub foreground: Sample,
    pub alpha: Sample,
    pub background: Sample,
    pub expected: Sample,
    pub description: &'static str,
}

const fn vector(
    foreground: Sample,
    alpha: Sample,
    background: Sample,
    expected: Sample,
    description: &'static str,
) -> TestVector {
    TestVector { foreground, alpha, background, expected, description }
}

/// Value a decoder fills its row buffer with before compositing
pub const BUFFER_INIT: Sample = 73;

/// Vectors checked in order; reports number them from 1.
pub const VECTORS: &[TestVector] = &[
    // alpha = 0 leaves the background untouched
    vector(0, 0, 255, 255, "transparent black on white: background only"),
    vector(255, 0, 0, 0, "transparent white on black: background only"),
    vector(100, 0, 200, 200, "transparent on gray: background only"),
    vector(123, 0, 45, 45, "transparent: foreground ignored"),
    // alpha = 255 replaces it
    vector(255, 255, 0, 255, "opaque white on black: foreground only"),
    vector(0, 255, 255, 0, "opaque black on white: foreground only"),
    vector(100, 255, 200, 100, "opaque on gray: foreground only"),
    vector(128, 128, 128, 192, "50% gray on gray: 128 + (127*128+127)/255 = 192"),
    vector(0, 128, 255, 127, "50% black on white: 0 + (127*255+127)/255 = 127"),
    vector(255, 128, 0, 255, "50% white on black: 255 + 0 = 255"),
    vector(100, 128, 200, 200, "50% blend: 100 + (127*200+127)/255 = 200"),
    // Palette entries from the defect report, foreground > alpha
    vector(134, 118, 73, 173, "malformed tRNS entry 1: fg > alpha"),
    vector(194, 140, 73, 227, "malformed tRNS entry 2: fg > alpha"),
    vector(249, 242, 73, 253, "malformed tRNS entry 3: fg > alpha"),
    // Raw sum above 255
    vector(255, 1, 255, 255, "near-transparent white on white: clamp"),
    vector(200, 50, 200, 255, "overflow case: 200 + 161 = 361 -> 255"),
    vector(250, 10, 250, 255, "high values low alpha: clamp"),
    vector(254, 1, 254, 255, "max stress: 254 + 253 = 507 -> 255"),
    // +127 rounding of the background term
    vector(0, 254, 255, 1, "nearly opaque: (1*255+127)/255 = 1"),
    vector(0, 253, 255, 2, "nearly opaque: (2*255+127)/255 = 2"),
    vector(0, 1, 1, 1, "nearly transparent low bg: (254*1+127)/255 = 1"),
    vector(1, 254, 1, 1, "min result with alpha: 1 + 0 = 1"),
    // Untouched decoder buffer
    vector(0, 0, BUFFER_INIT, 73, "fully transparent on default buffer"),
    vector(0, 128, BUFFER_INIT, 36, "half transparent black on default buffer"),
    vector(128, 64, BUFFER_INIT, 183, "partial on default buffer"),
];

/// Result of checking one vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VectorOutcome {
    /// 1-based position in [`VECTORS`]
    pub index: usize,
    #[serde(flatten)]
    pub vector: TestVector,
    pub actual: u32,
    pub passed: bool,
}

/// Check a candidate against every vector in the table.
pub fn run_vectors(candidate: &dyn Blend) -> Vec<VectorOutcome> {
    check_vectors(candidate, VECTORS)
}

pub(crate) fn check_vectors(candidate: &dyn Blend, vectors: &[TestVector]) -> Vec<VectorOutcome> {
    log::debug!("Checking {} vectors against '{}'", vectors.len(), candidate.name());

    vectors
        .iter()
        .enumerate()
        .map(|(i, vector)| {
            let actual = candidate.blend(vector.foreground, vector.alpha, vector.background);
            let passed = actual == u32::from(vector.expected);
            if !passed {
                log::warn!(
                    "Vector {} ({}) gave {} instead of {}",
                    i + 1,
                    vector.description,
                    actual,
                    vector.expected
                );
            }
            VectorOutcome { index: i + 1, vector: *vector, actual, passed }
        })
        .collect()
}
