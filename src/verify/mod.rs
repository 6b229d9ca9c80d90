//! Verification of a composition formula
//!
//! Two independent batches run against the same candidate: the literal
//! vector table and the property sweeps. Their failures add up to a single
//! count; zero means the candidate is correct.

mod properties;
mod vectors;

pub use properties::{sweep, sweep_all, Property, PropertyOutcome, Violation, RECORDED_VIOLATIONS};
pub use vectors::{run_vectors, TestVector, VectorOutcome, BUFFER_INIT, VECTORS};

use crate::compose::Blend;
use crate::config::SweepGrid;

/// Everything observed in one verification run
#[derive(Debug, Clone)]
pub struct Report {
    pub candidate: &'static str,
    pub grid: SweepGrid,
    pub vectors: Vec<VectorOutcome>,
    pub properties: Vec<PropertyOutcome>,
}

impl Report {
    pub fn vector_failures(&self) -> usize {
        self.vectors.iter().filter(|o| !o.passed).count()
    }

    pub fn property_violations(&self) -> usize {
        self.properties.iter().map(|o| o.violation_count).sum()
    }

    /// Failures across both batches
    pub fn failures(&self) -> usize {
        self.vector_failures() + self.property_violations()
    }

    pub fn passed(&self) -> bool {
        self.failures() == 0
    }
}

/// Run both batches against `candidate`.
pub fn verify(candidate: &dyn Blend, grid: &SweepGrid) -> Report {
    log::info!("Verifying candidate '{}'", candidate.name());

    let vectors = run_vectors(candidate);
    let properties = sweep_all(candidate, grid);
    let report = Report { candidate: candidate.name(), grid: *grid, vectors, properties };

    log::info!(
        "Candidate '{}': {} vector failure(s), {} property violation(s)",
        report.candidate,
        report.vector_failures(),
        report.property_violations()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{SrgbCompose, Unclamped};

    #[test]
    fn test_fixed_formula_passes() {
        let report = verify(&SrgbCompose, &SweepGrid::default());
        assert_eq!(report.candidate, "srgb");
        assert_eq!(report.vectors.len(), VECTORS.len());
        assert_eq!(report.properties.len(), 4);
        assert_eq!(report.failures(), 0);
        assert!(report.passed());
    }

    #[test]
    fn test_unclamped_failures_combine_both_batches() {
        let report = verify(&Unclamped, &SweepGrid::default());
        assert_eq!(report.vector_failures(), 4);
        assert!(report.property_violations() > 0);
        assert_eq!(report.failures(), report.vector_failures() + report.property_violations());
        assert!(!report.passed());
    }
}
