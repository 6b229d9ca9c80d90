//! Quantified properties swept over a grid of input triples

use serde::Serialize;

use crate::compose::{Blend, Sample};
use crate::config::{Steps, SweepGrid};

/// A property every candidate formula must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    /// alpha = 0 yields the background
    Transparency,
    /// alpha = 255 yields the foreground
    Opacity,
    /// Output stays within 0-255
    Range,
    /// Output never decreases as the background increases
    Monotonic,
}

impl Property {
    pub const ALL: [Property; 4] =
        [Property::Transparency, Property::Opacity, Property::Range, Property::Monotonic];

    /// Position in report order, starting at 1
    pub fn number(&self) -> usize {
        match self {
            Property::Transparency => 1,
            Property::Opacity => 2,
            Property::Range => 3,
            Property::Monotonic => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Property::Transparency => "alpha=0 => result = background",
            Property::Opacity => "alpha=255 => result = foreground",
            Property::Range => "result always in [0, 255]",
            Property::Monotonic => "monotonic in background",
        }
    }

    fn steps(&self, grid: &SweepGrid) -> Steps {
        match self {
            Property::Transparency => grid.transparency,
            Property::Opacity => grid.opacity,
            Property::Range => grid.range,
            Property::Monotonic => grid.monotonic,
        }
    }
}

/// One input triple that broke a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub foreground: Sample,
    pub alpha: Sample,
    pub background: Sample,
    pub actual: u32,
    /// Exact value the property requires, for the identity properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u32>,
    /// Result at the preceding background value, for monotonicity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<u32>,
}

impl Violation {
    fn new(foreground: Sample, alpha: Sample, background: Sample, actual: u32) -> Self {
        Self { foreground, alpha, background, actual, expected: None, previous: None }
    }
}

/// Most violations kept per property; later ones are only counted.
pub const RECORDED_VIOLATIONS: usize = 1_000;

/// Result of sweeping one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyOutcome {
    #[serde(rename = "name")]
    pub property: Property,
    pub evaluations: u64,
    /// Every violation found, recorded or not
    pub violation_count: usize,
    /// The first [`RECORDED_VIOLATIONS`] in sweep order
    pub violations: Vec<Violation>,
}

impl PropertyOutcome {
    fn new(property: Property) -> Self {
        Self { property, evaluations: 0, violation_count: 0, violations: Vec::new() }
    }

    pub fn passed(&self) -> bool {
        self.violation_count == 0
    }

    fn record(&mut self, violation: Violation) {
        self.violation_count += 1;
        if self.violations.len() < RECORDED_VIOLATIONS {
            self.violations.push(violation);
        }
    }
}

/// Values from `start` through `end` inclusive, `step` apart.
fn axis(start: Sample, end: Sample, step: u8) -> impl Iterator<Item = Sample> + Clone {
    (start..=end).step_by(usize::from(step.max(1)))
}

/// Sweep one property over its part of the grid.
pub fn sweep(property: Property, candidate: &dyn Blend, grid: &SweepGrid) -> PropertyOutcome {
    let steps = property.steps(grid);
    log::debug!("Sweeping property {} ({:?}) with steps {:?}", property.number(), property, steps);

    let mut outcome = PropertyOutcome::new(property);
    match property {
        Property::Transparency => sweep_identity(candidate, steps, 0, &mut outcome),
        Property::Opacity => sweep_identity(candidate, steps, 255, &mut outcome),
        Property::Range => sweep_range(candidate, steps, &mut outcome),
        Property::Monotonic => sweep_monotonic(candidate, steps, &mut outcome),
    }

    if let Some(first) = outcome.violations.first() {
        log::warn!(
            "Property {} violated {} time(s), first at ({}, {}, {})",
            property.number(),
            outcome.violation_count,
            first.foreground,
            first.alpha,
            first.background
        );
    }
    log::debug!("Property {} done after {} evaluations", property.number(), outcome.evaluations);
    outcome
}

/// Run every property in report order.
pub fn sweep_all(candidate: &dyn Blend, grid: &SweepGrid) -> Vec<PropertyOutcome> {
    Property::ALL.iter().map(|&property| sweep(property, candidate, grid)).collect()
}

/// alpha pinned at 0 or 255; the result must equal background or foreground.
fn sweep_identity(candidate: &dyn Blend, steps: Steps, alpha: Sample, outcome: &mut PropertyOutcome) {
    for background in axis(0, 255, steps.background) {
        for foreground in axis(0, 255, steps.foreground) {
            let actual = candidate.blend(foreground, alpha, background);
            outcome.evaluations += 1;

            let expected = if alpha == 0 { background } else { foreground };
            if actual != u32::from(expected) {
                outcome.record(Violation {
                    expected: Some(u32::from(expected)),
                    ..Violation::new(foreground, alpha, background, actual)
                });
            }
        }
    }
}

fn sweep_range(candidate: &dyn Blend, steps: Steps, outcome: &mut PropertyOutcome) {
    for foreground in axis(0, 255, steps.foreground) {
        for alpha in axis(0, 255, steps.alpha) {
            for background in axis(0, 255, steps.background) {
                let actual = candidate.blend(foreground, alpha, background);
                outcome.evaluations += 1;

                if actual > 255 {
                    outcome.record(Violation::new(foreground, alpha, background, actual));
                }
            }
        }
    }
}

/// Partial alphas only; 0 and 255 do not depend on the background in the
/// same way and are covered by the identity properties.
fn sweep_monotonic(candidate: &dyn Blend, steps: Steps, outcome: &mut PropertyOutcome) {
    for foreground in axis(0, 255, steps.foreground) {
        for alpha in axis(1, 254, steps.alpha) {
            let mut previous = None;
            for background in axis(0, 255, steps.background) {
                let actual = candidate.blend(foreground, alpha, background);
                outcome.evaluations += 1;

                if let Some(prev) = previous {
                    if actual < prev {
                        outcome.record(Violation {
                            previous: Some(prev),
                            ..Violation::new(foreground, alpha, background, actual)
                        });
                    }
                }
                previous = Some(actual);
            }
        }
    }
}
