//! Rendering of verification reports
//!
//! Text output is meant for people and CI logs; JSON carries the recorded
//! violations and full counts for tooling.

use std::io::{self, Write};

use serde::Serialize;

use crate::config::SweepGrid;
use crate::verify::{Property, PropertyOutcome, Report, VectorOutcome, Violation};

/// Banner rule
pub const RULE: &str = "============================================================";

/// Options for the text renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Most violation lines printed per property; all are still counted
    pub max_violations: Option<usize>,
}

/// Write the full human-readable report.
pub fn write_text<W: Write>(out: &mut W, report: &Report, options: &TextOptions) -> io::Result<()> {
    writeln!(out, "compose-check: sRGB palette composition verification")?;
    writeln!(out, "candidate: {}", report.candidate)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    write_vectors(out, &report.vectors)?;
    writeln!(out)?;
    write_properties(out, &report.properties, options)?;

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    if report.passed() {
        writeln!(out, "SUCCESS: All tests passed.")?;
    } else {
        writeln!(out, "FAILURE: {} test(s) failed.", report.failures())?;
    }
    Ok(())
}

fn write_vectors<W: Write>(out: &mut W, vectors: &[VectorOutcome]) -> io::Result<()> {
    writeln!(out, "Running {} sRGB composition tests...", vectors.len())?;
    writeln!(out)?;

    let mut failures = 0;
    for outcome in vectors {
        let v = &outcome.vector;
        if outcome.passed {
            writeln!(out, "PASS [{}]: {}", outcome.index, v.description)?;
        } else {
            failures += 1;
            writeln!(out, "FAIL [{}]: {}", outcome.index, v.description)?;
            writeln!(
                out,
                "  compose({}, {}, {}) = {}, expected {}",
                v.foreground, v.alpha, v.background, outcome.actual, v.expected
            )?;
        }
    }

    writeln!(out)?;
    if failures == 0 {
        writeln!(out, "All {} tests passed.", vectors.len())
    } else {
        writeln!(out, "{} of {} tests FAILED.", failures, vectors.len())
    }
}

fn write_properties<W: Write>(
    out: &mut W,
    properties: &[PropertyOutcome],
    options: &TextOptions,
) -> io::Result<()> {
    writeln!(out, "Verifying formula properties...")?;
    writeln!(out)?;

    for outcome in properties {
        let property = outcome.property;
        writeln!(out, "Property {}: {}", property.number(), property.title())?;

        if outcome.passed() {
            writeln!(out, "  PASS")?;
            continue;
        }

        let limit = options.max_violations.unwrap_or(usize::MAX);
        let mut printed = 0;
        for violation in outcome.violations.iter().take(limit) {
            writeln!(out, "  FAIL: {}", describe_violation(property, violation))?;
            printed += 1;
        }
        if outcome.violation_count > printed {
            writeln!(out, "  ... and {} more", outcome.violation_count - printed)?;
        }
    }

    let violations: usize = properties.iter().map(|o| o.violation_count).sum();
    writeln!(out)?;
    if violations == 0 {
        writeln!(out, "All formula properties verified.")
    } else {
        writeln!(out, "{} property violations found.", violations)
    }
}

fn describe_violation(property: Property, v: &Violation) -> String {
    match property {
        Property::Transparency | Property::Opacity => format!(
            "compose({}, {}, {}) = {}, expected {}",
            v.foreground,
            v.alpha,
            v.background,
            v.actual,
            v.expected.map_or_else(|| "?".to_string(), |e| e.to_string())
        ),
        Property::Range => {
            format!("compose({}, {}, {}) = {} > 255", v.foreground, v.alpha, v.background, v.actual)
        }
        Property::Monotonic => {
            let previous = v.previous.map_or_else(String::new, |p| format!(" ({} < {})", v.actual, p));
            format!("non-monotonic at fg={}, alpha={}, bg={}{}", v.foreground, v.alpha, v.background, previous)
        }
    }
}

#[derive(Serialize)]
struct JsonProperty<'a> {
    #[serde(flatten)]
    outcome: &'a PropertyOutcome,
    number: usize,
    title: &'static str,
    passed: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    candidate: &'static str,
    grid: &'a SweepGrid,
    vectors: &'a [VectorOutcome],
    properties: Vec<JsonProperty<'a>>,
    vector_failures: usize,
    property_violations: usize,
    failures: usize,
    passed: bool,
}

/// Write the report as one pretty-printed JSON document.
pub fn write_json<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    let doc = JsonReport {
        candidate: report.candidate,
        grid: &report.grid,
        vectors: &report.vectors,
        properties: report
            .properties
            .iter()
            .map(|outcome| JsonProperty {
                outcome,
                number: outcome.property.number(),
                title: outcome.property.title(),
                passed: outcome.passed(),
            })
            .collect(),
        vector_failures: report.vector_failures(),
        property_violations: report.property_violations(),
        failures: report.failures(),
        passed: report.passed(),
    };

    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{SrgbCompose, Unclamped};
    use crate::verify::verify;

    fn render_text(report: &Report, options: TextOptions) -> String {
        let mut buf = Vec::new();
        write_text(&mut buf, report, &options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_passing_text_report() {
        let report = verify(&SrgbCompose, &SweepGrid::default());
        let text = render_text(&report, TextOptions::default());

        assert!(text.contains("Running 25 sRGB composition tests..."));
        assert!(text.contains("PASS [1]: transparent black on white: background only"));
        assert!(text.contains("PASS [25]: partial on default buffer"));
        assert!(text.contains("All 25 tests passed."));
        assert!(text.contains("Property 1: alpha=0 => result = background\n  PASS"));
        assert!(text.contains("Property 4: monotonic in background\n  PASS"));
        assert!(text.contains("All formula properties verified."));
        assert!(text.trim_end().ends_with("SUCCESS: All tests passed."));
        assert!(!text.contains("FAIL"));
    }

    #[test]
    fn test_failing_text_report() {
        let report = verify(&Unclamped, &SweepGrid::default());
        let text = render_text(&report, TextOptions::default());

        assert!(text.contains("FAIL [18]: max stress: 254 + 253 = 507 -> 255"));
        assert!(text.contains("  compose(254, 1, 254) = 507, expected 255"));
        assert!(text.contains("4 of 25 tests FAILED."));
        assert!(text.contains("  FAIL: compose(2, 1, 255) = 256 > 255"));
        assert!(text.contains("Property 2: alpha=255 => result = foreground\n  PASS"));
        assert!(text.contains(&format!("FAILURE: {} test(s) failed.", report.failures())));
    }

    #[test]
    fn test_violation_lines_are_capped() {
        let report = verify(&Unclamped, &SweepGrid::default());
        let text = render_text(&report, TextOptions { max_violations: Some(2) });

        let range_violations = report.properties[2].violation_count;
        assert_eq!(text.matches(" > 255\n").count(), 2);
        assert!(text.contains(&format!("  ... and {} more", range_violations - 2)));
        // totals still reflect every violation
        assert!(text.contains(&format!("{} property violations found.", range_violations)));
    }

    #[test]
    fn test_describe_monotonic_violation() {
        let v = Violation {
            foreground: 10,
            alpha: 20,
            background: 30,
            actual: 5,
            expected: None,
            previous: Some(6),
        };
        assert_eq!(
            describe_violation(Property::Monotonic, &v),
            "non-monotonic at fg=10, alpha=20, bg=30 (5 < 6)"
        );
    }

    #[test]
    fn test_json_report() {
        let report = verify(&Unclamped, &SweepGrid::default());
        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["candidate"], "unclamped");
        assert_eq!(value["passed"], false);
        assert_eq!(value["vector_failures"], 4);
        assert_eq!(value["failures"], report.failures());
        assert_eq!(value["vectors"][0]["index"], 1);
        assert_eq!(value["vectors"][0]["description"], "transparent black on white: background only");
        assert_eq!(value["properties"][2]["name"], "range");
        assert_eq!(value["properties"][2]["number"], 3);
        assert_eq!(value["properties"][2]["passed"], false);
        assert_eq!(value["properties"][2]["violations"][0]["alpha"], 1);
        assert_eq!(
            value["properties"][2]["violations"].as_array().map(Vec::len),
            Some(crate::verify::RECORDED_VIOLATIONS)
        );
        assert_eq!(value["properties"][2]["violation_count"], report.properties[2].violation_count);
        assert!(value["properties"][2]["violations"][0].get("expected").is_none());
        assert_eq!(value["grid"]["range"]["background"], 17);
    }
}
