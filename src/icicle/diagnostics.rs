//! Run-level diagnostics.
//!
//! Edges are processed independently and each produces its own
//! `RunDiagnostics`; the orchestrator merges them so a caller gets one report
//! for the whole run instead of a message per edge.

use std::fmt;

use serde::Serialize;

use super::eligibility::SkipReason;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDiagnostics {
    /// Edges in the working set (after the selection filter).
    pub edges_considered: usize,
    /// Edges that went through placement.
    pub edges_processed: usize,
    /// Edges whose ground-plane span cannot fit a minimum-radius cone.
    pub skipped_too_short: usize,
    /// Vertical edges (projection collapses to a point).
    pub skipped_degenerate: usize,
    /// Inputs that were not two finite, distinct endpoints.
    pub skipped_malformed: usize,
    /// Set when at least one edge used up its iteration budget.
    pub iteration_cap_reached: bool,
    /// Number of edges that used up their iteration budget.
    pub iteration_cap_edges: usize,
    /// Cones produced.
    pub icicle_count: usize,
    /// Bend rings translated across all cones.
    pub bend_ring_count: usize,
    pub warnings: Vec<String>,
}

impl RunDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooShort => self.skipped_too_short += 1,
            SkipReason::DegenerateProjection => self.skipped_degenerate += 1,
        }
    }

    pub fn record_iteration_cap(&mut self) {
        self.iteration_cap_reached = true;
        self.iteration_cap_edges += 1;
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped_too_short + self.skipped_degenerate + self.skipped_malformed
    }

    /// True when every considered edge was processed and none hit the cap.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_count() == 0 && !self.iteration_cap_reached && self.warnings.is_empty()
    }

    /// Counts are summed, flags are OR'd, warnings appended.
    pub fn merge(&mut self, other: &Self) {
        self.edges_considered += other.edges_considered;
        self.edges_processed += other.edges_processed;
        self.skipped_too_short += other.skipped_too_short;
        self.skipped_degenerate += other.skipped_degenerate;
        self.skipped_malformed += other.skipped_malformed;
        self.iteration_cap_reached |= other.iteration_cap_reached;
        self.iteration_cap_edges += other.iteration_cap_edges;
        self.icicle_count += other.icicle_count;
        self.bend_ring_count += other.bend_ring_count;
        self.warnings.extend(other.warnings.iter().cloned());
    }

    /// User-facing notices for the run, one per kind of problem.
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.skipped_degenerate > 0 {
            lines.push(format!(
                "{} edge(s) skipped during icicle creation: line too steep",
                self.skipped_degenerate
            ));
        }
        if self.skipped_too_short > 0 {
            lines.push(format!(
                "{} edge(s) skipped: too short for the minimum radius",
                self.skipped_too_short
            ));
        }
        if self.skipped_malformed > 0 {
            lines.push(format!(
                "{} edge(s) skipped: not a pair of distinct endpoints",
                self.skipped_malformed
            ));
        }
        if self.iteration_cap_reached {
            lines.push(format!(
                "maximum iterations reached on {} edge(s), may be missing some icicles",
                self.iteration_cap_edges
            ));
        }
        lines
    }

    /// Short one-line summary for logs.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "icicles:{} edges:{}/{}",
            self.icicle_count, self.edges_processed, self.edges_considered
        )];
        if self.skipped_too_short > 0 {
            parts.push(format!("too-short:{}", self.skipped_too_short));
        }
        if self.skipped_degenerate > 0 {
            parts.push(format!("vertical:{}", self.skipped_degenerate));
        }
        if self.skipped_malformed > 0 {
            parts.push(format!("malformed:{}", self.skipped_malformed));
        }
        if self.iteration_cap_reached {
            parts.push(format!("iteration-cap:{}", self.iteration_cap_edges));
        }
        parts.join(" ")
    }
}

impl fmt::Display for RunDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Icicle run:")?;
        writeln!(f, "  Icicles: {}", self.icicle_count)?;
        writeln!(
            f,
            "  Edges: {} processed of {} considered",
            self.edges_processed, self.edges_considered
        )?;
        for line in self.report_lines() {
            writeln!(f, "  - {line}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "  Warning: {warning}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_clean() {
        let diag = RunDiagnostics::default();
        assert!(diag.is_clean());
        assert!(diag.report_lines().is_empty());
        assert_eq!(diag.skipped_count(), 0);
    }

    #[test]
    fn test_record_skip_by_reason() {
        let mut diag = RunDiagnostics::new();
        diag.record_skip(SkipReason::TooShort);
        diag.record_skip(SkipReason::TooShort);
        diag.record_skip(SkipReason::DegenerateProjection);

        assert_eq!(diag.skipped_too_short, 2);
        assert_eq!(diag.skipped_degenerate, 1);
        assert!(!diag.is_clean());
    }

    #[test]
    fn test_merge() {
        let mut a = RunDiagnostics {
            edges_considered: 2,
            edges_processed: 1,
            icicle_count: 4,
            skipped_too_short: 1,
            warnings: vec!["first".to_string()],
            ..Default::default()
        };
        let mut b = RunDiagnostics {
            edges_considered: 3,
            edges_processed: 3,
            icicle_count: 9,
            ..Default::default()
        };
        b.record_iteration_cap();
        b.add_warning("second");

        a.merge(&b);

        assert_eq!(a.edges_considered, 5);
        assert_eq!(a.edges_processed, 4);
        assert_eq!(a.icicle_count, 13);
        assert!(a.iteration_cap_reached);
        assert_eq!(a.iteration_cap_edges, 1);
        assert_eq!(a.warnings, vec!["first", "second"]);
    }

    #[test]
    fn test_report_mentions_each_problem_once() {
        let mut diag = RunDiagnostics::new();
        diag.record_skip(SkipReason::DegenerateProjection);
        diag.record_skip(SkipReason::DegenerateProjection);
        diag.record_iteration_cap();
        diag.record_iteration_cap();

        let lines = diag.report_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("too steep"));
        assert!(lines[1].contains("2 edge(s)"));

        let summary = diag.summary();
        assert!(summary.contains("vertical:2"));
        assert!(summary.contains("iteration-cap:2"));

        let text = diag.to_string();
        assert!(text.contains("Icicles: 0"));
        assert!(text.contains("maximum iterations"));
    }
}
