//! Report Emission
//!
//! Serializes dependency decisions in stable, machine-parseable forms.

use droid_deps_core::Result;

use crate::resolver::DependencyDecision;

/// Emits dependency decisions for downstream consumption and logging.
pub struct ReportEmitter;

impl ReportEmitter {
    /// One canonical-path line per component, in the decision's stable
    /// order, so downstream text matching is reproducible across runs.
    pub fn emit(decision: &DependencyDecision) -> Vec<String> {
        decision
            .components()
            .iter()
            .map(|c| c.id.canonical_path())
            .collect()
    }

    /// JSON form carrying per-component status.
    pub fn emit_json(decision: &DependencyDecision) -> Result<String> {
        Ok(serde_json::to_string_pretty(decision)?)
    }
}
