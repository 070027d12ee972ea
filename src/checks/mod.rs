//! Pluggable candidate checkers.
//!
//! The admission pipeline runs a list of independent, pure checkers over a
//! candidate and merges their outcomes. The two built-ins are
//! [`consistency::ConsistencyCheck`] and [`authenticity::AuthenticityCheck`];
//! callers may append their own. Checkers never mutate the store and run
//! order-independently, so the list executes in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::checks::authenticity::AuthenticityFinding;
use crate::core::config::CoreConfig;
use crate::core::model::{Candidate, CareerStore, YearMonth};

pub mod authenticity;
pub mod consistency;

/// Read-only facts a checker may consult.
pub struct CheckContext<'a> {
    pub store: &'a CareerStore,
    pub config: &'a CoreConfig,
    pub now: YearMonth,
    /// Originating job-description text, when the caller has one; enables
    /// copy-paste detection.
    pub source_text: Option<&'a str>,
}

/// What one checker (or the merged set) found. Errors are fatal to
/// admission; warnings inform the human review and never block on their own.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Existing skill this candidate duplicates, when one matches
    /// case-insensitively. Signals "append an example" rather than an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authenticity: Vec<AuthenticityFinding>,
}

impl CheckOutcome {
    pub fn merge(&mut self, other: CheckOutcome) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        if self.duplicate_of.is_none() {
            self.duplicate_of = other.duplicate_of;
        }
        self.authenticity.extend(other.authenticity);
    }
}

pub trait CandidateCheck: Send + Sync {
    fn name(&self) -> &'static str;
    fn run(&self, candidate: &Candidate, ctx: &CheckContext<'_>) -> CheckOutcome;
}

/// The built-in checker set, in a fixed display order.
pub fn default_checks() -> Vec<Box<dyn CandidateCheck>> {
    vec![
        Box::new(consistency::ConsistencyCheck),
        Box::new(authenticity::AuthenticityCheck),
    ]
}

/// Run every checker and merge the outcomes. Execution order is
/// unobservable; merge order follows the list so reports stay stable.
pub fn run_checks(
    checks: &[Box<dyn CandidateCheck>],
    candidate: &Candidate,
    ctx: &CheckContext<'_>,
) -> CheckOutcome {
    let outcomes: Vec<CheckOutcome> = checks
        .par_iter()
        .map(|check| check.run(candidate, ctx))
        .collect();
    let mut merged = CheckOutcome::default();
    for outcome in outcomes {
        merged.merge(outcome);
    }
    merged
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "checks",
        "version": "1.0.0",
        "description": "Pure candidate checkers merged into one outcome",
        "builtin": ["consistency", "authenticity"],
        "outcome": {
            "errors": "fatal to admission",
            "warnings": "advisory, surfaced for human review",
            "duplicate_of": "existing skill name when the candidate matches one",
            "authenticity": "(class, matched, suggestion) findings"
        }
    })
}
