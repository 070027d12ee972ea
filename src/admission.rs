//! The admission pipeline: gates a discovered candidate from draft to
//! persisted.
//!
//! State machine: `Drafting → Validating → AwaitingReview → {Accepted |
//! Discarded}`. Schema validation is fatal and returns the run to
//! `Drafting`; the checkers' warnings never block on their own — they are
//! surfaced for the human decision in review, and `approve()` is the point
//! that refuses outstanding fatal errors. Each candidate is an independent
//! run holding no persistent state; abandoning a run before acceptance
//! leaves nothing to clean up.

use serde::Serialize;
use ulid::Ulid;

use crate::checks::{self, CandidateCheck, CheckContext};
use crate::checks::authenticity::AuthenticityFinding;
use crate::core::config::CoreConfig;
use crate::core::error::DossierError;
use crate::core::model::{Candidate, DiscoveredEntry, Skill, Timeframe, YearMonth};
use crate::core::store::{RecordStore, SaveReceipt};
use crate::core::time;
use crate::discovery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionState {
    Drafting,
    Validating,
    AwaitingReview,
    Accepted,
    Discarded,
}

/// Merged result of schema validation and the checker fan-out for one run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub run_id: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authenticity: Vec<AuthenticityFinding>,
}

impl ValidationReport {
    pub fn has_fatal_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// One candidate's run through the pipeline.
pub struct Admission<'a> {
    store: &'a RecordStore,
    config: &'a CoreConfig,
    checks: Vec<Box<dyn CandidateCheck>>,
    run_id: String,
    state: AdmissionState,
    candidate: Option<DiscoveredEntry>,
    validated: Option<Candidate>,
    report: Option<ValidationReport>,
}

impl<'a> Admission<'a> {
    pub fn new(store: &'a RecordStore, config: &'a CoreConfig) -> Self {
        Admission {
            store,
            config,
            checks: checks::default_checks(),
            run_id: Ulid::new().to_string(),
            state: AdmissionState::Drafting,
            candidate: None,
            validated: None,
            report: None,
        }
    }

    /// Append a checker to the built-in set.
    pub fn with_check(mut self, check: Box<dyn CandidateCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn state(&self) -> AdmissionState {
        self.state
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// The submitted entry, kept for pre-filling an edit.
    pub fn candidate(&self) -> Option<&DiscoveredEntry> {
        self.candidate.as_ref()
    }

    /// Submit a candidate: schema validation first (fatal, returns to
    /// `Drafting`), then the checker fan-out. Lands in `AwaitingReview`
    /// regardless of warning count.
    pub fn submit(
        &mut self,
        entry: DiscoveredEntry,
        source_text: Option<&str>,
    ) -> Result<&ValidationReport, DossierError> {
        if self.state != AdmissionState::Drafting {
            return Err(DossierError::InvalidTransition(format!(
                "submit is only valid while drafting (state: {:?})",
                self.state
            )));
        }
        self.state = AdmissionState::Validating;

        let policy = self.config.schema_policy();
        let candidate = match entry.validated(&policy) {
            Ok(candidate) => candidate,
            Err(violation) => {
                // Keep the entry so edit() can pre-fill the retry.
                self.candidate = Some(entry);
                self.state = AdmissionState::Drafting;
                return Err(violation.into());
            }
        };

        let snapshot = self.store.load()?;
        let ctx = CheckContext {
            store: &snapshot,
            config: self.config,
            now: policy.now,
            source_text,
        };
        let outcome = checks::run_checks(&self.checks, &candidate, &ctx);

        self.report = Some(ValidationReport {
            run_id: self.run_id.clone(),
            errors: outcome.errors,
            warnings: outcome.warnings,
            duplicate_of: outcome.duplicate_of,
            authenticity: outcome.authenticity,
        });
        self.candidate = Some(entry);
        self.validated = Some(candidate);
        self.state = AdmissionState::AwaitingReview;

        match self.report.as_ref() {
            Some(report) => Ok(report),
            None => unreachable!(),
        }
    }

    /// Accept the candidate and perform the enrichment write: append an
    /// example to the duplicate skill (bumping `last_used`), or insert a new
    /// skill with this single example.
    pub fn approve(&mut self) -> Result<SaveReceipt, DossierError> {
        if self.state != AdmissionState::AwaitingReview {
            return Err(DossierError::InvalidTransition(format!(
                "approve requires an awaiting-review candidate (state: {:?})",
                self.state
            )));
        }
        let report = match self.report.as_ref() {
            Some(report) => report,
            None => unreachable!(),
        };
        if report.has_fatal_errors() {
            return Err(DossierError::InvalidTransition(format!(
                "cannot accept a candidate with {} outstanding fatal error(s)",
                report.errors.len()
            )));
        }
        let duplicate_of = report.duplicate_of.clone();
        let candidate = match self.validated.clone() {
            Some(candidate) => candidate,
            None => unreachable!(),
        };

        let mut store = self.store.load()?;
        let last_used = effective_last_used(candidate.achievement.timeframe, time::current_month());

        let appended = match duplicate_of {
            Some(existing_name) => match store.find_skill_mut(&existing_name) {
                Some(skill) => {
                    skill.examples.push(candidate.achievement.clone());
                    if last_used > skill.last_used {
                        skill.last_used = last_used;
                    }
                    true
                }
                // The store changed between validation and approval.
                None => false,
            },
            None => false,
        };
        if !appended {
            store.skills.push(Skill {
                name: candidate.skill_name.clone(),
                category: candidate.category,
                proficiency: candidate.proficiency,
                examples: vec![candidate.achievement.clone()],
                last_used,
            });
        }

        // An admitted skill is no longer a remembered rejection.
        store
            .skipped_skills
            .retain(|s| !s.eq_ignore_ascii_case(&candidate.skill_name));

        let receipt = self.store.save(&store)?;
        self.state = AdmissionState::Accepted;
        Ok(receipt)
    }

    /// Reject the candidate. No store mutation occurs.
    pub fn discard(&mut self) -> Result<(), DossierError> {
        match self.state {
            AdmissionState::Accepted | AdmissionState::Discarded => {
                Err(DossierError::InvalidTransition(format!(
                    "candidate already settled (state: {:?})",
                    self.state
                )))
            }
            _ => {
                self.state = AdmissionState::Discarded;
                Ok(())
            }
        }
    }

    /// Reject the candidate and remember the skill name in `skipped_skills`
    /// so discovery stops proposing it. Goes through the validated save path
    /// like every other mutation.
    pub fn discard_remembering_skip(&mut self) -> Result<SaveReceipt, DossierError> {
        if matches!(self.state, AdmissionState::Accepted | AdmissionState::Discarded) {
            return Err(DossierError::InvalidTransition(format!(
                "candidate already settled (state: {:?})",
                self.state
            )));
        }
        let name = self
            .candidate
            .as_ref()
            .map(|c| c.name.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                DossierError::InvalidTransition("no candidate to remember as skipped".to_string())
            })?;

        let mut store = self.store.load()?;
        if !store
            .skipped_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&name))
        {
            store.skipped_skills.push(name);
        }
        let receipt = self.store.save(&store)?;
        self.state = AdmissionState::Discarded;
        Ok(receipt)
    }

    /// Take the candidate back for editing; re-enters `Drafting` with the
    /// fields pre-filled.
    pub fn edit(&mut self) -> Result<DiscoveredEntry, DossierError> {
        if !matches!(
            self.state,
            AdmissionState::Drafting | AdmissionState::AwaitingReview
        ) {
            return Err(DossierError::InvalidTransition(format!(
                "edit requires a drafting or awaiting-review candidate (state: {:?})",
                self.state
            )));
        }
        let entry = self.candidate.clone().ok_or_else(|| {
            DossierError::InvalidTransition("no candidate to edit".to_string())
        })?;
        self.state = AdmissionState::Drafting;
        self.validated = None;
        self.report = None;
        Ok(entry)
    }
}

fn effective_last_used(timeframe: Timeframe, now: YearMonth) -> YearMonth {
    match timeframe {
        Timeframe::Month(m) => m,
        Timeframe::Range { end, .. } => end,
        // Still in use.
        Timeframe::Ongoing { .. } => now,
    }
}

/// Detect skills the store is missing from a job description, then invoke
/// the caller's discovery hook for each; every produced entry is submitted
/// through a fresh run. Runs that failed schema validation stay in
/// `Drafting` for the caller to edit and resubmit.
pub fn discover_candidates<'a, F>(
    store: &'a RecordStore,
    config: &'a CoreConfig,
    job_description: &str,
    mut hook: F,
) -> Result<Vec<Admission<'a>>, DossierError>
where
    F: FnMut(&str) -> Option<DiscoveredEntry>,
{
    let snapshot = store.load()?;
    let detected =
        discovery::detect_missing_skills(job_description, &snapshot, config.max_discovered_skills);

    let mut runs = Vec::new();
    for skill_name in detected {
        let Some(entry) = hook(&skill_name) else {
            continue;
        };
        let mut admission = Admission::new(store, config);
        // A schema-invalid entry leaves the run in Drafting; the caller
        // inspects state() and decides.
        let _ = admission.submit(entry, Some(job_description));
        runs.push(admission);
    }
    Ok(runs)
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "admission",
        "version": "1.0.0",
        "description": "Candidate admission state machine with enrichment write",
        "states": ["drafting", "validating", "awaiting_review", "accepted", "discarded"],
        "operations": ["submit", "approve", "discard", "discard_remembering_skip", "edit"],
        "checks": ["consistency", "authenticity"]
    })
}
