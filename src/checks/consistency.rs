//! Cross-references a candidate against existing store facts.
//!
//! Pure function of (candidate, store): future dates are errors; everything
//! else is advisory. An unknown company is only a warning because legitimate
//! side projects and unlisted work exist.

use crate::checks::{CandidateCheck, CheckContext, CheckOutcome};
use crate::core::model::{Candidate, EndDate};

pub struct ConsistencyCheck;

impl CandidateCheck for ConsistencyCheck {
    fn name(&self) -> &'static str {
        "consistency"
    }

    fn run(&self, candidate: &Candidate, ctx: &CheckContext<'_>) -> CheckOutcome {
        let mut out = CheckOutcome::default();
        check_timeframe(candidate, ctx, &mut out);
        check_company(candidate, ctx, &mut out);
        check_duplicate(candidate, ctx, &mut out);
        check_reasonability(candidate, ctx, &mut out);
        out
    }
}

fn check_timeframe(candidate: &Candidate, ctx: &CheckContext<'_>, out: &mut CheckOutcome) {
    let tf = candidate.achievement.timeframe;

    if tf.start() > ctx.now {
        out.errors
            .push(format!("start date {} is in the future", tf.start()));
    }
    if let Some(end) = tf.end()
        && end > ctx.now
    {
        out.errors.push(format!("end date {end} is in the future"));
    }

    // Against the referenced job's range, when the company resolves.
    // An unresolved company is handled by check_company as "cannot verify".
    if let Some(job) = ctx.store.find_job(&candidate.achievement.company) {
        let starts_before = tf.start() < job.start_date;
        let ends_after = match (tf.end(), job.end_date) {
            (Some(end), EndDate::On(job_end)) => end > job_end,
            _ => false,
        };
        if starts_before || ends_after {
            out.warnings.push(format!(
                "timeframe {tf} falls outside your employment at {} ({} to {}); is this from a side project?",
                job.company, job.start_date, job.end_date
            ));
        }
    }
}

fn check_company(candidate: &Candidate, ctx: &CheckContext<'_>, out: &mut CheckOutcome) {
    if ctx.store.find_job(&candidate.achievement.company).is_none() {
        out.warnings.push(format!(
            "company `{}` is not in your job history; is this a side project or freelance work?",
            candidate.achievement.company
        ));
    }
}

fn check_duplicate(candidate: &Candidate, ctx: &CheckContext<'_>, out: &mut CheckOutcome) {
    if let Some(existing) = ctx.store.find_skill(&candidate.skill_name) {
        out.duplicate_of = Some(existing.name.clone());
        out.warnings.push(format!(
            "skill `{}` is already listed with {} example(s); accepting appends another example",
            existing.name,
            existing.examples.len()
        ));
    }
}

fn check_reasonability(candidate: &Candidate, ctx: &CheckContext<'_>, out: &mut CheckOutcome) {
    // Stale evidence only matters for a skill being introduced; an existing
    // skill already carries newer examples.
    if ctx.store.find_skill(&candidate.skill_name).is_some() {
        return;
    }
    let months_ago = ctx.now.months_since(candidate.achievement.timeframe.start());
    let bound = i64::from(ctx.config.years_back_bound) * 12;
    if months_ago > bound {
        out.warnings.push(format!(
            "this evidence is from roughly {} years ago; is `{}` still a current capability?",
            months_ago / 12,
            candidate.skill_name
        ));
    }
}
