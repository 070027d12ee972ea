//! Whole-store validation.
//!
//! Walks a [`CareerStore`] and re-applies every field-level rule plus the
//! global invariants: accepted version tag, case-normalized skill-name
//! uniqueness, and resolution of `skills_used` weak references. Pure; reused
//! by the record store on both load and save, and by the admission pipeline
//! before the enrichment write lands.

use rustc_hash::FxHashSet;

use crate::core::error::SchemaViolation;
use crate::core::model::{CareerStore, SchemaPolicy, STORE_VERSION};

pub fn validate_store(store: &CareerStore, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
    if store.version != STORE_VERSION {
        return Err(SchemaViolation::new(
            "version",
            format!(
                "unsupported store version `{}` (loader understands `{STORE_VERSION}`)",
                store.version
            ),
        ));
    }

    if let Some(contact) = &store.contact_info {
        contact.validate("contact_info")?;
    }

    for (i, job) in store.jobs.iter().enumerate() {
        job.validate(&format!("jobs[{i}]"), policy)?;
    }

    let mut seen_names = FxHashSet::default();
    for (i, skill) in store.skills.iter().enumerate() {
        skill.validate(&format!("skills[{i}]"), policy)?;
        if !seen_names.insert(skill.name.trim().to_lowercase()) {
            return Err(SchemaViolation::new(
                format!("skills[{i}].name"),
                format!("duplicate skill name `{}` (names are unique case-insensitively)", skill.name),
            ));
        }
    }

    // Weak references resolve only after the full skill set is known.
    for (i, job) in store.jobs.iter().enumerate() {
        for (j, reference) in job.skills_used.iter().enumerate() {
            if !seen_names.contains(&reference.trim().to_lowercase()) {
                return Err(SchemaViolation::new(
                    format!("jobs[{i}].skills_used[{j}]"),
                    format!("`{reference}` does not resolve to any skill name"),
                ));
            }
        }
    }

    for (i, achievement) in store.achievements.iter().enumerate() {
        achievement.validate(&format!("achievements[{i}]"), policy)?;
    }
    for (i, education) in store.education.iter().enumerate() {
        education.validate(&format!("education[{i}]"), policy)?;
    }
    for (i, certification) in store.certifications.iter().enumerate() {
        certification.validate(&format!("certifications[{i}]"), policy)?;
    }
    for (i, project) in store.projects.iter().enumerate() {
        project.validate(&format!("projects[{i}]"), policy)?;
    }
    for (i, value) in store.personal_values.iter().enumerate() {
        value.validate(&format!("personal_values[{i}]"))?;
    }
    for (i, skipped) in store.skipped_skills.iter().enumerate() {
        if skipped.trim().is_empty() {
            return Err(SchemaViolation::new(
                format!("skipped_skills[{i}]"),
                "must not be empty",
            ));
        }
    }

    Ok(())
}
