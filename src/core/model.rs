//! Entity types and field-level constraints for the career store.
//!
//! Every entity validates at construction time: an out-of-range field fails
//! with a [`SchemaViolation`] naming the field and the rule broken. The same
//! rules are re-applied by [`crate::core::validate`] when a persisted
//! document is loaded, so no invalid value survives either path. Date fields
//! are newtypes over the canonical `YYYY-MM` grammar and reject malformed
//! tokens during deserialization.

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::SchemaViolation;

/// Store document version accepted by the loader.
pub const STORE_VERSION: &str = "1.0";

/// Rules the schema layer enforces that are configurable or clock-relative.
///
/// Built from [`crate::core::config::CoreConfig::schema_policy`]; tests
/// construct it directly to pin `now`.
#[derive(Debug, Clone)]
pub struct SchemaPolicy {
    /// Earliest plausible year for any historical date.
    pub min_year: i32,
    /// Current calendar month; historical dates may not pass it.
    pub now: YearMonth,
    /// Lowercased generic skill names rejected outright.
    pub skill_denylist: Vec<String>,
}

impl SchemaPolicy {
    pub fn denies(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.skill_denylist.iter().any(|d| *d == needle)
    }
}

// --- Date grammar ---

/// A calendar month in the canonical `YYYY-MM` form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("month {month} is out of range (01-12)"));
        }
        if !(1000..=9999).contains(&year) {
            return Err(format!("year {year} is out of range (1000-9999)"));
        }
        Ok(YearMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whole months from `earlier` to `self`; negative when `self` precedes it.
    pub fn months_since(&self, earlier: YearMonth) -> i64 {
        let a = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let b = i64::from(earlier.year) * 12 + i64::from(earlier.month) - 1;
        a - b
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || format!("`{s}` does not match the canonical YYYY-MM form");
        let (y, m) = s.split_once('-').ok_or_else(&malformed)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(malformed());
        }
        let year: i32 = y.parse().map_err(|_| malformed())?;
        let month: u32 = m.parse().map_err(|_| malformed())?;
        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> String {
        ym.to_string()
    }
}

impl From<DateTime<Utc>> for YearMonth {
    fn from(dt: DateTime<Utc>) -> Self {
        // chrono guarantees the month is in range.
        YearMonth {
            year: dt.year(),
            month: dt.month(),
        }
    }
}

/// End of an employment: a concrete month or the `Present` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EndDate {
    On(YearMonth),
    Present,
}

impl fmt::Display for EndDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndDate::On(ym) => write!(f, "{ym}"),
            EndDate::Present => write!(f, "Present"),
        }
    }
}

impl FromStr for EndDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Present" {
            Ok(EndDate::Present)
        } else {
            Ok(EndDate::On(s.parse()?))
        }
    }
}

impl TryFrom<String> for EndDate {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EndDate> for String {
    fn from(e: EndDate) -> String {
        e.to_string()
    }
}

/// A single month, a closed range, or an open range ending at `Present`.
///
/// Textual forms: `YYYY-MM`, `YYYY-MM to YYYY-MM`, `YYYY-MM to Present`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    Month(YearMonth),
    Range { start: YearMonth, end: YearMonth },
    Ongoing { start: YearMonth },
}

impl Timeframe {
    pub fn start(&self) -> YearMonth {
        match self {
            Timeframe::Month(m) => *m,
            Timeframe::Range { start, .. } | Timeframe::Ongoing { start } => *start,
        }
    }

    /// Concrete end month; `None` while ongoing.
    pub fn end(&self) -> Option<YearMonth> {
        match self {
            Timeframe::Month(m) => Some(*m),
            Timeframe::Range { end, .. } => Some(*end),
            Timeframe::Ongoing { .. } => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Month(m) => write!(f, "{m}"),
            Timeframe::Range { start, end } => write!(f, "{start} to {end}"),
            Timeframe::Ongoing { start } => write!(f, "{start} to Present"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(" to ") {
            None => Ok(Timeframe::Month(s.parse()?)),
            Some((start, "Present")) => Ok(Timeframe::Ongoing {
                start: start.parse()?,
            }),
            Some((start, end)) => {
                let start: YearMonth = start.parse()?;
                let end: YearMonth = end.parse()?;
                if end < start {
                    return Err(format!("timeframe end {end} precedes start {start}"));
                }
                Ok(Timeframe::Range { start, end })
            }
        }
    }
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Timeframe> for String {
    fn from(t: Timeframe) -> String {
        t.to_string()
    }
}

// --- Enumerated values ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalCategory {
    Values,
    PersonalStory,
    Motivation,
}

// --- Shared field rules ---

fn check_month(field: &str, ym: YearMonth, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
    if ym.year() < policy.min_year {
        return Err(SchemaViolation::new(
            field,
            format!(
                "year {} precedes the minimum plausible year {}",
                ym.year(),
                policy.min_year
            ),
        ));
    }
    if ym > policy.now {
        return Err(SchemaViolation::new(
            field,
            format!("date {ym} is in the future (now: {})", policy.now),
        ));
    }
    Ok(())
}

fn check_timeframe(
    field: &str,
    tf: Timeframe,
    policy: &SchemaPolicy,
) -> Result<(), SchemaViolation> {
    check_month(field, tf.start(), policy)?;
    if let Some(end) = tf.end() {
        check_month(field, end, policy)?;
    }
    Ok(())
}

fn check_non_empty(field: &str, value: &str) -> Result<(), SchemaViolation> {
    if value.trim().is_empty() {
        return Err(SchemaViolation::new(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn check_skill_name(
    field: &str,
    name: &str,
    policy: &SchemaPolicy,
) -> Result<(), SchemaViolation> {
    let len = name.trim().chars().count();
    if !(2..=100).contains(&len) {
        return Err(SchemaViolation::new(
            field,
            format!("length {len} is outside 2-100 characters"),
        ));
    }
    if policy.denies(name) {
        return Err(SchemaViolation::new(
            field,
            format!("`{name}` is too generic; name a concrete technical or domain skill"),
        ));
    }
    let charset = Regex::new(r"^[A-Za-z0-9\s\.\-\+#&/]+$").unwrap();
    if !charset.is_match(name.trim()) {
        return Err(SchemaViolation::new(
            field,
            format!("`{name}` contains invalid characters"),
        ));
    }
    Ok(())
}

// --- Entities ---

/// A quantifiable achievement with context. Value object: copied into
/// whichever parent holds it, never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub description: String,
    pub company: String,
    pub timeframe: Timeframe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
}

impl Achievement {
    pub fn new(
        description: impl Into<String>,
        company: impl Into<String>,
        timeframe: &str,
        result: Option<String>,
        metrics: Vec<String>,
        policy: &SchemaPolicy,
    ) -> Result<Self, SchemaViolation> {
        let timeframe = Timeframe::from_str(timeframe)
            .map_err(|e| SchemaViolation::new("achievement.timeframe", e))?;
        let achievement = Achievement {
            description: description.into(),
            company: company.into(),
            timeframe,
            result,
            metrics,
        };
        achievement.validate("achievement", policy)?;
        Ok(achievement)
    }

    pub(crate) fn validate(&self, field: &str, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
        let len = self.description.chars().count();
        if !(20..=500).contains(&len) {
            return Err(SchemaViolation::new(
                format!("{field}.description"),
                format!("length {len} is outside 20-500 characters"),
            ));
        }
        if self.description.split_whitespace().count() < 5 {
            return Err(SchemaViolation::new(
                format!("{field}.description"),
                "too short; provide specific context (minimum 5 words)",
            ));
        }
        check_non_empty(&format!("{field}.company"), &self.company)?;
        check_timeframe(&format!("{field}.timeframe"), self.timeframe, policy)?;
        if let Some(result) = &self.result {
            let len = result.chars().count();
            if len > 200 {
                return Err(SchemaViolation::new(
                    format!("{field}.result"),
                    format!("length {len} exceeds 200 characters"),
                ));
            }
        }
        Ok(())
    }
}

/// A skill with evidence. A skill is only "evidenced" when it carries at
/// least one achievement example, which it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub proficiency: Proficiency,
    pub examples: Vec<Achievement>,
    pub last_used: YearMonth,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        category: SkillCategory,
        proficiency: Proficiency,
        examples: Vec<Achievement>,
        last_used: &str,
        policy: &SchemaPolicy,
    ) -> Result<Self, SchemaViolation> {
        let last_used = YearMonth::from_str(last_used)
            .map_err(|e| SchemaViolation::new("skill.last_used", e))?;
        let skill = Skill {
            name: name.into(),
            category,
            proficiency,
            examples,
            last_used,
        };
        skill.validate("skill", policy)?;
        Ok(skill)
    }

    pub(crate) fn validate(&self, field: &str, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
        check_skill_name(&format!("{field}.name"), &self.name, policy)?;
        if self.examples.is_empty() {
            return Err(SchemaViolation::new(
                format!("{field}.examples"),
                "a skill needs at least one achievement example to be evidenced",
            ));
        }
        for (i, example) in self.examples.iter().enumerate() {
            example.validate(&format!("{field}.examples[{i}]"), policy)?;
        }
        check_month(&format!("{field}.last_used"), self.last_used, policy)?;
        Ok(())
    }
}

/// A position in work history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub company: String,
    pub title: String,
    pub start_date: YearMonth,
    pub end_date: EndDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<Achievement>,
    /// Weak references; each must resolve to a `Skill.name` at whole-store
    /// validation time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills_used: Vec<String>,
}

impl Job {
    pub fn new(
        company: impl Into<String>,
        title: impl Into<String>,
        start_date: &str,
        end_date: &str,
        policy: &SchemaPolicy,
    ) -> Result<Self, SchemaViolation> {
        let start_date = YearMonth::from_str(start_date)
            .map_err(|e| SchemaViolation::new("job.start_date", e))?;
        let end_date =
            EndDate::from_str(end_date).map_err(|e| SchemaViolation::new("job.end_date", e))?;
        let job = Job {
            company: company.into(),
            title: title.into(),
            start_date,
            end_date,
            location: None,
            description: None,
            achievements: Vec::new(),
            skills_used: Vec::new(),
        };
        job.validate("job", policy)?;
        Ok(job)
    }

    pub(crate) fn validate(&self, field: &str, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
        check_non_empty(&format!("{field}.company"), &self.company)?;
        check_non_empty(&format!("{field}.title"), &self.title)?;
        check_month(&format!("{field}.start_date"), self.start_date, policy)?;
        if let EndDate::On(end) = self.end_date {
            check_month(&format!("{field}.end_date"), end, policy)?;
            if end < self.start_date {
                return Err(SchemaViolation::new(
                    format!("{field}.end_date"),
                    format!(
                        "end date {end} precedes start date {}",
                        self.start_date
                    ),
                ));
            }
        }
        for (i, achievement) in self.achievements.iter().enumerate() {
            achievement.validate(&format!("{field}.achievements[{i}]"), policy)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub timeframe: Timeframe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl Education {
    pub(crate) fn validate(&self, field: &str, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
        check_non_empty(&format!("{field}.degree"), &self.degree)?;
        check_non_empty(&format!("{field}.school"), &self.school)?;
        check_timeframe(&format!("{field}.timeframe"), self.timeframe, policy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_obtained: Option<YearMonth>,
    /// May legitimately be in the future; only ordering against
    /// `date_obtained` is checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<YearMonth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Certification {
    pub(crate) fn validate(&self, field: &str, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
        check_non_empty(&format!("{field}.title"), &self.title)?;
        check_non_empty(&format!("{field}.organization"), &self.organization)?;
        if let Some(obtained) = self.date_obtained {
            check_month(&format!("{field}.date_obtained"), obtained, policy)?;
            if let Some(expiration) = self.expiration
                && expiration < obtained
            {
                return Err(SchemaViolation::new(
                    format!("{field}.expiration"),
                    format!("expiration {expiration} precedes date obtained {obtained}"),
                ));
            }
        }
        Ok(())
    }
}

/// A side project or volunteer effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub timeframe: Timeframe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
}

impl Project {
    pub(crate) fn validate(&self, field: &str, policy: &SchemaPolicy) -> Result<(), SchemaViolation> {
        check_non_empty(&format!("{field}.title"), &self.title)?;
        check_non_empty(&format!("{field}.description"), &self.description)?;
        check_timeframe(&format!("{field}.timeframe"), self.timeframe, policy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalValue {
    pub content: String,
    pub category: PersonalCategory,
}

impl PersonalValue {
    pub(crate) fn validate(&self, field: &str) -> Result<(), SchemaViolation> {
        let len = self.content.chars().count();
        if len < 10 {
            return Err(SchemaViolation::new(
                format!("{field}.content"),
                format!("length {len} is below the 10 character minimum"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ContactInfo {
    pub(crate) fn validate(&self, field: &str) -> Result<(), SchemaViolation> {
        check_non_empty(&format!("{field}.name"), &self.name)?;
        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(SchemaViolation::new(
                format!("{field}.email"),
                format!("`{}` is not a valid email address", self.email),
            ));
        }
        check_non_empty(&format!("{field}.phone"), &self.phone)?;
        if self.phone.contains("555-555") || self.phone.contains("XXX") {
            return Err(SchemaViolation::new(
                format!("{field}.phone"),
                "placeholder phone number detected",
            ));
        }
        Ok(())
    }
}

// --- Root aggregate ---

/// The root persisted aggregate of all career data. Owns every child entity
/// and is persisted as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStore {
    pub version: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Achievements not scoped to any one job or skill.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<Achievement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<Education>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personal_values: Vec<PersonalValue>,
    /// Skill names the user declined during discovery; consulted so
    /// detection stops re-proposing them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_skills: Vec<String>,
}

impl CareerStore {
    /// A valid store with no entries, as synthesized on first load.
    pub fn empty() -> Self {
        CareerStore {
            version: STORE_VERSION.to_string(),
            last_updated: Utc::now(),
            contact_info: None,
            jobs: Vec::new(),
            skills: Vec::new(),
            achievements: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
            projects: Vec::new(),
            personal_values: Vec::new(),
            skipped_skills: Vec::new(),
        }
    }

    /// Case-insensitive skill lookup by name.
    pub fn find_skill(&self, name: &str) -> Option<&Skill> {
        self.skills
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn find_skill_mut(&mut self, name: &str) -> Option<&mut Skill> {
        self.skills
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Case-insensitive job lookup by company.
    pub fn find_job(&self, company: &str) -> Option<&Job> {
        self.jobs
            .iter()
            .find(|j| j.company.eq_ignore_ascii_case(company.trim()))
    }
}

// --- Transient candidate ---

/// A skill/achievement pair discovered but not yet admitted. Raw text
/// fields; validation happens when the admission pipeline submits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredEntry {
    pub name: String,
    #[serde(default = "DiscoveredEntry::default_category")]
    pub category: SkillCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<Proficiency>,
    pub company: String,
    pub timeframe: String,
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
    /// Job title the user was applying for when this was discovered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovered_during: Option<String>,
}

impl DiscoveredEntry {
    fn default_category() -> SkillCategory {
        SkillCategory::Technical
    }

    /// Run the schema layer over the raw fields, producing a typed candidate.
    pub fn validated(&self, policy: &SchemaPolicy) -> Result<Candidate, SchemaViolation> {
        check_skill_name("candidate.name", &self.name, policy)?;
        let timeframe = Timeframe::from_str(&self.timeframe)
            .map_err(|e| SchemaViolation::new("candidate.timeframe", e))?;
        let achievement = Achievement {
            description: self.example.clone(),
            company: self.company.clone(),
            timeframe,
            result: self.result.clone(),
            metrics: self.metrics.clone(),
        };
        achievement.validate("candidate", policy)?;
        Ok(Candidate {
            skill_name: self.name.trim().to_string(),
            category: self.category,
            proficiency: self.proficiency.unwrap_or_default(),
            achievement,
        })
    }
}

/// A schema-valid candidate, as handed to the checkers and the enrichment
/// write.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub skill_name: String,
    pub category: SkillCategory,
    pub proficiency: Proficiency,
    pub achievement: Achievement,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SchemaPolicy {
        SchemaPolicy {
            min_year: 1950,
            now: YearMonth::new(2026, 8).unwrap(),
            skill_denylist: vec!["team player".to_string(), "go-getter".to_string()],
        }
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2021-05".parse().unwrap();
        assert_eq!(ym.year(), 2021);
        assert_eq!(ym.month(), 5);
        assert_eq!(ym.to_string(), "2021-05");
    }

    #[test]
    fn test_year_month_rejects_malformed_tokens() {
        assert!("2021-13".parse::<YearMonth>().is_err());
        assert!("2021-00".parse::<YearMonth>().is_err());
        assert!("21-05".parse::<YearMonth>().is_err());
        assert!("2021-5".parse::<YearMonth>().is_err());
        assert!("2021/05".parse::<YearMonth>().is_err());
        assert!("May 2021".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_ordering() {
        let a: YearMonth = "2020-12".parse().unwrap();
        let b: YearMonth = "2021-01".parse().unwrap();
        assert!(a < b);
        assert_eq!(b.months_since(a), 1);
        assert_eq!(a.months_since(b), -1);
    }

    #[test]
    fn test_timeframe_forms() {
        assert_eq!(
            "2021-05".parse::<Timeframe>().unwrap(),
            Timeframe::Month("2021-05".parse().unwrap())
        );
        let range: Timeframe = "2020-01 to 2020-06".parse().unwrap();
        assert_eq!(range.start().to_string(), "2020-01");
        assert_eq!(range.end().unwrap().to_string(), "2020-06");
        let open: Timeframe = "2024-02 to Present".parse().unwrap();
        assert_eq!(open.end(), None);
        assert!("2021-06 to 2021-01".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_achievement_length_bounds() {
        let err = Achievement::new(
            "too short",
            "Acme",
            "2021-05",
            None,
            vec![],
            &policy(),
        )
        .unwrap_err();
        assert_eq!(err.field, "achievement.description");

        let ok = Achievement::new(
            "Migrated the billing pipeline to event-driven ingestion across four services",
            "Acme",
            "2021-05",
            Some("cut processing latency by 40%".to_string()),
            vec!["40% latency reduction".to_string()],
            &policy(),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_achievement_rejects_future_timeframe() {
        let err = Achievement::new(
            "Migrated the billing pipeline to event-driven ingestion",
            "Acme",
            "2030-01",
            None,
            vec![],
            &policy(),
        )
        .unwrap_err();
        assert!(err.rule.contains("future"));
    }

    #[test]
    fn test_skill_denylist_and_length() {
        let example = Achievement::new(
            "Coordinated a cross-team incident response rotation for two years",
            "Acme",
            "2022-01",
            None,
            vec![],
            &policy(),
        )
        .unwrap();

        let err = Skill::new(
            "Team Player",
            SkillCategory::Soft,
            Proficiency::Expert,
            vec![example.clone()],
            "2022-01",
            &policy(),
        )
        .unwrap_err();
        assert!(err.rule.contains("too generic"));

        let err = Skill::new(
            "x",
            SkillCategory::Technical,
            Proficiency::Intermediate,
            vec![example.clone()],
            "2022-01",
            &policy(),
        )
        .unwrap_err();
        assert!(err.rule.contains("2-100"));

        let err = Skill::new(
            "Rust",
            SkillCategory::Technical,
            Proficiency::Advanced,
            vec![],
            "2022-01",
            &policy(),
        )
        .unwrap_err();
        assert_eq!(err.field, "skill.examples");
    }

    #[test]
    fn test_job_date_order() {
        let err = Job::new("Acme", "Engineer", "2022-06", "2020-01", &policy()).unwrap_err();
        assert!(err.rule.contains("precedes start date"));

        let ok = Job::new("Acme", "Engineer", "2020-01", "Present", &policy());
        assert!(ok.is_ok());
    }

    #[test]
    fn test_job_rejects_implausible_years() {
        let err = Job::new("Acme", "Engineer", "1893-01", "1895-01", &policy()).unwrap_err();
        assert!(err.rule.contains("minimum plausible year"));
    }

    #[test]
    fn test_contact_info_rules() {
        let contact = ContactInfo {
            name: "A. Person".to_string(),
            email: "no-at-sign".to_string(),
            phone: "123-456-7890".to_string(),
            linkedin: None,
            location: None,
        };
        assert!(contact.validate("contact_info").is_err());

        let placeholder = ContactInfo {
            email: "a@b.example".to_string(),
            phone: "555-555-0100".to_string(),
            ..contact
        };
        let err = placeholder.validate("contact_info").unwrap_err();
        assert_eq!(err.field, "contact_info.phone");
    }

    #[test]
    fn test_discovered_entry_validates_into_candidate() {
        let entry = DiscoveredEntry {
            name: "Kubernetes".to_string(),
            category: SkillCategory::Technical,
            proficiency: None,
            company: "Acme".to_string(),
            timeframe: "2021-03 to 2021-09".to_string(),
            example: "Deployed a three-node cluster serving twelve internal services".to_string(),
            result: None,
            metrics: vec![],
            discovered_during: None,
        };
        let candidate = entry.validated(&policy()).unwrap();
        assert_eq!(candidate.skill_name, "Kubernetes");
        assert_eq!(candidate.proficiency, Proficiency::Intermediate);
        assert_eq!(candidate.achievement.company, "Acme");
    }

    #[test]
    fn test_serde_round_trip_preserves_date_forms() {
        let p = policy();
        let job = Job::new("Acme", "Engineer", "2020-01", "Present", &p).unwrap();
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains("\"2020-01\""));
        assert!(json.contains("\"Present\""));
        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }

    #[test]
    fn test_serde_rejects_malformed_dates() {
        let bad = r#"{"company":"Acme","title":"Engineer","start_date":"01/2020","end_date":"Present"}"#;
        assert!(serde_json::from_str::<Job>(bad).is_err());
    }
}
