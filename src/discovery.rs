//! Skill detection over job-description text.
//!
//! Finds technologies a posting mentions that the store does not yet
//! evidence, so the admission pipeline can ask the user about them. Keyword
//! matching is word-boundary only (`sql` never fires inside `mysql`), and
//! both existing skills and remembered rejections are filtered out.

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::core::model::CareerStore;

/// Technology vocabulary matched against postings, lowercased.
const TECH_KEYWORDS: &[&str] = &[
    // Languages
    "python",
    "javascript",
    "typescript",
    "java",
    "c++",
    "c#",
    "ruby",
    "rust",
    "kotlin",
    "swift",
    "scala",
    "php",
    // Frameworks
    "react",
    "vue",
    "angular",
    "django",
    "flask",
    "spring",
    "rails",
    "express",
    "fastapi",
    "svelte",
    // Data stores
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "dynamodb",
    "cassandra",
    "sqlite",
    "snowflake",
    // Cloud and delivery
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "jenkins",
    "gitlab",
    "github actions",
    "circleci",
    // Data and analytics
    "tableau",
    "looker",
    "power bi",
    "pandas",
    "spark",
    "airflow",
    "kafka",
    "hadoop",
    // Product tooling
    "jira",
    "confluence",
    "figma",
    "amplitude",
    "mixpanel",
    "google analytics",
    "a/b testing",
    // Methodologies
    "agile",
    "scrum",
    "kanban",
    "lean",
];

/// Skills the description mentions that the store neither evidences nor has
/// explicitly skipped, ranked by mention frequency and capped at
/// `max_skills`.
pub fn detect_missing_skills(
    job_description: &str,
    store: &CareerStore,
    max_skills: usize,
) -> Vec<String> {
    let existing: FxHashSet<String> = store
        .skills
        .iter()
        .map(|s| s.name.trim().to_lowercase())
        .collect();
    let skipped: FxHashSet<String> = store
        .skipped_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let known = |name: &str| existing.contains(name) || skipped.contains(name);

    let lower = job_description.to_lowercase();
    let mut detected: FxHashSet<String> = FxHashSet::default();

    for keyword in TECH_KEYWORDS {
        if known(keyword) {
            continue;
        }
        let pattern = format!(r"\b{}\b", regex::escape(keyword));
        if Regex::new(&pattern).unwrap().is_match(&lower) {
            detected.insert(canonical_case(keyword));
        }
    }

    // Dotted frameworks (React.js, Vue.js) and long all-caps acronyms
    // (REST, JSON, GRPC). Short acronyms are too noisy (PM, US, OR).
    let framework = Regex::new(r"\b([A-Z][A-Za-z]+\.(?:js|py))\b").unwrap();
    for captures in framework.captures_iter(job_description) {
        let name = captures[1].to_string();
        if !known(&name.to_lowercase()) {
            detected.insert(name);
        }
    }
    let acronym = Regex::new(r"\b([A-Z]{4,})\b").unwrap();
    for captures in acronym.captures_iter(job_description) {
        let name = captures[1].to_string();
        if !known(&name.to_lowercase()) {
            detected.insert(name);
        }
    }

    let mut ranked: Vec<String> = detected.into_iter().collect();
    ranked.sort_by(|a, b| {
        let fa = lower.matches(&a.to_lowercase()).count();
        let fb = lower.matches(&b.to_lowercase()).count();
        fb.cmp(&fa).then_with(|| a.cmp(b))
    });
    ranked.truncate(max_skills);
    ranked
}

/// Proper-case a detected keyword for display (`sql` → `SQL`,
/// `github actions` → `GitHub Actions`).
fn canonical_case(keyword: &str) -> String {
    let special = [
        ("sql", "SQL"),
        ("postgresql", "PostgreSQL"),
        ("mysql", "MySQL"),
        ("mongodb", "MongoDB"),
        ("dynamodb", "DynamoDB"),
        ("javascript", "JavaScript"),
        ("typescript", "TypeScript"),
        ("aws", "AWS"),
        ("gcp", "GCP"),
        ("php", "PHP"),
        ("c++", "C++"),
        ("c#", "C#"),
        ("fastapi", "FastAPI"),
        ("circleci", "CircleCI"),
        ("github actions", "GitHub Actions"),
        ("power bi", "Power BI"),
        ("a/b testing", "A/B testing"),
    ];
    if let Some((_, cased)) = special.iter().find(|(raw, _)| *raw == keyword) {
        return cased.to_string();
    }
    keyword
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "discovery",
        "version": "1.0.0",
        "description": "Word-boundary skill detection over job-description text",
        "operations": ["detect_missing_skills"],
        "filters": ["existing skills", "skipped skills"]
    })
}
