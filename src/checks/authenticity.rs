//! Pattern scan for fabricated or low-value content.
//!
//! Five independently evaluated pattern classes, each producing advisory
//! findings; none are hard errors. The final gate is human review. Terms are
//! matched as whole words, case-insensitively, so `awesome` never trips the
//! `some` quantifier.

use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checks::{CandidateCheck, CheckContext, CheckOutcome};
use crate::core::config::CoreConfig;
use crate::core::model::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternClass {
    VagueQuantifier,
    UnverifiableSuperlative,
    Placeholder,
    CopyPaste,
    FutureTense,
}

impl fmt::Display for PatternClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatternClass::VagueQuantifier => "vague quantifier",
            PatternClass::UnverifiableSuperlative => "unverifiable superlative",
            PatternClass::Placeholder => "placeholder",
            PatternClass::CopyPaste => "likely copy-paste",
            PatternClass::FutureTense => "future tense",
        };
        f.write_str(label)
    }
}

/// One flagged span: which class, what matched, and what to do about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticityFinding {
    pub class: PatternClass,
    pub matched: String,
    pub suggestion: String,
}

pub struct AuthenticityCheck;

impl CandidateCheck for AuthenticityCheck {
    fn name(&self) -> &'static str {
        "authenticity"
    }

    fn run(&self, candidate: &Candidate, ctx: &CheckContext<'_>) -> CheckOutcome {
        let mut out = CheckOutcome::default();
        let findings = scan(&candidate.achievement.description, ctx.source_text, ctx.config);
        for finding in &findings {
            out.warnings.push(format!(
                "{}: `{}` — {}",
                finding.class, finding.matched, finding.suggestion
            ));
        }
        out.authenticity = findings;
        out
    }
}

/// Scan one free-text field. An empty result means no authenticity concerns.
pub fn scan(
    text: &str,
    source_text: Option<&str>,
    config: &CoreConfig,
) -> Vec<AuthenticityFinding> {
    let mut findings = Vec::new();

    scan_terms(
        text,
        &config.vague_quantifiers,
        PatternClass::VagueQuantifier,
        "replace with a concrete count or scope",
        &mut findings,
    );
    scan_terms(
        text,
        &config.unverifiable_superlatives,
        PatternClass::UnverifiableSuperlative,
        "provide a measurable detail instead",
        &mut findings,
    );
    scan_placeholders(text, &config.placeholder_tokens, &mut findings);
    scan_terms(
        text,
        &config.future_tense_markers,
        PatternClass::FutureTense,
        "describe completed work, not intent",
        &mut findings,
    );

    if let Some(source) = source_text {
        let score = similarity(text, source);
        if score >= config.similarity_threshold {
            findings.push(AuthenticityFinding {
                class: PatternClass::CopyPaste,
                matched: format!("{:.0}% token overlap with the source text", score * 100.0),
                suggestion: "rephrase in your own words with specific examples".to_string(),
            });
        }
    }

    findings
}

fn scan_terms(
    text: &str,
    terms: &[String],
    class: PatternClass,
    suggestion: &str,
    findings: &mut Vec<AuthenticityFinding>,
) {
    for term in terms {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
        let re = Regex::new(&pattern).unwrap();
        if let Some(m) = re.find(text) {
            findings.push(AuthenticityFinding {
                class,
                matched: m.as_str().to_string(),
                suggestion: suggestion.to_string(),
            });
        }
    }
}

fn scan_placeholders(text: &str, tokens: &[String], findings: &mut Vec<AuthenticityFinding>) {
    let suggestion = "complete the text with specific details";
    let brackets = Regex::new(r"\[[^\]]*\]|\{[^}]*\}").unwrap();
    if let Some(m) = brackets.find(text) {
        findings.push(AuthenticityFinding {
            class: PatternClass::Placeholder,
            matched: m.as_str().to_string(),
            suggestion: suggestion.to_string(),
        });
    }
    for token in tokens {
        let pattern = format!(r"\b{}\b", regex::escape(token));
        let re = Regex::new(&pattern).unwrap();
        if let Some(m) = re.find(text) {
            findings.push(AuthenticityFinding {
                class: PatternClass::Placeholder,
                matched: m.as_str().to_string(),
                suggestion: suggestion.to_string(),
            });
        }
    }
}

/// Token-set overlap between two texts: 1.0 for identical vocabulary, 0.0
/// for disjoint. Monotonic in overlap; robust to reordering and minor
/// rewording.
pub fn similarity(a: &str, b: &str) -> f64 {
    let ta = token_set(a);
    let tb = token_set(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let intersection = ta.intersection(&tb).count();
    let union = ta.union(&tb).count();
    intersection as f64 / union as f64
}

fn token_set(text: &str) -> FxHashSet<String> {
    let word = Regex::new(r"\w+").unwrap();
    word.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}
