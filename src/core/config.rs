//! Construction-time configuration surface.
//!
//! Everything tunable about the core is carried in [`CoreConfig`] and handed
//! in at construction; the core never reads environment variables. A TOML
//! loader is provided for shells that keep a config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::DossierError;
use crate::core::model::SchemaPolicy;
use crate::core::time;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Canonical store document. Backup and temp files are derived siblings
    /// (`<path>.bak`, `<path>.tmp`).
    pub file_path: PathBuf,
    pub backup_enabled: bool,
    pub cache_enabled: bool,
    /// Optional secondary staleness bound on top of mtime comparison.
    pub cache_ttl_secs: Option<u64>,
    /// Earliest plausible year for any historical date.
    pub min_year: i32,
    /// Generic skill names rejected by the schema layer, matched
    /// case-insensitively and exactly.
    pub skill_denylist: Vec<String>,
    pub vague_quantifiers: Vec<String>,
    pub unverifiable_superlatives: Vec<String>,
    pub placeholder_tokens: Vec<String>,
    pub future_tense_markers: Vec<String>,
    /// Token-overlap score above which a description counts as copy-pasted.
    pub similarity_threshold: f64,
    /// Warn when a newly introduced skill's evidence starts more than this
    /// many years ago.
    pub years_back_bound: u32,
    /// Cap on skills proposed per discovery pass.
    pub max_discovered_skills: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            file_path: PathBuf::new(),
            backup_enabled: true,
            cache_enabled: true,
            cache_ttl_secs: None,
            min_year: 1950,
            skill_denylist: strings(&[
                "team player",
                "hard worker",
                "quick learner",
                "detail oriented",
                "self motivated",
                "go-getter",
                "results driven",
                "passionate",
                "self-starter",
            ]),
            vague_quantifiers: strings(&[
                "many", "several", "various", "numerous", "multiple", "some", "a lot", "plenty",
                "countless",
            ]),
            unverifiable_superlatives: strings(&[
                "best",
                "world-class",
                "leading",
                "cutting-edge",
                "state-of-the-art",
                "revolutionary",
                "groundbreaking",
                "innovative",
                "next-generation",
            ]),
            placeholder_tokens: strings(&["TBD", "TODO", "FIXME"]),
            future_tense_markers: strings(&[
                "will",
                "going to",
                "planning to",
                "intending to",
                "expect to",
            ]),
            similarity_threshold: 0.70,
            years_back_bound: 10,
            max_discovered_skills: 5,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CoreConfig {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        CoreConfig {
            file_path: file_path.into(),
            ..CoreConfig::default()
        }
    }

    /// Default layout under the user's home directory, supplied by the
    /// caller (the core does not consult the environment).
    pub fn with_home(home: &Path) -> Self {
        CoreConfig::new(home.join(".dossier").join("career_data.json"))
    }

    /// Load overrides from a TOML document. Unknown keys are rejected so a
    /// typo'd setting fails loudly instead of silently using a default.
    pub fn from_toml_str(content: &str) -> Result<Self, DossierError> {
        let config: CoreConfig =
            toml::from_str(content).map_err(|e| DossierError::Config(e.to_string()))?;
        if config.file_path.as_os_str().is_empty() {
            return Err(DossierError::Config(
                "`file_path` must be set in the config document".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn from_toml_path(path: &Path) -> Result<Self, DossierError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DossierError::io(format!("reading config {}", path.display()), e))?;
        Self::from_toml_str(&content)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// Snapshot of the schema rules, with `now` pinned at this call.
    pub fn schema_policy(&self) -> SchemaPolicy {
        SchemaPolicy {
            min_year: self.min_year,
            now: time::current_month(),
            skill_denylist: self
                .skill_denylist
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        }
    }
}
