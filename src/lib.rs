//! Dossier: a local-first career record store.
//!
//! **Dossier keeps structured career history on disk, validates everything
//! that goes in, and gates new claims behind a human review.**
//!
//! All state is one JSON document under the user's control. Nothing reaches
//! it except through schema validation, and nothing new is admitted without
//! passing the consistency and authenticity checkers plus an explicit
//! approval.
//!
//! # Core Principles
//!
//! - **Local-first**: one file, one backup generation, no network
//! - **Validated writes**: the schema layer runs before disk is touched
//! - **Atomic persistence**: temp-write, round-trip verify, rename
//! - **Advisory signals**: checkers warn; the human decides
//!
//! # Architecture
//!
//! ## The write path
//!
//! All mutations route through [`core::store::RecordStore::save`]:
//! validate → backup → temp write → round-trip verify → atomic rename.
//! A reader never observes a half-written document.
//!
//! ## The admission pipeline
//!
//! [`admission::Admission`] walks a candidate through
//! `Drafting → Validating → AwaitingReview → {Accepted | Discarded}`,
//! running the pluggable checkers in [`checks`] and performing the
//! enrichment write on approval.
//!
//! # Example
//!
//! ```no_run
//! use dossier::admission::Admission;
//! use dossier::core::config::CoreConfig;
//! use dossier::core::model::DiscoveredEntry;
//! use dossier::core::store::RecordStore;
//!
//! # fn main() -> Result<(), dossier::core::error::DossierError> {
//! let config = CoreConfig::new("/home/me/.dossier/career_data.json");
//! let store = RecordStore::new(config.clone())?;
//!
//! let mut run = Admission::new(&store, &config);
//! let entry = DiscoveredEntry {
//!     name: "Kubernetes".into(),
//!     category: dossier::core::model::SkillCategory::Technical,
//!     proficiency: None,
//!     company: "Acme".into(),
//!     timeframe: "2021-03 to 2021-09".into(),
//!     example: "Deployed a three-node cluster serving twelve internal services".into(),
//!     result: None,
//!     metrics: vec![],
//!     discovered_during: None,
//! };
//! let report = run.submit(entry, None)?;
//! if report.is_clean() {
//!     run.approve()?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: entities, schema validation, configuration, the record store
//! - [`checks`]: pluggable pure checkers (consistency, authenticity)
//! - [`admission`]: the candidate admission state machine
//! - [`discovery`]: skill detection over job-description text

pub mod admission;
pub mod checks;
pub mod core;
pub mod discovery;
