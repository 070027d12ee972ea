use dossier::core::config::CoreConfig;
use dossier::core::error::{CorruptReason, DossierError};
use dossier::core::model::{
    Achievement, CareerStore, Certification, ContactInfo, Education, Job, PersonalCategory,
    PersonalValue, Proficiency, Project, Skill, SkillCategory,
};
use dossier::core::store::RecordStore;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn config_at(dir: &Path) -> CoreConfig {
    CoreConfig::new(dir.join("career_data.json"))
}

fn sample_store(config: &CoreConfig) -> CareerStore {
    let policy = config.schema_policy();
    let mut store = CareerStore::empty();

    let mut job = Job::new("Acme", "Platform Engineer", "2020-01", "2022-06", &policy)
        .expect("valid job");
    job.achievements.push(
        Achievement::new(
            "Rebuilt the deployment pipeline around progressive delivery",
            "Acme",
            "2021-03",
            Some("releases went from weekly to daily".to_string()),
            vec![],
            &policy,
        )
        .expect("valid achievement"),
    );
    store.jobs.push(job);

    store.skills.push(
        Skill::new(
            "Python",
            SkillCategory::Technical,
            Proficiency::Advanced,
            vec![
                Achievement::new(
                    "Wrote the cost attribution reports that informed capacity planning",
                    "Acme",
                    "2021-07",
                    None,
                    vec![],
                    &policy,
                )
                .expect("valid achievement"),
            ],
            "2022-06",
            &policy,
        )
        .expect("valid skill"),
    );

    store.contact_info = Some(ContactInfo {
        name: "R. Example".to_string(),
        email: "r@example.net".to_string(),
        phone: "303-555-0142".to_string(),
        linkedin: None,
        location: Some("Denver, Colorado".to_string()),
    });
    store.education.push(Education {
        degree: "BSc Computer Science".to_string(),
        school: "State University".to_string(),
        timeframe: "2012-09 to 2016-05".parse().unwrap(),
        location: None,
        details: vec!["Graduated with honors".to_string()],
    });
    store.certifications.push(Certification {
        title: "Certified Kubernetes Administrator".to_string(),
        organization: "CNCF".to_string(),
        date_obtained: Some("2023-04".parse().unwrap()),
        expiration: Some("2026-04".parse().unwrap()),
        details: None,
    });
    store.projects.push(Project {
        title: "Homelab monitoring".to_string(),
        description: "Self-hosted metrics stack for a three-node cluster".to_string(),
        timeframe: "2024-02 to Present".parse().unwrap(),
        role: None,
        technologies: vec!["Prometheus".to_string()],
        achievements: vec![],
    });
    store.personal_values.push(PersonalValue {
        content: "Prefers boring technology that operators can reason about".to_string(),
        category: PersonalCategory::Values,
    });
    store
}

#[test]
fn missing_file_synthesizes_empty_store() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();

    let loaded = store.load().expect("missing file must not fail");
    assert!(loaded.jobs.is_empty());
    assert!(loaded.skills.is_empty());
    // Synthesis is in-memory only; the first save creates the file.
    assert!(!config.file_path.exists());
}

#[test]
fn save_then_load_round_trips() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();
    let original = sample_store(&config);

    let receipt = store.save(&original).expect("save");
    assert!(receipt.bytes_written > 0);
    assert_eq!(receipt.content_hash.len(), 64);
    assert!(!receipt.backed_up, "first save has nothing to back up");

    // Fresh handle so nothing is served from cache.
    let reread = RecordStore::new(config.clone()).unwrap();
    let mut loaded = reread.load().expect("load");

    // Equal except the field the store itself refreshes.
    loaded.last_updated = original.last_updated;
    assert_eq!(loaded, original);

    // The canonical file always parses; no temp residue survives a save.
    let raw = fs::read_to_string(&config.file_path).unwrap();
    assert!(serde_json::from_str::<CareerStore>(&raw).is_ok());
    assert!(!tmp.path().join("career_data.json.tmp").exists());
}

#[test]
fn second_save_backs_up_prior_generation() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();

    let first = sample_store(&config);
    store.save(&first).unwrap();

    let mut second = first.clone();
    second.skipped_skills.push("Figma".to_string());
    let receipt = store.save(&second).unwrap();
    assert!(receipt.backed_up);
    assert!(store.has_backup());

    // The backup holds the prior generation, not the new one.
    let backup: CareerStore =
        serde_json::from_str(&fs::read_to_string(store.backup_path()).unwrap()).unwrap();
    assert!(backup.skipped_skills.is_empty());
    assert_eq!(backup.jobs, first.jobs);
    assert_eq!(backup.skills, first.skills);
}

#[test]
fn backup_disabled_writes_no_sibling() {
    let tmp = tempdir().unwrap();
    let mut config = config_at(tmp.path());
    config.backup_enabled = false;
    let store = RecordStore::new(config.clone()).unwrap();

    store.save(&sample_store(&config)).unwrap();
    store.save(&sample_store(&config)).unwrap();
    assert!(!store.has_backup());
}

#[test]
fn external_modification_is_picked_up_on_next_load() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();

    store.save(&sample_store(&config)).unwrap();
    let before = store.load().unwrap();
    assert_eq!(before.skills.len(), 1);

    // Coarse-mtime filesystems need the timestamps to actually differ.
    thread::sleep(Duration::from_millis(1100));

    // A second writer (sync tool, manual edit) replaces the file behind the
    // first handle's cache.
    let other = RecordStore::new(config.clone()).unwrap();
    let mut updated = sample_store(&config);
    updated.skills[0].name = "Go".to_string();
    other.save(&updated).unwrap();

    let after = store.load().unwrap();
    assert_eq!(after.skills[0].name, "Go");
}

#[test]
fn unparseable_file_is_corrupt_store() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();
    store.save(&sample_store(&config)).unwrap();
    let good_bytes = fs::read(&config.file_path).unwrap();

    let fresh = RecordStore::new(config.clone()).unwrap();
    fs::write(&config.file_path, "{ not json").unwrap();
    match fresh.load() {
        Err(DossierError::CorruptStore {
            reason: CorruptReason::Parse(_),
            ..
        }) => {}
        other => panic!("expected parse corruption, got {other:?}"),
    }

    // Fixing the file on disk makes the next load succeed; the failed load
    // did not poison the cache.
    fs::write(&config.file_path, &good_bytes).unwrap();
    assert!(fresh.load().is_ok());
}

#[test]
fn out_of_range_field_is_schema_corruption() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();

    // Skill name below the 2 character minimum.
    let doc = r#"{
        "version": "1.0",
        "last_updated": "2026-01-05T10:00:00Z",
        "skills": [{
            "name": "x",
            "category": "technical",
            "examples": [{
                "description": "Automated the reporting pipeline for the finance team",
                "company": "Acme",
                "timeframe": "2024-01"
            }],
            "last_used": "2024-01"
        }]
    }"#;
    fs::write(&config.file_path, doc).unwrap();

    match store.load() {
        Err(DossierError::CorruptStore {
            reason: CorruptReason::Schema(violation),
            ..
        }) => {
            assert_eq!(violation.field, "skills[0].name");
        }
        other => panic!("expected schema corruption, got {other:?}"),
    }

    fs::write(&config.file_path, doc.replace("\"x\"", "\"Python\"")).unwrap();
    let loaded = store.load().expect("fixed file loads");
    assert_eq!(loaded.skills[0].name, "Python");
}

#[test]
fn restore_from_backup_recovers_last_saved_store() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();
    let saved = sample_store(&config);

    // Two saves so the backup generation equals the last saved content.
    store.save(&saved).unwrap();
    store.save(&saved).unwrap();

    fs::write(&config.file_path, "garbage, not a store").unwrap();
    store.invalidate_cache();
    assert!(store.load().is_err());

    let mut restored = store.restore_from_backup().expect("restore");
    restored.last_updated = saved.last_updated;
    assert_eq!(restored, saved);
    assert!(store.load().is_ok());
}

#[test]
fn restore_without_backup_is_typed_error() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(config_at(tmp.path())).unwrap();
    match store.restore_from_backup() {
        Err(DossierError::NoBackup(_)) => {}
        other => panic!("expected NoBackup, got {other:?}"),
    }
}

#[test]
fn invalid_store_is_rejected_before_touching_disk() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();

    let policy = config.schema_policy();
    let mut invalid = sample_store(&config);
    invalid.skills.push(Skill {
        name: "x".to_string(),
        category: SkillCategory::Technical,
        proficiency: Proficiency::Intermediate,
        examples: vec![
            Achievement::new(
                "Kept the fleet dashboards accurate through two migrations",
                "Acme",
                "2023-02",
                None,
                vec![],
                &policy,
            )
            .unwrap(),
        ],
        last_used: "2023-02".parse().unwrap(),
    });

    match store.save(&invalid) {
        Err(DossierError::SchemaViolation(violation)) => {
            assert!(violation.field.starts_with("skills["));
        }
        other => panic!("expected schema violation, got {other:?}"),
    }
    // The firewall fired before any file was created.
    assert!(!config.file_path.exists());
}

#[test]
fn stale_temp_residue_does_not_block_saving() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();

    // A crash between temp-write and rename from some earlier process.
    let tmp_path = tmp.path().join("career_data.json.tmp");
    fs::write(&tmp_path, "half-written garbage").unwrap();

    store.save(&sample_store(&config)).unwrap();
    assert!(!tmp_path.exists());
    let raw = fs::read_to_string(&config.file_path).unwrap();
    assert!(serde_json::from_str::<CareerStore>(&raw).is_ok());
}

#[test]
fn cache_serves_snapshot_until_file_changes() {
    let tmp = tempdir().unwrap();
    let config = config_at(tmp.path());
    let store = RecordStore::new(config.clone()).unwrap();
    store.save(&sample_store(&config)).unwrap();

    let first = store.load().unwrap();
    let second = store.load().unwrap();
    assert_eq!(first, second);

    // Deleting the file makes the cached snapshot stale, not authoritative.
    fs::remove_file(&config.file_path).unwrap();
    let after_delete = store.load().unwrap();
    assert!(after_delete.skills.is_empty());
}
