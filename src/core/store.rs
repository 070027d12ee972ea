//! The record store: sole owner of on-disk state.
//!
//! `load()` serves from an in-memory snapshot keyed on the file's
//! modification timestamp (plus an optional TTL); `save()` runs the
//! validate → backup → temp-write → round-trip-verify → atomic-rename
//! sequence so a reader never observes a half-written document. A single
//! in-process mutex serializes the critical sections; callers hold no lock
//! while a human reviews a candidate.
//!
//! The cache is a last-known-good snapshot, not a required fast path: any
//! external modification to the file is detected lazily by timestamp
//! mismatch on the next `load()`.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Instant, SystemTime};

use crate::core::config::CoreConfig;
use crate::core::error::{CorruptReason, DossierError};
use crate::core::model::CareerStore;
use crate::core::time;
use crate::core::validate::validate_store;

/// Outcome of a committed `save()`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveReceipt {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// SHA-256 of the committed document bytes.
    pub content_hash: String,
    pub backed_up: bool,
    pub saved_at: String,
}

/// Internal staleness signal; never surfaced to callers.
#[derive(Debug, PartialEq, Eq)]
enum CacheStatus {
    Fresh,
    Stale,
}

struct CacheEntry {
    snapshot: CareerStore,
    disk_mtime: SystemTime,
    refreshed: Instant,
}

pub struct RecordStore {
    config: CoreConfig,
    state: Mutex<Option<CacheEntry>>,
}

impl RecordStore {
    pub fn new(config: CoreConfig) -> Result<Self, DossierError> {
        if let Some(parent) = config.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| DossierError::io(format!("creating {}", parent.display()), e))?;
        }
        Ok(RecordStore {
            config,
            state: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.file_path
    }

    /// Sibling holding the single prior generation.
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.config.file_path, ".bak")
    }

    fn temp_path(&self) -> PathBuf {
        sibling(&self.config.file_path, ".tmp")
    }

    pub fn has_backup(&self) -> bool {
        self.backup_path().exists()
    }

    pub fn invalidate_cache(&self) {
        *self.lock_state() = None;
    }

    /// Load the store, serving the cached snapshot when the on-disk
    /// timestamp still matches. A missing file synthesizes an empty store.
    pub fn load(&self) -> Result<CareerStore, DossierError> {
        let mut state = self.lock_state();

        if self.config.cache_enabled
            && let Some(entry) = state.as_ref()
            && self.cache_status(entry) == CacheStatus::Fresh
        {
            return Ok(entry.snapshot.clone());
        }

        let path = &self.config.file_path;
        if !path.exists() {
            return Ok(CareerStore::empty());
        }

        let raw = fs::read_to_string(path)
            .map_err(|e| DossierError::io(format!("reading {}", path.display()), e))?;
        let parsed: CareerStore =
            serde_json::from_str(&raw).map_err(|e| DossierError::CorruptStore {
                path: path.clone(),
                reason: CorruptReason::Parse(e.to_string()),
            })?;
        validate_store(&parsed, &self.config.schema_policy()).map_err(|violation| {
            DossierError::CorruptStore {
                path: path.clone(),
                reason: CorruptReason::Schema(violation),
            }
        })?;

        if self.config.cache_enabled {
            *state = self.cache_entry(parsed.clone());
        }
        Ok(parsed)
    }

    /// Validate and atomically persist the store.
    ///
    /// Validation runs before anything touches disk; an invalid store is the
    /// caller's bug, not a half-written file. On success the committed
    /// document carries a refreshed `last_updated`.
    pub fn save(&self, store: &CareerStore) -> Result<SaveReceipt, DossierError> {
        let mut state = self.lock_state();

        let mut doc = store.clone();
        doc.last_updated = time::now_utc();
        validate_store(&doc, &self.config.schema_policy())?;

        let path = &self.config.file_path;
        let backed_up = if self.config.backup_enabled && path.exists() {
            let backup = self.backup_path();
            fs::copy(path, &backup)
                .map_err(|e| DossierError::io(format!("backing up to {}", backup.display()), e))?;
            true
        } else {
            false
        };

        let bytes = serde_json::to_vec_pretty(&doc).map_err(|e| {
            DossierError::WriteVerificationFailed(format!("store does not serialize: {e}"))
        })?;

        let tmp = self.temp_path();
        fs::write(&tmp, &bytes)
            .map_err(|e| DossierError::io(format!("writing {}", tmp.display()), e))?;

        if let Err(reason) = self.verify_round_trip(&tmp, &doc) {
            let _ = fs::remove_file(&tmp);
            return Err(DossierError::WriteVerificationFailed(reason));
        }

        // Commit point. Rename is atomic within a directory, so a failure
        // here leaves the canonical file untouched.
        fs::rename(&tmp, path).map_err(|e| {
            DossierError::io(
                format!("renaming {} over {}", tmp.display(), path.display()),
                e,
            )
        })?;

        let receipt = SaveReceipt {
            path: path.clone(),
            bytes_written: bytes.len() as u64,
            content_hash: hash_hex(&bytes),
            backed_up,
            saved_at: doc.last_updated.to_rfc3339(),
        };
        *state = self.cache_entry(doc);
        Ok(receipt)
    }

    /// Copy the backup over the canonical file, then run the normal
    /// load-and-validate path. The only recovery from a corrupt canonical
    /// file; no field-level repair is attempted.
    pub fn restore_from_backup(&self) -> Result<CareerStore, DossierError> {
        let backup = self.backup_path();
        if !backup.exists() {
            return Err(DossierError::NoBackup(backup));
        }
        {
            let mut state = self.lock_state();
            fs::copy(&backup, &self.config.file_path).map_err(|e| {
                DossierError::io(format!("restoring from {}", backup.display()), e)
            })?;
            *state = None;
        }
        self.load()
    }

    fn verify_round_trip(&self, tmp: &Path, expected: &CareerStore) -> Result<(), String> {
        let raw = fs::read_to_string(tmp).map_err(|e| format!("re-reading temp file: {e}"))?;
        let parsed: CareerStore =
            serde_json::from_str(&raw).map_err(|e| format!("temp file does not parse: {e}"))?;
        validate_store(&parsed, &self.config.schema_policy())
            .map_err(|v| format!("temp file fails validation: {v}"))?;
        if parsed != *expected {
            return Err("re-parsed document does not match the saved store".to_string());
        }
        Ok(())
    }

    fn cache_status(&self, entry: &CacheEntry) -> CacheStatus {
        let Ok(meta) = fs::metadata(&self.config.file_path) else {
            return CacheStatus::Stale;
        };
        let Ok(mtime) = meta.modified() else {
            return CacheStatus::Stale;
        };
        if mtime != entry.disk_mtime {
            return CacheStatus::Stale;
        }
        if let Some(ttl) = self.config.cache_ttl()
            && entry.refreshed.elapsed() > ttl
        {
            return CacheStatus::Stale;
        }
        CacheStatus::Fresh
    }

    fn cache_entry(&self, snapshot: CareerStore) -> Option<CacheEntry> {
        if !self.config.cache_enabled {
            return None;
        }
        let mtime = fs::metadata(&self.config.file_path)
            .and_then(|m| m.modified())
            .ok()?;
        Some(CacheEntry {
            snapshot,
            disk_mtime: mtime,
            refreshed: Instant::now(),
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the cache is advisory, so recover the guard.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

fn hash_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "record_store",
        "version": "1.0.0",
        "description": "Validated, atomically persisted career store with single-generation backup",
        "operations": ["load", "save", "restore_from_backup"],
        "storage": ["career_data.json", "career_data.json.bak", "career_data.json.tmp"]
    })
}
