use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A field-level constraint failure, naming the field and the rule broken.
///
/// Raised by entity constructors and by whole-store validation; never
/// silently coerced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema violation at `{field}`: {rule}")]
pub struct SchemaViolation {
    pub field: String,
    pub rule: String,
}

impl SchemaViolation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        SchemaViolation {
            field: field.into(),
            rule: rule.into(),
        }
    }
}

/// Why a persisted document failed to load.
#[derive(Error, Debug)]
pub enum CorruptReason {
    #[error("document does not parse: {0}")]
    Parse(String),
    #[error(transparent)]
    Schema(SchemaViolation),
}

#[derive(Error, Debug)]
pub enum DossierError {
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),
    #[error("corrupt store at {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: CorruptReason },
    #[error("write verification failed: {0}")]
    WriteVerificationFailed(String),
    #[error("no backup file at {0}")]
    NoBackup(PathBuf),
    #[error("I/O failure while {op}: {source}")]
    Io {
        op: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid admission transition: {0}")]
    InvalidTransition(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl DossierError {
    pub(crate) fn io(op: impl Into<String>, source: io::Error) -> Self {
        DossierError::Io {
            op: op.into(),
            source,
        }
    }
}
