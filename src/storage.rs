//! JSON snapshot of the full dataset.
//!
//! Serialization of the model between sessions, not a persistence engine:
//! the stores themselves stay in memory and the engines never touch disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::store::{MemoryDirectory, MemoryLedgerStore, MemoryObligationStore};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

const TMP_SUFFIX: &str = "tmp";

/// Everything the tracker holds, in one serializable unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "Snapshot::schema_version_default")]
    pub schema_version: u8,
    pub obligations: MemoryObligationStore,
    pub ledger: MemoryLedgerStore,
    pub directory: MemoryDirectory,
}

impl Snapshot {
    pub fn new(
        obligations: MemoryObligationStore,
        ledger: MemoryLedgerStore,
        directory: MemoryDirectory,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            obligations,
            ledger,
            directory,
        }
    }

    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)
    }

    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let data = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(CoreError::Validation(format!(
                "snapshot schema v{} is newer than supported v{}",
                snapshot.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(snapshot)
    }

    fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(
            MemoryObligationStore::new(),
            MemoryLedgerStore::new(),
            MemoryDirectory::new(),
        )
    }
}

/// Writes through a sibling tmp file and renames over the target, so a crash
/// mid-write never leaves a half-written snapshot behind.
pub(crate) fn write_atomic(path: &Path, data: &str) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
