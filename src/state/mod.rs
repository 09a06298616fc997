//! Persisted map-state blobs.
//!
//! A saved state is an opaque JSON document with three required top-level
//! keys. Blobs are stored verbatim in flat files under a generated short
//! identifier; there is no schema versioning.

use std::fs;
use std::path::PathBuf;

use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::Value;
use tracing::debug;

use crate::error::{GeonaError, GeonaResult};

/// Top-level keys every saved state must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["map", "controls", "intro"];

const ID_LENGTH: usize = 8;
const MAX_ID_ATTEMPTS: usize = 16;

/// Rejects payloads missing any required top-level key.
///
/// The error echoes the payload so the caller can hand it back for
/// diagnostics; no partial save is attempted.
pub fn validate_state(payload: &Value) -> GeonaResult<()> {
    let Some(object) = payload.as_object() else {
        return Err(GeonaError::InvalidState {
            missing: REQUIRED_KEYS.iter().map(|key| (*key).to_owned()).collect(),
            payload: payload.clone(),
        });
    };

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| (*key).to_owned())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GeonaError::InvalidState {
            missing,
            payload: payload.clone(),
        })
    }
}

/// Flat-file JSON blob store keyed by generated identifier.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> GeonaResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Validates and saves a state blob, returning its new identifier.
    ///
    /// Identifier generation retries on collision with an existing file; the
    /// write itself goes through a temp file and rename so a crash never
    /// leaves a half-written blob behind.
    pub fn save(&self, payload: &Value) -> GeonaResult<String> {
        validate_state(payload)?;

        let mut attempts = 0;
        let id = loop {
            if attempts >= MAX_ID_ATTEMPTS {
                return Err(GeonaError::StateIdCollision(attempts));
            }
            attempts += 1;
            let candidate = generate_id();
            if !self.blob_path(&candidate).exists() {
                break candidate;
            }
        };

        let path = self.blob_path(&id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(payload)?)?;
        fs::rename(&tmp, &path)?;
        debug!(%id, "saved state blob");
        Ok(id)
    }

    /// Returns the blob verbatim by identifier.
    pub fn load(&self, id: &str) -> GeonaResult<Value> {
        let path = self.blob_path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(GeonaError::UnknownState(id.to_owned()));
            }
            Err(error) => return Err(error.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn blob_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}
