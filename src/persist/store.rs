//! Directory-backed [`AnnotationStore`].
//!
//! Each save writes `<id>.json` (or `<id>.json.gz`) plus `<id>.png` under the
//! store directory. Writers take an exclusive advisory lock on a shared lock
//! file and write through a temporary file so readers never see a partial
//! payload.

use super::{AnnotationStore, LiveSessionRecord, Payload, StaticAnnotation};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CURRENT_VERSION: u32 = 1;
const LOCK_FILE: &str = ".vidscribe.lock";

/// Errors raised by annotation stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unsupported payload version {0}")]
    UnsupportedVersion(u32),

    #[error("store rejected payload: {0}")]
    Rejected(String),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// On-disk envelope around a [`Payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadFile {
    pub version: u32,
    /// RFC 3339 timestamp
    pub saved_at: String,
    /// Extracted text, for indexing
    #[serde(default)]
    pub text: String,
    pub payload: Payload,
}

/// Writes payloads as files under one directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    base_dir: PathBuf,
    compress: bool,
}

impl DirectoryStore {
    pub fn new(base_dir: impl Into<PathBuf>, compress: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            compress,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the payload file for `id`.
    pub fn payload_path(&self, id: &str) -> PathBuf {
        let ext = if self.compress { "json.gz" } else { "json" };
        self.base_dir.join(format!("{id}.{ext}"))
    }

    pub fn thumbnail_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.png"))
    }

    fn write(
        &self,
        id: &str,
        payload: Payload,
        text: &str,
        thumbnail_png: &[u8],
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir).map_err(|err| StoreError::io(&self.base_dir, err))?;

        let lock_path = self.base_dir.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|err| StoreError::io(&lock_path, err))?;
        lock_file
            .lock_exclusive()
            .map_err(|err| StoreError::io(&lock_path, err))?;

        let result = self.write_locked(id, payload, text, thumbnail_png);

        lock_file.unlock().unwrap_or_else(|err| {
            warn!("failed to unlock store file {}: {}", lock_path.display(), err)
        });

        result
    }

    fn write_locked(
        &self,
        id: &str,
        payload: Payload,
        text: &str,
        thumbnail_png: &[u8],
    ) -> Result<(), StoreError> {
        let file = PayloadFile {
            version: CURRENT_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            text: text.to_string(),
            payload,
        };
        let mut bytes = serde_json::to_vec_pretty(&file)?;
        if self.compress {
            bytes = compress_bytes(&bytes).map_err(|err| StoreError::io(&self.base_dir, err))?;
        }

        let payload_path = self.payload_path(id);
        write_atomically(&payload_path, &bytes)?;
        let thumb_path = self.thumbnail_path(id);
        write_atomically(&thumb_path, thumbnail_png)?;

        info!(
            "Stored {} ({} bytes, compression={})",
            payload_path.display(),
            bytes.len(),
            self.compress
        );
        Ok(())
    }
}

impl AnnotationStore for DirectoryStore {
    fn save_static(
        &mut self,
        annotation: &StaticAnnotation,
        text: &str,
        thumbnail_png: &[u8],
    ) -> Result<String, StoreError> {
        let id = format!("static-{}", timestamp_id());
        self.write(&id, Payload::Static(annotation.clone()), text, thumbnail_png)?;
        Ok(id)
    }

    fn save_live(
        &mut self,
        record: &LiveSessionRecord,
        text: &str,
        thumbnail_png: &[u8],
    ) -> Result<String, StoreError> {
        let slug = slugify(&record.name);
        if slug.is_empty() {
            return Err(StoreError::Rejected(format!(
                "session name '{}' has no usable characters",
                record.name
            )));
        }
        let id = format!("live-{slug}-{}", timestamp_id());
        self.write(&id, Payload::Live(record.clone()), text, thumbnail_png)?;
        Ok(id)
    }
}

/// Reads a payload file written by [`DirectoryStore`], gzipped or not.
pub fn read_payload_file(path: &Path) -> Result<PayloadFile, StoreError> {
    let mut file_bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut file_bytes))
        .map_err(|err| StoreError::io(path, err))?;

    let decompressed = if is_gzip(&file_bytes) {
        debug!("Payload {} is gzip-compressed", path.display());
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|err| StoreError::io(path, err))?;
        out
    } else {
        file_bytes
    };

    let file: PayloadFile = serde_json::from_slice(&decompressed)?;
    if file.version > CURRENT_VERSION {
        return Err(StoreError::UnsupportedVersion(file.version));
    }
    Ok(file)
}

fn write_atomically(target: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp_path = temp_path(target);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|err| StoreError::io(&tmp_path, err))?;
        tmp_file
            .write_all(bytes)
            .and_then(|_| tmp_file.sync_all())
            .map_err(|err| StoreError::io(&tmp_path, err))?;
    }
    fs::rename(&tmp_path, target).map_err(|err| StoreError::io(target, err))
}

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut candidate = target.with_file_name(format!("{name}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!("{name}.tmp{counter}"));
    }
    candidate
}

fn compress_bytes(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn timestamp_id() -> String {
    Utc::now().format("%Y%m%dT%H%M%S%.6fZ").to_string()
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
