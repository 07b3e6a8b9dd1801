//! JSON persistence for planner state.
//!
//! The document holds a metadata block plus two ordered lists:
//!
//! ```json
//! {
//!   "metadata": { "version": "1.0", "application": "referee-scheduler", "generated_at": "..." },
//!   "resources": [ { "id": "...", "name": "...", "kind": "referee", "role": "line", ... } ],
//!   "events": [ { "type": "match", "id": "...", "start": "2031-12-25T15:00:00", ... } ]
//! }
//! ```
//!
//! Loading rejects a document whose top level is malformed. Individual
//! records that cannot be used are skipped, logged at `warn`, and listed
//! in the [`LoadReport`]; they never fail the whole load.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, PlannerConfig};
use crate::models::{Match, Registry, Resource};
use crate::scheduler::Planner;

/// Current document format version.
pub const FORMAT_VERSION: &str = "1.0";
/// Application name written to the metadata block.
pub const APPLICATION: &str = "referee-scheduler";

/// Persistence errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed document: {0}")]
    Structure(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub application: String,
    pub generated_at: NaiveDateTime,
}

/// A persisted event, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    Match(Match),
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    metadata: Metadata,
    resources: Vec<&'a Resource>,
    events: Vec<EventRecord>,
}

/// A record the loader could not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// `"resources"` or `"events"`.
    pub section: &'static str,
    /// Position in the section.
    pub index: usize,
    pub reason: String,
}

/// What a load kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub resources_loaded: usize,
    pub events_loaded: usize,
    /// Records skipped entirely.
    pub skipped: Vec<SkippedRecord>,
    /// `(match id, resource id)` references dropped because the resource
    /// does not exist.
    pub dangling: Vec<(String, String)>,
    /// `(match id, resource id)` repeats dropped from a match's crew.
    pub repeated: Vec<(String, String)>,
}

impl LoadReport {
    /// Whether everything in the document was used.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.dangling.is_empty() && self.repeated.is_empty()
    }

    fn skip(&mut self, section: &'static str, index: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(section, index, %reason, "skipping persisted record");
        self.skipped.push(SkippedRecord {
            section,
            index,
            reason,
        });
    }
}

/// Summary of a saved file, read without rebuilding a planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub version: Option<String>,
    pub generated_at: Option<String>,
    pub resources: usize,
    pub events: usize,
    pub size_bytes: u64,
}

/// Serializes the planner to a pretty-printed JSON document.
pub fn to_json_string(planner: &Planner, now: NaiveDateTime) -> PersistenceResult<String> {
    let doc = DocumentOut {
        metadata: Metadata {
            version: FORMAT_VERSION.to_string(),
            application: APPLICATION.to_string(),
            generated_at: now,
        },
        resources: planner.resources().collect(),
        events: planner.matches().cloned().map(EventRecord::Match).collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Writes the planner to `path`, creating parent directories.
pub fn save(planner: &Planner, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    let json = to_json_string(planner, chrono::Local::now().naive_local())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    fs::write(path, json).map_err(|source| io_error(path, source))?;

    info!(
        path = %path.display(),
        resources = planner.resource_count(),
        matches = planner.match_count(),
        "planner saved"
    );
    Ok(())
}

/// Reads a planner from `path`.
pub fn load(path: impl AsRef<Path>, config: PlannerConfig) -> PersistenceResult<(Planner, LoadReport)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PersistenceError::FileNotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let (planner, report) = from_json_str(&raw, config)?;

    info!(
        path = %path.display(),
        resources = report.resources_loaded,
        matches = report.events_loaded,
        skipped = report.skipped.len(),
        "planner loaded"
    );
    Ok((planner, report))
}

/// Rebuilds a planner from a JSON document.
///
/// Unusable records are skipped: unknown `kind` or `type`, missing
/// fields, unparsable timestamps, an end not after the start, or an id
/// already seen (the first record wins). References to unknown resources
/// and repeated references are dropped from otherwise valid matches.
pub fn from_json_str(raw: &str, config: PlannerConfig) -> PersistenceResult<(Planner, LoadReport)> {
    let doc: Value = serde_json::from_str(raw)?;
    let (resource_values, event_values) = sections(&doc)?;
    let mut report = LoadReport::default();

    let mut resources = Registry::new();
    for (index, value) in resource_values.iter().enumerate() {
        match Resource::deserialize(value) {
            Ok(resource) => {
                let id = resource.id.clone();
                if !resources.insert(resource) {
                    report.skip("resources", index, format!("duplicate resource id '{id}'"));
                }
            }
            Err(e) => report.skip("resources", index, e.to_string()),
        }
    }

    let mut matches = Registry::new();
    for (index, value) in event_values.iter().enumerate() {
        let mut fixture = match EventRecord::deserialize(value) {
            Ok(EventRecord::Match(m)) => m,
            Err(e) => {
                report.skip("events", index, e.to_string());
                continue;
            }
        };
        if fixture.end <= fixture.start {
            report.skip("events", index, format!("match '{}' does not end after it starts", fixture.id));
            continue;
        }

        let listed = std::mem::take(&mut fixture.resource_ids);
        for rid in listed {
            if fixture.has_resource(&rid) {
                warn!(fixture = %fixture.id, resource = %rid, "dropping repeated resource reference");
                report.repeated.push((fixture.id.clone(), rid));
            } else {
                fixture.add_resource(rid);
            }
        }

        let dangling: Vec<String> = fixture
            .resource_ids
            .iter()
            .filter(|rid| !resources.contains(rid))
            .cloned()
            .collect();
        for rid in dangling {
            warn!(fixture = %fixture.id, resource = %rid, "dropping unknown resource reference");
            fixture.remove_resource(&rid);
            report.dangling.push((fixture.id.clone(), rid));
        }

        let id = fixture.id.clone();
        if !matches.insert(fixture) {
            report.skip("events", index, format!("duplicate match id '{id}'"));
        }
    }

    report.resources_loaded = resources.len();
    report.events_loaded = matches.len();
    Ok((Planner::from_parts(config, resources, matches), report))
}

/// Reads the metadata and record counts of a saved file.
pub fn file_info(path: impl AsRef<Path>) -> PersistenceResult<FileInfo> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PersistenceError::FileNotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let size_bytes = fs::metadata(path)
        .map_err(|source| io_error(path, source))?
        .len();
    let doc: Value = serde_json::from_str(&raw)?;
    let (resources, events) = sections(&doc)?;

    let meta = |key: &str| {
        doc.get("metadata")
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Ok(FileInfo {
        path: path.to_path_buf(),
        version: meta("version"),
        generated_at: meta("generated_at"),
        resources: resources.len(),
        events: events.len(),
        size_bytes,
    })
}

/// Copies `path` to `<stem>_backup_<YYYYmmdd_HHMMSS>.json` next to it.
pub fn create_backup(path: impl AsRef<Path>) -> PersistenceResult<PathBuf> {
    create_backup_at(path, chrono::Local::now().naive_local())
}

/// Like [`create_backup`] with an explicit timestamp.
pub fn create_backup_at(path: impl AsRef<Path>, now: NaiveDateTime) -> PersistenceResult<PathBuf> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PersistenceError::FileNotFound(path.display().to_string()));
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let backup = path.with_file_name(format!("{stem}_backup_{}.json", now.format("%Y%m%d_%H%M%S")));

    fs::copy(path, &backup).map_err(|source| io_error(&backup, source))?;
    info!(from = %path.display(), to = %backup.display(), "backup created");
    Ok(backup)
}

fn sections(doc: &Value) -> PersistenceResult<(&Vec<Value>, &Vec<Value>)> {
    let object = doc
        .as_object()
        .ok_or_else(|| PersistenceError::Structure("the top level must be a JSON object".into()))?;
    Ok((section(object, "resources")?, section(object, "events")?))
}

fn section<'a>(object: &'a Map<String, Value>, key: &str) -> PersistenceResult<&'a Vec<Value>> {
    object
        .get(key)
        .ok_or_else(|| PersistenceError::Structure(format!("missing '{key}' section")))?
        .as_array()
        .ok_or_else(|| PersistenceError::Structure(format!("'{key}' must be a list")))
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        source,
    }
}
