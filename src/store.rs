//! Whole-file JSON persistence for the project hierarchy.
//!
//! Every mutation rewrites the entire document at `.tempo/data.json`.
//! A missing file is an empty store; an unreadable or corrupt file is
//! quarantined next to the original and also treated as empty, so a bad
//! document never blocks the tool.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;
use crate::types::TrackerData;

pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProjectStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted hierarchy, running schema migrations first.
    ///
    /// Migrated documents are written back immediately, before any other
    /// operation sees the data.
    pub fn load(&self) -> Result<TrackerData> {
        if !self.path.exists() {
            return Ok(TrackerData::default());
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!(
                    "Warning: failed to read {}: {}. Starting with an empty store.",
                    self.path.display(),
                    e
                );
                return Ok(TrackerData::default());
            }
        };

        let mut value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                self.quarantine(&e.to_string());
                return Ok(TrackerData::default());
            }
        };

        let migrated = migrate(&mut value);

        let data: TrackerData = match serde_json::from_value(value) {
            Ok(data) => data,
            Err(e) => {
                self.quarantine(&e.to_string());
                return Ok(TrackerData::default());
            }
        };

        if migrated {
            self.save(&data)?;
        }

        Ok(data)
    }

    /// Serialize the full hierarchy and rewrite the backing file
    pub fn save(&self, data: &TrackerData) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        data.serialize(&mut ser)?;
        buf.push(b'\n');

        fs::write(&self.path, buf)?;
        Ok(())
    }

    /// Preserve a corrupt data file as `<path>.corrupt` before starting
    /// over with an empty store, so nothing is silently lost.
    fn quarantine(&self, reason: &str) {
        let mut backup = self.path.clone().into_os_string();
        backup.push(".corrupt");
        let backup = PathBuf::from(backup);

        eprintln!(
            "Warning: {} is corrupt ({}). Keeping it at {} and starting with an empty store.",
            self.path.display(),
            reason,
            backup.display()
        );

        if let Err(e) = fs::rename(&self.path, &backup) {
            tracing::warn!(
                "failed to quarantine corrupt store {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

type MigrationFn = fn(&mut Value) -> bool;

/// Ordered schema migration passes.
///
/// Each pass inspects the raw document and returns whether it changed
/// anything. New passes are appended; they must stay idempotent.
const MIGRATIONS: &[(&str, MigrationFn)] = &[("add-status-fields", add_status_fields)];

/// Run every migration pass in order; returns whether the document changed
pub fn migrate(value: &mut Value) -> bool {
    let mut changed = false;
    for (name, pass) in MIGRATIONS {
        if pass(value) {
            tracing::info!("applied schema migration '{}'", name);
            changed = true;
        }
    }
    changed
}

/// Legacy records predate the open/closed lifecycle and carry no status
fn add_status_fields(value: &mut Value) -> bool {
    let mut changed = false;

    let Some(projects) = value.get_mut("projects").and_then(Value::as_array_mut) else {
        return false;
    };

    for project in projects {
        let Some(project) = project.as_object_mut() else {
            continue;
        };
        if !project.contains_key("status") {
            project.insert("status".to_string(), Value::String("open".to_string()));
            changed = true;
        }
        if let Some(subs) = project.get_mut("sub_projects").and_then(Value::as_array_mut) {
            for sub in subs {
                if let Some(sub) = sub.as_object_mut()
                    && !sub.contains_key("status")
                {
                    sub.insert("status".to_string(), Value::String("open".to_string()));
                    changed = true;
                }
            }
        }
    }

    changed
}
