use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use jiff::civil::DateTime;

use crate::error::TempoError;

pub const TEMPO_DIR: &str = ".tempo";
pub const DATA_FILE: &str = "data.json";

/// Root directory for all tempo state in the current working directory
pub fn tempo_root() -> PathBuf {
    PathBuf::from(TEMPO_DIR)
}

/// Timestamp format persisted in time entries (local, naive ISO 8601)
pub const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a persisted entry timestamp.
///
/// Returns `None` for malformed strings; aggregation code skips the
/// affected entry instead of aborting.
pub fn parse_timestamp(s: &str) -> Option<DateTime> {
    DateTime::from_str(s).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Open => write!(f, "open"),
            ProjectStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(ProjectStatus::Open),
            "closed" => Ok(ProjectStatus::Closed),
            _ => Err(TempoError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["open", "closed"];

/// Status filter accepted by the list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    Open,
    Closed,
    #[default]
    All,
}

impl StatusFilter {
    pub fn matches(&self, status: ProjectStatus) -> bool {
        match self {
            StatusFilter::Open => status == ProjectStatus::Open,
            StatusFilter::Closed => status == ProjectStatus::Closed,
            StatusFilter::All => true,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::Open => write!(f, "open"),
            StatusFilter::Closed => write!(f, "closed"),
            StatusFilter::All => write!(f, "all"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(StatusFilter::Open),
            "closed" => Ok(StatusFilter::Closed),
            "all" => Ok(StatusFilter::All),
            _ => Err(TempoError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_FILTERS: &[&str] = &["open", "closed", "all"];

/// One start/stop interval of recorded work.
///
/// Timestamps are stored as strings and parsed on demand so that a
/// malformed value only invalidates the entry it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub start_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl TimeEntry {
    pub fn open(start_time: impl Into<String>) -> Self {
        TimeEntry {
            start_time: start_time.into(),
            end_time: None,
        }
    }

    /// An entry without an end time is the active session
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn start(&self) -> Option<DateTime> {
        parse_timestamp(&self.start_time)
    }

    pub fn end(&self) -> Option<DateTime> {
        self.end_time.as_deref().and_then(parse_timestamp)
    }

    /// Latest timestamp of the entry, preferring the end time
    pub fn last_activity(&self) -> &str {
        self.end_time.as_deref().unwrap_or(&self.start_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubProject {
    pub sub_project_name: String,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
}

impl SubProject {
    pub fn new(name: impl Into<String>) -> Self {
        SubProject {
            sub_project_name: name.into(),
            status: ProjectStatus::Open,
            time_entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainProject {
    pub main_project_name: String,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default)]
    pub sub_projects: Vec<SubProject>,
}

impl MainProject {
    pub fn new(name: impl Into<String>) -> Self {
        MainProject {
            main_project_name: name.into(),
            status: ProjectStatus::Open,
            sub_projects: Vec::new(),
        }
    }

    pub fn sub(&self, name: &str) -> Option<&SubProject> {
        self.sub_projects
            .iter()
            .find(|s| s.sub_project_name == name)
    }

    pub fn sub_mut(&mut self, name: &str) -> Option<&mut SubProject> {
        self.sub_projects
            .iter_mut()
            .find(|s| s.sub_project_name == name)
    }
}

/// The whole persisted hierarchy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerData {
    #[serde(default)]
    pub projects: Vec<MainProject>,
}

impl TrackerData {
    pub fn main(&self, name: &str) -> Option<&MainProject> {
        self.projects.iter().find(|p| p.main_project_name == name)
    }

    pub fn main_mut(&mut self, name: &str) -> Option<&mut MainProject> {
        self.projects
            .iter_mut()
            .find(|p| p.main_project_name == name)
    }
}

/// `{name, status}` row returned by the main-project list operations
#[derive(Debug, Clone, Serialize)]
pub struct MainProjectSummary {
    pub main_project_name: String,
    pub status: ProjectStatus,
}

/// `{main, sub, status}` row returned by the sub-project list operations
#[derive(Debug, Clone, Serialize)]
pub struct SubProjectSummary {
    pub main_project_name: String,
    pub sub_project_name: String,
    pub status: ProjectStatus,
}
