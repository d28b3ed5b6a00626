pub mod cli;
pub mod clipboard;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod inactivity;
pub mod report;
pub mod repository;
pub mod session;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock, format_timestamp};
pub use config::Config;
pub use error::{Result, TempoError};
pub use inactivity::{InactiveMainProject, InactiveSubProject, InactivityAnalyzer};
pub use report::{ReportEngine, format_duration, format_hours};
pub use repository::{ActiveRef, PROMOTED_SUB_NAME, ProjectRepository};
pub use session::{ActiveWork, SessionTracker};
pub use store::ProjectStore;
pub use types::{
    DATA_FILE, MainProject, ProjectStatus, StatusFilter, SubProject, TEMPO_DIR, TimeEntry,
    TrackerData, VALID_FILTERS, VALID_STATUSES, parse_timestamp, tempo_root,
};
