//! Start/stop session tracking over the repository.
//!
//! The invariant: across the entire hierarchy at most one time entry is
//! open at any moment. `start_work` enforces it by closing whatever is
//! open before opening anything new.

use serde::Serialize;

use crate::clock::{Clock, format_timestamp};
use crate::error::Result;
use crate::repository::ProjectRepository;

/// The open session, as reported by `get_current_work`
#[derive(Debug, Clone, Serialize)]
pub struct ActiveWork {
    pub main_project_name: String,
    pub sub_project_name: String,
    pub start_time: String,
}

pub struct SessionTracker<'a> {
    repo: &'a mut ProjectRepository,
    clock: &'a dyn Clock,
}

impl<'a> SessionTracker<'a> {
    pub fn new(repo: &'a mut ProjectRepository, clock: &'a dyn Clock) -> Self {
        SessionTracker { repo, clock }
    }

    /// Start a session on the given sub-project.
    ///
    /// Any currently open entry is closed first, even when the target turns
    /// out not to exist; in that case the close sticks and the error only
    /// reports the missing target.
    pub fn start_work(&mut self, main: &str, sub: &str) -> Result<()> {
        self.stop_work()?;

        let now = format_timestamp(self.clock.now());
        self.repo.open_entry(main, sub, now)?;
        self.repo.persist()
    }

    /// Close the open entry; returns whether one was open
    pub fn stop_work(&mut self) -> Result<bool> {
        let now = format_timestamp(self.clock.now());
        if self.repo.close_open_entry(&now) {
            self.repo.persist()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// The currently open session, if any
    pub fn get_current_work(&self) -> Option<ActiveWork> {
        let active = self.repo.active()?;
        let entry = self
            .repo
            .data()
            .main(&active.main)?
            .sub(&active.sub)?
            .time_entries
            .last()?;
        if !entry.is_open() {
            return None;
        }
        Some(ActiveWork {
            main_project_name: active.main.clone(),
            sub_project_name: active.sub.clone(),
            start_time: entry.start_time.clone(),
        })
    }
}
