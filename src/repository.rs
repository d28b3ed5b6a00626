//! In-memory project hierarchy with whole-document persistence.
//!
//! The repository owns the [`TrackerData`] tree plus its backing
//! [`ProjectStore`]. Every successful mutation rewrites the full document.
//! Restructuring operations (move/promote/demote) validate all their
//! preconditions before touching the tree, so a failure never leaves a
//! partial transformation behind.
//!
//! The repository also tracks the single open time entry as an explicit
//! `(main, sub)` reference. It is recomputed once at load time by a reverse
//! scan and kept current by every mutating operation, so session queries
//! never re-traverse the hierarchy.

use crate::error::{Result, TempoError};
use crate::store::ProjectStore;
use crate::types::{
    MainProject, MainProjectSummary, ProjectStatus, StatusFilter, SubProject, SubProjectSummary,
    TimeEntry, TrackerData,
};

/// Names the sub-project holding the open time entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRef {
    pub main: String,
    pub sub: String,
}

/// Name of the sub-project that receives a promoted sub-project's entries
pub const PROMOTED_SUB_NAME: &str = "General";

pub struct ProjectRepository {
    data: TrackerData,
    store: ProjectStore,
    active: Option<ActiveRef>,
}

impl ProjectRepository {
    /// Load the hierarchy from the store and locate the open entry
    pub fn open(store: ProjectStore) -> Result<Self> {
        let data = store.load()?;
        let active = find_active(&data);
        Ok(ProjectRepository {
            data,
            store,
            active,
        })
    }

    pub fn data(&self) -> &TrackerData {
        &self.data
    }

    pub fn active(&self) -> Option<&ActiveRef> {
        self.active.as_ref()
    }

    pub(crate) fn persist(&self) -> Result<()> {
        self.store.save(&self.data)
    }

    // --- Main project operations ---

    pub fn add_main_project(&mut self, name: &str) -> Result<()> {
        if self.data.main(name).is_some() {
            return Err(TempoError::DuplicateMainProject(name.to_string()));
        }
        self.data.projects.push(MainProject::new(name));
        self.persist()
    }

    pub fn list_main_projects(&self, filter: StatusFilter) -> Vec<MainProjectSummary> {
        self.data
            .projects
            .iter()
            .filter(|p| filter.matches(p.status))
            .map(|p| MainProjectSummary {
                main_project_name: p.main_project_name.clone(),
                status: p.status,
            })
            .collect()
    }

    pub fn rename_main_project(&mut self, old: &str, new: &str) -> Result<()> {
        if self.data.main(new).is_some() {
            return Err(TempoError::DuplicateMainProject(new.to_string()));
        }
        let project = self
            .data
            .main_mut(old)
            .ok_or_else(|| TempoError::MainProjectNotFound(old.to_string()))?;
        project.main_project_name = new.to_string();

        if let Some(active) = &mut self.active
            && active.main == old
        {
            active.main = new.to_string();
        }
        self.persist()
    }

    pub fn close_main_project(&mut self, name: &str) -> Result<()> {
        self.set_main_status(name, ProjectStatus::Closed)
    }

    pub fn reopen_main_project(&mut self, name: &str) -> Result<()> {
        self.set_main_status(name, ProjectStatus::Open)
    }

    fn set_main_status(&mut self, name: &str, status: ProjectStatus) -> Result<()> {
        let project = self
            .data
            .main_mut(name)
            .ok_or_else(|| TempoError::MainProjectNotFound(name.to_string()))?;
        project.status = status;
        self.persist()
    }

    /// Delete a main project along with all its sub-projects and entries
    pub fn delete_main_project(&mut self, name: &str) -> Result<()> {
        let index = self
            .data
            .projects
            .iter()
            .position(|p| p.main_project_name == name)
            .ok_or_else(|| TempoError::MainProjectNotFound(name.to_string()))?;
        self.data.projects.remove(index);

        if self.active.as_ref().is_some_and(|a| a.main == name) {
            self.active = None;
        }
        self.persist()
    }

    /// Main projects with no sub-projects, or only closed ones
    pub fn list_completed_main_projects(&self) -> Vec<MainProjectSummary> {
        self.data
            .projects
            .iter()
            .filter(|p| {
                p.sub_projects
                    .iter()
                    .all(|s| s.status == ProjectStatus::Closed)
            })
            .map(|p| MainProjectSummary {
                main_project_name: p.main_project_name.clone(),
                status: p.status,
            })
            .collect()
    }

    // --- Sub-project operations ---

    pub fn add_sub_project(&mut self, main: &str, name: &str) -> Result<()> {
        let project = self
            .data
            .main_mut(main)
            .ok_or_else(|| TempoError::MainProjectNotFound(main.to_string()))?;
        if project.sub(name).is_some() {
            return Err(TempoError::DuplicateSubProject(
                main.to_string(),
                name.to_string(),
            ));
        }
        project.sub_projects.push(SubProject::new(name));
        self.persist()
    }

    /// List sub-projects, scoped to one main project when `main` is given
    pub fn list_sub_projects(
        &self,
        main: Option<&str>,
        filter: StatusFilter,
    ) -> Result<Vec<SubProjectSummary>> {
        let projects: Vec<&MainProject> = match main {
            Some(name) => vec![
                self.data
                    .main(name)
                    .ok_or_else(|| TempoError::MainProjectNotFound(name.to_string()))?,
            ],
            None => self.data.projects.iter().collect(),
        };

        Ok(projects
            .iter()
            .flat_map(|p| {
                p.sub_projects
                    .iter()
                    .filter(|s| filter.matches(s.status))
                    .map(|s| SubProjectSummary {
                        main_project_name: p.main_project_name.clone(),
                        sub_project_name: s.sub_project_name.clone(),
                        status: s.status,
                    })
            })
            .collect())
    }

    pub fn rename_sub_project(&mut self, main: &str, old: &str, new: &str) -> Result<()> {
        let project = self
            .data
            .main_mut(main)
            .ok_or_else(|| TempoError::MainProjectNotFound(main.to_string()))?;
        if project.sub(new).is_some() {
            return Err(TempoError::DuplicateSubProject(
                main.to_string(),
                new.to_string(),
            ));
        }
        let sub = project
            .sub_mut(old)
            .ok_or_else(|| TempoError::SubProjectNotFound(main.to_string(), old.to_string()))?;
        sub.sub_project_name = new.to_string();

        if let Some(active) = &mut self.active
            && active.main == main
            && active.sub == old
        {
            active.sub = new.to_string();
        }
        self.persist()
    }

    pub fn close_sub_project(&mut self, main: &str, name: &str) -> Result<()> {
        self.set_sub_status(main, name, ProjectStatus::Closed)
    }

    pub fn reopen_sub_project(&mut self, main: &str, name: &str) -> Result<()> {
        self.set_sub_status(main, name, ProjectStatus::Open)
    }

    fn set_sub_status(&mut self, main: &str, name: &str, status: ProjectStatus) -> Result<()> {
        let project = self
            .data
            .main_mut(main)
            .ok_or_else(|| TempoError::MainProjectNotFound(main.to_string()))?;
        let sub = project
            .sub_mut(name)
            .ok_or_else(|| TempoError::SubProjectNotFound(main.to_string(), name.to_string()))?;
        sub.status = status;
        self.persist()
    }

    /// Delete a sub-project along with its time entries
    pub fn delete_sub_project(&mut self, main: &str, name: &str) -> Result<()> {
        let project = self
            .data
            .main_mut(main)
            .ok_or_else(|| TempoError::MainProjectNotFound(main.to_string()))?;
        let index = project
            .sub_projects
            .iter()
            .position(|s| s.sub_project_name == name)
            .ok_or_else(|| TempoError::SubProjectNotFound(main.to_string(), name.to_string()))?;
        project.sub_projects.remove(index);

        if self
            .active
            .as_ref()
            .is_some_and(|a| a.main == main && a.sub == name)
        {
            self.active = None;
        }
        self.persist()
    }

    /// Remove every closed sub-project across all main projects; returns
    /// the number removed
    pub fn delete_all_closed_sub_projects(&mut self) -> Result<usize> {
        let mut removed = 0;
        for project in &mut self.data.projects {
            let before = project.sub_projects.len();
            project
                .sub_projects
                .retain(|s| s.status != ProjectStatus::Closed);
            removed += before - project.sub_projects.len();
        }

        if let Some(active) = &self.active {
            let still_there = self
                .data
                .main(&active.main)
                .and_then(|p| p.sub(&active.sub))
                .is_some();
            if !still_there {
                self.active = None;
            }
        }

        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Move a sub-project (entries intact) to another main project,
    /// appending it to the destination's list
    pub fn move_sub_project(&mut self, src_main: &str, name: &str, dst_main: &str) -> Result<()> {
        // Validate everything before mutating either side
        let src = self
            .data
            .main(src_main)
            .ok_or_else(|| TempoError::MainProjectNotFound(src_main.to_string()))?;
        if src.sub(name).is_none() {
            return Err(TempoError::SubProjectNotFound(
                src_main.to_string(),
                name.to_string(),
            ));
        }
        let dst = self
            .data
            .main(dst_main)
            .ok_or_else(|| TempoError::MainProjectNotFound(dst_main.to_string()))?;
        if dst.sub(name).is_some() {
            return Err(TempoError::DuplicateSubProject(
                dst_main.to_string(),
                name.to_string(),
            ));
        }

        let src = self.data.main_mut(src_main).expect("validated above");
        let index = src
            .sub_projects
            .iter()
            .position(|s| s.sub_project_name == name)
            .expect("validated above");
        let sub = src.sub_projects.remove(index);
        self.data
            .main_mut(dst_main)
            .expect("validated above")
            .sub_projects
            .push(sub);

        if let Some(active) = &mut self.active
            && active.main == src_main
            && active.sub == name
        {
            active.main = dst_main.to_string();
        }
        self.persist()
    }

    /// Turn a sub-project into a new main project of the same name; its
    /// entries land in a single "General" sub-project underneath
    pub fn promote_sub_project(&mut self, main: &str, name: &str) -> Result<()> {
        if self.data.main(name).is_some() {
            return Err(TempoError::DuplicateMainProject(name.to_string()));
        }
        let project = self
            .data
            .main(main)
            .ok_or_else(|| TempoError::MainProjectNotFound(main.to_string()))?;
        if project.sub(name).is_none() {
            return Err(TempoError::SubProjectNotFound(
                main.to_string(),
                name.to_string(),
            ));
        }

        let project = self.data.main_mut(main).expect("validated above");
        let index = project
            .sub_projects
            .iter()
            .position(|s| s.sub_project_name == name)
            .expect("validated above");
        let sub = project.sub_projects.remove(index);

        let mut promoted = MainProject::new(&sub.sub_project_name);
        let mut general = SubProject::new(PROMOTED_SUB_NAME);
        general.time_entries = sub.time_entries;
        promoted.sub_projects.push(general);
        self.data.projects.push(promoted);

        if let Some(active) = &mut self.active
            && active.main == main
            && active.sub == name
        {
            active.main = name.to_string();
            active.sub = PROMOTED_SUB_NAME.to_string();
        }
        self.persist()
    }

    /// Collapse a main project into a single sub-project under another
    /// main project, merging all its entries sorted by start time
    pub fn demote_main_project(&mut self, name: &str, new_parent: &str) -> Result<()> {
        if name == new_parent {
            return Err(TempoError::DemoteIntoSelf(name.to_string()));
        }
        if self.data.main(name).is_none() {
            return Err(TempoError::MainProjectNotFound(name.to_string()));
        }
        let parent = self
            .data
            .main(new_parent)
            .ok_or_else(|| TempoError::MainProjectNotFound(new_parent.to_string()))?;
        if parent.sub(name).is_some() {
            return Err(TempoError::DuplicateSubProject(
                new_parent.to_string(),
                name.to_string(),
            ));
        }

        let index = self
            .data
            .projects
            .iter()
            .position(|p| p.main_project_name == name)
            .expect("validated above");
        let demoted = self.data.projects.remove(index);

        let mut entries: Vec<TimeEntry> = demoted
            .sub_projects
            .into_iter()
            .flat_map(|s| s.time_entries)
            .collect();
        // Timestamps share one lexicographically sortable format
        entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        let mut merged = SubProject::new(name);
        merged.time_entries = entries;
        self.data
            .main_mut(new_parent)
            .expect("validated above")
            .sub_projects
            .push(merged);

        if let Some(active) = &mut self.active
            && active.main == name
        {
            active.main = new_parent.to_string();
            active.sub = name.to_string();
        }
        self.persist()
    }

    // --- Session support (see session.rs for the public surface) ---

    /// Close the open entry if one exists. Does not persist.
    pub(crate) fn close_open_entry(&mut self, end_time: &str) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        if let Some(project) = self.data.main_mut(&active.main)
            && let Some(sub) = project.sub_mut(&active.sub)
            && let Some(entry) = sub.time_entries.last_mut()
            && entry.is_open()
        {
            entry.end_time = Some(end_time.to_string());
            return true;
        }

        // The cached reference went stale; fall back to a scan
        tracing::warn!(
            "active session reference {}/{} was stale",
            active.main,
            active.sub
        );
        if let Some(entry) = find_open_entry_mut(&mut self.data) {
            entry.end_time = Some(end_time.to_string());
            return true;
        }
        false
    }

    /// Append a fresh open entry to the target sub-project. The caller has
    /// already closed any previously open entry. Does not persist.
    pub(crate) fn open_entry(&mut self, main: &str, sub: &str, start_time: String) -> Result<()> {
        let project = self
            .data
            .main_mut(main)
            .ok_or_else(|| TempoError::MainProjectNotFound(main.to_string()))?;
        let target = project
            .sub_mut(sub)
            .ok_or_else(|| TempoError::SubProjectNotFound(main.to_string(), sub.to_string()))?;
        target.time_entries.push(TimeEntry::open(start_time));
        self.active = Some(ActiveRef {
            main: main.to_string(),
            sub: sub.to_string(),
        });
        Ok(())
    }
}

/// Locate the open entry by scanning in reverse insertion order (last main
/// project first, last sub-project first). At most one exists.
fn find_active(data: &TrackerData) -> Option<ActiveRef> {
    for project in data.projects.iter().rev() {
        for sub in project.sub_projects.iter().rev() {
            if let Some(entry) = sub.time_entries.last()
                && entry.is_open()
            {
                return Some(ActiveRef {
                    main: project.main_project_name.clone(),
                    sub: sub.sub_project_name.clone(),
                });
            }
        }
    }
    None
}

fn find_open_entry_mut(data: &mut TrackerData) -> Option<&mut TimeEntry> {
    for project in data.projects.iter_mut().rev() {
        for sub in project.sub_projects.iter_mut().rev() {
            if let Some(entry) = sub.time_entries.last_mut()
                && entry.is_open()
            {
                return Some(entry);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusFilter;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> ProjectRepository {
        let store = ProjectStore::new(dir.path().join("data.json"));
        ProjectRepository::open(store).unwrap()
    }

    fn entry(start: &str, end: &str) -> TimeEntry {
        TimeEntry {
            start_time: start.to_string(),
            end_time: Some(end.to_string()),
        }
    }

    fn push_entry(repo: &mut ProjectRepository, main: &str, sub: &str, e: TimeEntry) {
        repo.data
            .main_mut(main)
            .unwrap()
            .sub_mut(sub)
            .unwrap()
            .time_entries
            .push(e);
    }

    #[test]
    fn test_add_and_list_main_projects() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Project Alpha").unwrap();
        repo.add_main_project("Project Beta").unwrap();

        let names: Vec<_> = repo
            .list_main_projects(StatusFilter::All)
            .into_iter()
            .map(|p| p.main_project_name)
            .collect();
        assert_eq!(names, vec!["Project Alpha", "Project Beta"]);
    }

    #[test]
    fn test_add_main_project_rejects_duplicate() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Once").unwrap();
        assert!(matches!(
            repo.add_main_project("Once"),
            Err(TempoError::DuplicateMainProject(_))
        ));
    }

    #[test]
    fn test_rename_main_project() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Old Name").unwrap();
        repo.rename_main_project("Old Name", "New Name").unwrap();

        assert!(repo.data().main("New Name").is_some());
        assert!(matches!(
            repo.rename_main_project("Missing", "Other"),
            Err(TempoError::MainProjectNotFound(_))
        ));

        repo.add_main_project("Taken").unwrap();
        assert!(matches!(
            repo.rename_main_project("New Name", "Taken"),
            Err(TempoError::DuplicateMainProject(_))
        ));
    }

    #[test]
    fn test_delete_main_project_cascades() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Doomed").unwrap();
        repo.add_sub_project("Doomed", "Sub").unwrap();
        push_entry(
            &mut repo,
            "Doomed",
            "Sub",
            entry("2025-10-20T09:00:00", "2025-10-20T10:00:00"),
        );

        repo.delete_main_project("Doomed").unwrap();
        assert!(repo.data().projects.is_empty());
        assert!(matches!(
            repo.delete_main_project("Doomed"),
            Err(TempoError::MainProjectNotFound(_))
        ));
    }

    #[test]
    fn test_sub_project_lifecycle() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Main").unwrap();
        repo.add_sub_project("Main", "Sub A").unwrap();
        repo.add_sub_project("Main", "Sub B").unwrap();

        assert!(matches!(
            repo.add_sub_project("Main", "Sub A"),
            Err(TempoError::DuplicateSubProject(_, _))
        ));
        assert!(matches!(
            repo.add_sub_project("Nope", "Sub"),
            Err(TempoError::MainProjectNotFound(_))
        ));

        repo.close_sub_project("Main", "Sub A").unwrap();
        let closed = repo
            .list_sub_projects(Some("Main"), StatusFilter::Closed)
            .unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].sub_project_name, "Sub A");

        repo.reopen_sub_project("Main", "Sub A").unwrap();
        let open = repo
            .list_sub_projects(Some("Main"), StatusFilter::Open)
            .unwrap();
        assert_eq!(open.len(), 2);

        repo.delete_sub_project("Main", "Sub A").unwrap();
        let all = repo.list_sub_projects(Some("Main"), StatusFilter::All).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].sub_project_name, "Sub B");
    }

    #[test]
    fn test_rename_sub_project_collision() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Main").unwrap();
        repo.add_sub_project("Main", "Sub A").unwrap();
        repo.add_sub_project("Main", "Sub B").unwrap();

        assert!(matches!(
            repo.rename_sub_project("Main", "Sub A", "Sub B"),
            Err(TempoError::DuplicateSubProject(_, _))
        ));
        // Nothing changed
        let names: Vec<_> = repo
            .list_sub_projects(Some("Main"), StatusFilter::All)
            .unwrap()
            .into_iter()
            .map(|s| s.sub_project_name)
            .collect();
        assert_eq!(names, vec!["Sub A", "Sub B"]);
    }

    #[test]
    fn test_delete_all_closed_sub_projects() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("P1").unwrap();
        repo.add_main_project("P2").unwrap();
        repo.add_sub_project("P1", "Keep").unwrap();
        repo.add_sub_project("P1", "Drop 1").unwrap();
        repo.add_sub_project("P2", "Drop 2").unwrap();
        repo.close_sub_project("P1", "Drop 1").unwrap();
        repo.close_sub_project("P2", "Drop 2").unwrap();

        assert_eq!(repo.delete_all_closed_sub_projects().unwrap(), 2);
        assert_eq!(repo.delete_all_closed_sub_projects().unwrap(), 0);
        let all = repo.list_sub_projects(None, StatusFilter::All).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].sub_project_name, "Keep");
    }

    #[test]
    fn test_move_sub_project_preserves_entries() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Src").unwrap();
        repo.add_main_project("Dst").unwrap();
        repo.add_sub_project("Src", "Task").unwrap();
        push_entry(
            &mut repo,
            "Src",
            "Task",
            entry("2025-10-20T09:00:00", "2025-10-20T10:30:00"),
        );

        repo.move_sub_project("Src", "Task", "Dst").unwrap();

        assert!(repo.data().main("Src").unwrap().sub("Task").is_none());
        let moved = repo.data().main("Dst").unwrap().sub("Task").unwrap();
        assert_eq!(moved.time_entries.len(), 1);
        assert_eq!(moved.time_entries[0].start_time, "2025-10-20T09:00:00");
        assert_eq!(
            moved.time_entries[0].end_time.as_deref(),
            Some("2025-10-20T10:30:00")
        );
    }

    #[test]
    fn test_move_sub_project_collision_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Src").unwrap();
        repo.add_main_project("Dst").unwrap();
        repo.add_sub_project("Src", "Task").unwrap();
        repo.add_sub_project("Dst", "Task").unwrap();

        assert!(matches!(
            repo.move_sub_project("Src", "Task", "Dst"),
            Err(TempoError::DuplicateSubProject(_, _))
        ));
        assert!(repo.data().main("Src").unwrap().sub("Task").is_some());
        assert_eq!(repo.data().main("Dst").unwrap().sub_projects.len(), 1);
    }

    #[test]
    fn test_promote_sub_project() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Main").unwrap();
        repo.add_sub_project("Main", "Growing").unwrap();
        push_entry(
            &mut repo,
            "Main",
            "Growing",
            entry("2025-10-20T09:00:00", "2025-10-20T10:00:00"),
        );

        repo.promote_sub_project("Main", "Growing").unwrap();

        let promoted = repo.data().main("Growing").unwrap();
        assert_eq!(promoted.sub_projects.len(), 1);
        let general = &promoted.sub_projects[0];
        assert_eq!(general.sub_project_name, PROMOTED_SUB_NAME);
        assert_eq!(general.time_entries.len(), 1);
        assert_eq!(general.time_entries[0].start_time, "2025-10-20T09:00:00");
        assert!(repo.data().main("Main").unwrap().sub("Growing").is_none());
    }

    #[test]
    fn test_promote_fails_when_main_name_taken() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Main").unwrap();
        repo.add_main_project("Taken").unwrap();
        repo.add_sub_project("Main", "Taken").unwrap();

        assert!(matches!(
            repo.promote_sub_project("Main", "Taken"),
            Err(TempoError::DuplicateMainProject(_))
        ));
        assert!(repo.data().main("Main").unwrap().sub("Taken").is_some());
    }

    #[test]
    fn test_demote_main_project_merges_sorted() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Shrinking").unwrap();
        repo.add_main_project("Parent").unwrap();
        repo.add_sub_project("Shrinking", "A").unwrap();
        repo.add_sub_project("Shrinking", "B").unwrap();
        push_entry(
            &mut repo,
            "Shrinking",
            "A",
            entry("2025-10-22T09:00:00", "2025-10-22T10:00:00"),
        );
        push_entry(
            &mut repo,
            "Shrinking",
            "B",
            entry("2025-10-20T09:00:00", "2025-10-20T10:00:00"),
        );
        push_entry(
            &mut repo,
            "Shrinking",
            "A",
            entry("2025-10-21T09:00:00", "2025-10-21T10:00:00"),
        );

        repo.demote_main_project("Shrinking", "Parent").unwrap();

        assert!(repo.data().main("Shrinking").is_none());
        let merged = repo.data().main("Parent").unwrap().sub("Shrinking").unwrap();
        let starts: Vec<_> = merged
            .time_entries
            .iter()
            .map(|e| e.start_time.as_str())
            .collect();
        assert_eq!(
            starts,
            vec![
                "2025-10-20T09:00:00",
                "2025-10-21T09:00:00",
                "2025-10-22T09:00:00"
            ]
        );
    }

    #[test]
    fn test_demote_precondition_failures() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Main").unwrap();
        repo.add_main_project("Parent").unwrap();
        repo.add_sub_project("Parent", "Main").unwrap();

        assert!(matches!(
            repo.demote_main_project("Main", "Main"),
            Err(TempoError::DemoteIntoSelf(_))
        ));
        assert!(matches!(
            repo.demote_main_project("Main", "Parent"),
            Err(TempoError::DuplicateSubProject(_, _))
        ));
        assert!(repo.data().main("Main").is_some());
    }

    #[test]
    fn test_list_completed_main_projects() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Empty").unwrap();
        repo.add_main_project("Done").unwrap();
        repo.add_main_project("Ongoing").unwrap();
        repo.add_sub_project("Done", "Finished").unwrap();
        repo.close_sub_project("Done", "Finished").unwrap();
        repo.add_sub_project("Ongoing", "Work").unwrap();

        let names: Vec<_> = repo
            .list_completed_main_projects()
            .into_iter()
            .map(|p| p.main_project_name)
            .collect();
        assert_eq!(names, vec!["Empty", "Done"]);
    }

    #[test]
    fn test_changes_survive_reload() {
        let dir = TempDir::new().unwrap();
        {
            let mut repo = repo_in(&dir);
            repo.add_main_project("Persisted").unwrap();
            repo.add_sub_project("Persisted", "Sub").unwrap();
        }
        let repo = repo_in(&dir);
        assert!(repo.data().main("Persisted").unwrap().sub("Sub").is_some());
    }

    #[test]
    fn test_active_reference_follows_restructuring() {
        let dir = TempDir::new().unwrap();
        let mut repo = repo_in(&dir);
        repo.add_main_project("Src").unwrap();
        repo.add_main_project("Dst").unwrap();
        repo.add_sub_project("Src", "Task").unwrap();
        repo.open_entry("Src", "Task", "2025-10-20T09:00:00".to_string())
            .unwrap();

        repo.move_sub_project("Src", "Task", "Dst").unwrap();
        let active = repo.active().unwrap();
        assert_eq!(active.main, "Dst");
        assert_eq!(active.sub, "Task");

        repo.rename_sub_project("Dst", "Task", "Renamed").unwrap();
        assert_eq!(repo.active().unwrap().sub, "Renamed");

        repo.delete_sub_project("Dst", "Renamed").unwrap();
        assert!(repo.active().is_none());
    }

    #[test]
    fn test_active_found_on_load_by_reverse_scan() {
        let dir = TempDir::new().unwrap();
        {
            let mut repo = repo_in(&dir);
            repo.add_main_project("P1").unwrap();
            repo.add_sub_project("P1", "T1").unwrap();
            repo.open_entry("P1", "T1", "2025-10-20T09:00:00".to_string())
                .unwrap();
            repo.persist().unwrap();
        }
        let repo = repo_in(&dir);
        let active = repo.active().unwrap();
        assert_eq!(active.main, "P1");
        assert_eq!(active.sub, "T1");
    }
}
