//! Read-only staleness queries over the hierarchy.
//!
//! A sub-project is inactive when it has recorded work, nothing is
//! currently running on it, and its latest timestamp is older than the
//! cutoff. A main project is inactive when none of its entries are open
//! and its newest completed entry is older than the cutoff; projects with
//! no completed entries are never reported.

use jiff::Span;
use jiff::civil::DateTime;
use serde::Serialize;

use crate::clock::Clock;
use crate::repository::ProjectRepository;
use crate::types::parse_timestamp;

#[derive(Debug, Clone, Serialize)]
pub struct InactiveSubProject {
    pub main_project: String,
    pub sub_project: String,
    pub last_activity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InactiveMainProject {
    pub main_project: String,
    pub last_activity: String,
}

pub struct InactivityAnalyzer<'a> {
    repo: &'a ProjectRepository,
    clock: &'a dyn Clock,
}

impl<'a> InactivityAnalyzer<'a> {
    pub fn new(repo: &'a ProjectRepository, clock: &'a dyn Clock) -> Self {
        InactivityAnalyzer { repo, clock }
    }

    fn cutoff(&self, weeks: u32) -> Option<DateTime> {
        self.clock
            .now()
            .checked_sub(Span::new().days(i64::from(weeks) * 7))
            .ok()
    }

    /// Sub-projects whose latest activity is older than `weeks` weeks
    pub fn list_inactive_sub_projects(&self, weeks: u32) -> Vec<InactiveSubProject> {
        let Some(cutoff) = self.cutoff(weeks) else {
            return Vec::new();
        };

        let mut inactive = Vec::new();
        for project in &self.repo.data().projects {
            for sub in &project.sub_projects {
                if sub.time_entries.is_empty() {
                    continue;
                }
                // A running session keeps the sub-project active regardless
                // of how old its other entries are
                if sub.time_entries.last().is_some_and(|e| e.is_open()) {
                    continue;
                }

                let Some(last_activity) = sub
                    .time_entries
                    .iter()
                    .map(|e| e.last_activity())
                    .max()
                else {
                    continue;
                };
                let Some(latest) = parse_timestamp(last_activity) else {
                    continue;
                };

                if latest < cutoff {
                    inactive.push(InactiveSubProject {
                        main_project: project.main_project_name.clone(),
                        sub_project: sub.sub_project_name.clone(),
                        last_activity: last_activity.to_string(),
                    });
                }
            }
        }
        inactive
    }

    /// Main projects whose newest completed entry is older than `weeks` weeks
    pub fn list_inactive_main_projects(&self, weeks: u32) -> Vec<InactiveMainProject> {
        let Some(cutoff) = self.cutoff(weeks) else {
            return Vec::new();
        };

        let mut inactive = Vec::new();
        for project in &self.repo.data().projects {
            let mut has_open = false;
            let mut last_end: Option<&str> = None;
            for entry in project
                .sub_projects
                .iter()
                .flat_map(|s| &s.time_entries)
            {
                match entry.end_time.as_deref() {
                    None => {
                        has_open = true;
                        break;
                    }
                    Some(end) => {
                        if last_end.is_none_or(|current| end > current) {
                            last_end = Some(end);
                        }
                    }
                }
            }

            if has_open {
                continue;
            }
            let Some(last_end) = last_end else {
                continue;
            };
            let Some(latest) = parse_timestamp(last_end) else {
                continue;
            };

            if latest < cutoff {
                inactive.push(InactiveMainProject {
                    main_project: project.main_project_name.clone(),
                    last_activity: last_end.to_string(),
                });
            }
        }
        inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, format_timestamp};
    use crate::store::ProjectStore;
    use jiff::civil::date;
    use tempfile::TempDir;

    fn now() -> DateTime {
        date(2025, 11, 24).at(12, 0, 0, 0)
    }

    fn ago(days: i64) -> String {
        format_timestamp(now().checked_sub(Span::new().days(days)).unwrap())
    }

    fn repo_with_fixture(dir: &TempDir) -> ProjectRepository {
        let store = ProjectStore::new(dir.path().join("data.json"));
        let mut repo = ProjectRepository::open(store).unwrap();

        // Recent activity, stopped a day ago
        repo.add_main_project("P1_Active").unwrap();
        repo.add_sub_project("P1_Active", "T1_Recent").unwrap();
        push(&mut repo, "P1_Active", "T1_Recent", ago(7), Some(ago(1)));

        // Stopped five weeks ago
        repo.add_main_project("P2_Inactive").unwrap();
        repo.add_sub_project("P2_Inactive", "T2_Old").unwrap();
        push(&mut repo, "P2_Inactive", "T2_Old", ago(36), Some(ago(35)));

        // Session still running
        repo.add_main_project("P3_Running").unwrap();
        repo.add_sub_project("P3_Running", "T3_Open").unwrap();
        push(&mut repo, "P3_Running", "T3_Open", ago(40), None);

        // No entries at all
        repo.add_main_project("P4_Empty").unwrap();
        repo.add_sub_project("P4_Empty", "T4_Untouched").unwrap();

        repo
    }

    fn push(
        repo: &mut ProjectRepository,
        main: &str,
        sub: &str,
        start: String,
        end: Option<String>,
    ) {
        if let Some(end) = end {
            repo.open_entry(main, sub, start).unwrap();
            repo.close_open_entry(&end);
        } else {
            repo.open_entry(main, sub, start).unwrap();
        }
    }

    #[test]
    fn test_inactive_sub_projects_at_four_weeks() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_fixture(&dir);
        let clock = FixedClock(now());
        let analyzer = InactivityAnalyzer::new(&repo, &clock);

        let inactive = analyzer.list_inactive_sub_projects(4);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].main_project, "P2_Inactive");
        assert_eq!(inactive[0].sub_project, "T2_Old");
        assert_eq!(inactive[0].last_activity, ago(35));

        assert!(analyzer.list_inactive_sub_projects(6).is_empty());
    }

    #[test]
    fn test_open_entry_excludes_sub_project_even_when_old() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_fixture(&dir);
        let clock = FixedClock(now());
        let analyzer = InactivityAnalyzer::new(&repo, &clock);

        // T3_Open started 40 days ago but is still running
        assert!(
            !analyzer
                .list_inactive_sub_projects(4)
                .iter()
                .any(|s| s.sub_project == "T3_Open")
        );
    }

    #[test]
    fn test_inactive_main_projects() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_fixture(&dir);
        let clock = FixedClock(now());
        let analyzer = InactivityAnalyzer::new(&repo, &clock);

        let inactive = analyzer.list_inactive_main_projects(4);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].main_project, "P2_Inactive");

        assert!(analyzer.list_inactive_main_projects(6).is_empty());
    }

    #[test]
    fn test_main_with_open_entry_is_active_regardless_of_age() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_fixture(&dir);
        let clock = FixedClock(now());
        let analyzer = InactivityAnalyzer::new(&repo, &clock);

        assert!(
            !analyzer
                .list_inactive_main_projects(1)
                .iter()
                .any(|m| m.main_project == "P3_Running")
        );
    }
}
