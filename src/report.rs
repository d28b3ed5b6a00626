//! Aggregation of time entries into formatted Markdown reports.
//!
//! All durations are exact integer milliseconds; decimal rendering uses
//! round-half-away-from-zero on that integer representation, never binary
//! floats. Hours and the derived DLP unit (1 DLP = 40 hours) print with a
//! comma as the decimal separator, e.g. `8,000 hours (0,200 DLP)`.
//!
//! Entries with malformed timestamps are skipped individually; a bad
//! value never aborts a whole report.

use std::collections::BTreeMap;

use jiff::civil::{Date, DateTime};
use tabled::Table;
use tabled::settings::Style;

use crate::clock::Clock;
use crate::repository::ProjectRepository;
use crate::types::SubProject;

/// Milliseconds per milli-hour: hours*1000 = ms / 3600
const MS_PER_MILLI_HOUR: i64 = 3_600;
/// Milliseconds per milli-DLP: dlp*1000 = ms / 144000 (1 DLP = 40 hours)
const MS_PER_MILLI_DLP: i64 = 144_000;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Integer division rounding half away from zero
fn div_round_half_away(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    let q = n.abs() / d;
    let r = n.abs() % d;
    let rounded = if 2 * r >= d { q + 1 } else { q };
    if n < 0 { -rounded } else { rounded }
}

/// Render a milli-unit value with a comma decimal separator: 1500 -> "1,500"
fn comma3(milli: i64) -> String {
    let sign = if milli < 0 { "-" } else { "" };
    let milli = milli.abs();
    format!("{}{},{:03}", sign, milli / 1000, milli % 1000)
}

/// `"1,500 hours"` for 1.5 hours of milliseconds
pub fn format_hours(ms: i64) -> String {
    format!("{} hours", comma3(div_round_half_away(ms, MS_PER_MILLI_HOUR)))
}

/// `"1,500 hours (0,038 DLP)"` for 1.5 hours of milliseconds
pub fn format_duration(ms: i64) -> String {
    format!(
        "{} hours ({} DLP)",
        comma3(div_round_half_away(ms, MS_PER_MILLI_HOUR)),
        comma3(div_round_half_away(ms, MS_PER_MILLI_DLP))
    )
}

/// `"1:30:00"` clock-style duration, hours unpadded
fn format_clock(ms: i64) -> String {
    let total_secs = ms / 1000;
    format!(
        "{}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

/// Share of `part` in `total` as a percentage with one decimal
fn format_percent(part: i64, total: i64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    let tenths = div_round_half_away(part.saturating_mul(1000), total);
    format!("{}.{}%", tenths / 10, tenths % 10)
}

/// One parseable time entry, with its duration resolved against "now"
/// when the entry is still open
struct Session {
    start: DateTime,
    end: Option<DateTime>,
    ms: i64,
}

impl Session {
    fn date(&self) -> Date {
        self.start.date()
    }
}

#[derive(tabled::Tabled)]
struct WeekdayRow {
    #[tabled(rename = "Weekday")]
    weekday: &'static str,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(tabled::Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Sub-Project")]
    name: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Sessions")]
    sessions: usize,
    #[tabled(rename = "Share")]
    share: String,
}

pub struct ReportEngine<'a> {
    repo: &'a ProjectRepository,
    clock: &'a dyn Clock,
}

impl<'a> ReportEngine<'a> {
    pub fn new(repo: &'a ProjectRepository, clock: &'a dyn Clock) -> Self {
        ReportEngine { repo, clock }
    }

    /// Completed-entry milliseconds for entries starting on `date`
    fn completed_ms_on(&self, sub: &SubProject, date: Date) -> i64 {
        sub.time_entries
            .iter()
            .filter_map(|e| {
                let start = e.start()?;
                if start.date() != date {
                    return None;
                }
                let end = e.end()?;
                Some(end.duration_since(start).as_millis() as i64)
            })
            .sum()
    }

    /// Completed-entry milliseconds for entries starting within the range
    fn completed_ms_in(&self, sub: &SubProject, start_date: Date, end_date: Date) -> i64 {
        sub.time_entries
            .iter()
            .filter_map(|e| {
                let start = e.start()?;
                let date = start.date();
                if date < start_date || date > end_date {
                    return None;
                }
                let end = e.end()?;
                Some(end.duration_since(start).as_millis() as i64)
            })
            .sum()
    }

    /// All parseable entries of a sub-project; the open entry is measured
    /// against the clock
    fn collect_sessions(&self, sub: &SubProject) -> Vec<Session> {
        let now = self.clock.now();
        sub.time_entries
            .iter()
            .filter_map(|e| {
                let start = e.start()?;
                match &e.end_time {
                    Some(_) => {
                        let end = e.end()?;
                        Some(Session {
                            start,
                            end: Some(end),
                            ms: end.duration_since(start).as_millis() as i64,
                        })
                    }
                    None => Some(Session {
                        start,
                        end: None,
                        ms: now.duration_since(start).as_millis() as i64,
                    }),
                }
            })
            .collect()
    }

    /// Markdown report of completed time for a single day.
    ///
    /// Projects and sub-projects contributing zero time are omitted.
    pub fn generate_daily_report(&self, date: Date) -> String {
        let mut out = format!("# Daily Time Report: {}\n", date);
        let mut total = 0i64;

        for project in &self.repo.data().projects {
            let mut lines = Vec::new();
            let mut main_ms = 0i64;
            for sub in &project.sub_projects {
                let ms = self.completed_ms_on(sub, date);
                if ms > 0 {
                    lines.push(format!("- {}: {}", sub.sub_project_name, format_hours(ms)));
                    main_ms += ms;
                }
            }
            if main_ms > 0 {
                out.push_str(&format!(
                    "\n## {} ({})\n",
                    project.main_project_name,
                    format_hours(main_ms)
                ));
                for line in lines {
                    out.push_str(&line);
                    out.push('\n');
                }
                total += main_ms;
            }
        }

        out.push_str(&format!("\n**Total Daily Time: {}**\n", format_hours(total)));
        out
    }

    /// Markdown report over an inclusive date range; durations carry the
    /// DLP unit
    pub fn generate_date_range_report(&self, start: Date, end: Date) -> String {
        let mut out = format!("# Time Report: {} to {}\n", start, end);
        let mut total = 0i64;

        for project in &self.repo.data().projects {
            let mut lines = Vec::new();
            let mut main_ms = 0i64;
            for sub in &project.sub_projects {
                let ms = self.completed_ms_in(sub, start, end);
                if ms > 0 {
                    lines.push(format!(
                        "- {}: {}",
                        sub.sub_project_name,
                        format_duration(ms)
                    ));
                    main_ms += ms;
                }
            }
            if main_ms > 0 {
                out.push_str(&format!(
                    "\n## {} ({})\n",
                    project.main_project_name,
                    format_duration(main_ms)
                ));
                for line in lines {
                    out.push_str(&line);
                    out.push('\n');
                }
                total += main_ms;
            }
        }

        out.push_str(&format!(
            "\n**Total Time in Period: {}**\n",
            format_duration(total)
        ));
        out
    }

    /// Detailed statistics for one sub-project: totals, weekday
    /// distribution, and a day-by-day session breakdown
    pub fn generate_sub_project_report(&self, main: &str, sub: &str) -> String {
        let Some(project) = self.repo.data().main(main) else {
            return format!("Main project '{}' not found.", main);
        };
        let Some(target) = project.sub(sub) else {
            return format!("Sub-project '{}' not found in '{}'.", sub, main);
        };

        let sessions = self.collect_sessions(target);
        if sessions.is_empty() {
            return format!("No time entries recorded for '{} / {}'.", main, sub);
        }

        let total: i64 = sessions.iter().map(|s| s.ms).sum();
        let mut out = format!("# Sub-Project Report: {} / {}\n\n", main, sub);
        out.push_str(&stats_block(total, &sessions));
        out.push_str("\n## Weekday Distribution\n\n");
        out.push_str(&weekday_table(&sessions, total));
        out.push_str("\n\n## Daily Breakdown\n");
        out.push_str(&daily_breakdown(&sessions));
        out
    }

    /// Detailed statistics for a whole main project, including a
    /// per-sub-project breakdown table sorted by time descending
    pub fn generate_main_project_report(&self, main: &str) -> String {
        let Some(project) = self.repo.data().main(main) else {
            return format!("Main project '{}' not found.", main);
        };

        let per_sub: Vec<(String, Vec<Session>)> = project
            .sub_projects
            .iter()
            .map(|s| (s.sub_project_name.clone(), self.collect_sessions(s)))
            .filter(|(_, sessions)| !sessions.is_empty())
            .collect();

        if per_sub.is_empty() {
            return format!("No time entries recorded for '{}'.", main);
        }

        let all: Vec<&Session> = per_sub.iter().flat_map(|(_, s)| s).collect();
        let total: i64 = all.iter().map(|s| s.ms).sum();

        let mut totals: Vec<(&String, &Vec<Session>, i64)> = per_sub
            .iter()
            .map(|(name, sessions)| {
                let sub_total: i64 = sessions.iter().map(|s| s.ms).sum();
                (name, sessions, sub_total)
            })
            .collect();
        totals.sort_by(|a, b| b.2.cmp(&a.2));
        let rows: Vec<BreakdownRow> = totals
            .into_iter()
            .map(|(name, sessions, sub_total)| BreakdownRow {
                name: name.clone(),
                time: format_duration(sub_total),
                sessions: sessions.len(),
                share: format_percent(sub_total, total),
            })
            .collect();

        let sessions: Vec<Session> = per_sub.into_iter().flat_map(|(_, s)| s).collect();
        let mut out = format!("# Main-Project Report: {}\n\n", main);
        out.push_str(&stats_block(total, &sessions));
        out.push_str("\n## Sub-Project Breakdown\n\n");
        out.push_str(&Table::new(rows).with(Style::markdown()).to_string());
        out.push_str("\n\n## Weekday Distribution\n\n");
        out.push_str(&weekday_table(&sessions, total));
        out.push('\n');
        out
    }
}

fn stats_block(total: i64, sessions: &[Session]) -> String {
    let average = total / sessions.len() as i64;
    format!(
        "**Total Time:** {}\n**Sessions:** {}\n**Average Session:** {}\n",
        format_duration(total),
        sessions.len(),
        format_clock(average)
    )
}

fn weekday_table(sessions: &[Session], total: i64) -> String {
    let mut per_day = [0i64; 7];
    for session in sessions {
        per_day[session.start.weekday().to_monday_zero_offset() as usize] += session.ms;
    }
    let rows: Vec<WeekdayRow> = WEEKDAYS
        .iter()
        .zip(per_day)
        .map(|(weekday, ms)| WeekdayRow {
            weekday,
            share: format_percent(ms, total),
        })
        .collect();
    Table::new(rows).with(Style::markdown()).to_string()
}

fn daily_breakdown(sessions: &[Session]) -> String {
    let mut by_date: BTreeMap<Date, Vec<&Session>> = BTreeMap::new();
    for session in sessions {
        by_date.entry(session.date()).or_default().push(session);
    }

    let mut out = String::new();
    for (date, day_sessions) in by_date {
        out.push_str(&format!("\n### {}\n", date));
        for session in day_sessions {
            let end = match session.end {
                Some(end) => end.strftime("%H:%M:%S").to_string(),
                None => "now".to_string(),
            };
            out.push_str(&format!(
                "- {} - {} ({})\n",
                session.start.strftime("%H:%M:%S"),
                end,
                format_clock(session.ms)
            ));
        }
    }
    out
}
