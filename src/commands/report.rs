use jiff::civil::Date;

use crate::clipboard;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::report::ReportEngine;
use crate::repository::ProjectRepository;
use crate::store::ProjectStore;

/// Print a report and hand it to the clipboard sink when enabled
fn emit_report(config: &Config, report: &str) {
    println!("{report}");
    if config.clipboard_enabled() && clipboard::copy_text(report) {
        eprintln!("(report copied to clipboard)");
    }
}

pub fn cmd_report_daily(date: Option<Date>) -> Result<()> {
    let config = Config::load()?;
    let repo = ProjectRepository::open(ProjectStore::new(config.data_path()))?;
    let clock = SystemClock;
    let date = date.unwrap_or_else(|| clock.now().date());

    let report = ReportEngine::new(&repo, &clock).generate_daily_report(date);
    emit_report(&config, &report);
    Ok(())
}

pub fn cmd_report_range(start: Date, end: Date) -> Result<()> {
    let config = Config::load()?;
    let repo = ProjectRepository::open(ProjectStore::new(config.data_path()))?;
    let clock = SystemClock;

    let report = ReportEngine::new(&repo, &clock).generate_date_range_report(start, end);
    emit_report(&config, &report);
    Ok(())
}

pub fn cmd_report_sub(main: &str, name: &str) -> Result<()> {
    let config = Config::load()?;
    let repo = ProjectRepository::open(ProjectStore::new(config.data_path()))?;
    let clock = SystemClock;

    let report = ReportEngine::new(&repo, &clock).generate_sub_project_report(main, name);
    emit_report(&config, &report);
    Ok(())
}

pub fn cmd_report_main(name: &str) -> Result<()> {
    let config = Config::load()?;
    let repo = ProjectRepository::open(ProjectStore::new(config.data_path()))?;
    let clock = SystemClock;

    let report = ReportEngine::new(&repo, &clock).generate_main_project_report(name);
    emit_report(&config, &report);
    Ok(())
}
