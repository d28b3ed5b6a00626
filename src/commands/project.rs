use owo_colors::OwoColorize;
use serde_json::json;

use super::{format_status, open_repository};
use crate::clock::SystemClock;
use crate::error::Result;
use crate::inactivity::InactivityAnalyzer;
use crate::types::StatusFilter;

pub fn cmd_main_add(name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.add_main_project(name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "created",
                "main_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Created main project {}", name.cyan());
    Ok(())
}

pub fn cmd_main_ls(filter: StatusFilter, output_json: bool) -> Result<()> {
    let repo = open_repository()?;
    let projects = repo.list_main_projects(filter);

    if output_json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    for p in &projects {
        println!("{} {}", format_status(p.status), p.main_project_name);
    }
    Ok(())
}

pub fn cmd_main_rename(name: &str, new_name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.rename_main_project(name, new_name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "renamed",
                "main_project": new_name,
                "previous_name": name,
            }))?
        );
        return Ok(());
    }
    println!("Renamed {} -> {}", name.cyan(), new_name.cyan());
    Ok(())
}

pub fn cmd_main_close(name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.close_main_project(name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "closed",
                "main_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Closed {}", name.cyan());
    Ok(())
}

pub fn cmd_main_reopen(name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.reopen_main_project(name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "reopened",
                "main_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Reopened {}", name.cyan());
    Ok(())
}

pub fn cmd_main_delete(name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.delete_main_project(name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "deleted",
                "main_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Deleted {} and all its time entries", name.cyan());
    Ok(())
}

pub fn cmd_main_inactive(weeks: u32, output_json: bool) -> Result<()> {
    let repo = open_repository()?;
    let clock = SystemClock;
    let inactive = InactivityAnalyzer::new(&repo, &clock).list_inactive_main_projects(weeks);

    if output_json {
        println!("{}", serde_json::to_string_pretty(&inactive)?);
        return Ok(());
    }

    if inactive.is_empty() {
        println!("No main projects inactive for {} weeks", weeks);
        return Ok(());
    }
    for p in &inactive {
        println!(
            "{} (last activity: {})",
            p.main_project.cyan(),
            p.last_activity
        );
    }
    Ok(())
}

pub fn cmd_main_completed(output_json: bool) -> Result<()> {
    let repo = open_repository()?;
    let completed = repo.list_completed_main_projects();

    if output_json {
        println!("{}", serde_json::to_string_pretty(&completed)?);
        return Ok(());
    }

    if completed.is_empty() {
        println!("No main projects have all sub-projects closed");
        return Ok(());
    }
    for p in &completed {
        println!("{} {}", format_status(p.status), p.main_project_name);
    }
    Ok(())
}

pub fn cmd_main_demote(name: &str, parent: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.demote_main_project(name, parent)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "demoted",
                "main_project": parent,
                "sub_project": name,
            }))?
        );
        return Ok(());
    }
    println!(
        "Demoted {} into {} as a sub-project",
        name.cyan(),
        parent.cyan()
    );
    Ok(())
}
