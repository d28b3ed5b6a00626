use owo_colors::OwoColorize;
use serde_json::json;

use super::{format_status, open_repository};
use crate::clock::SystemClock;
use crate::error::Result;
use crate::inactivity::InactivityAnalyzer;
use crate::repository::PROMOTED_SUB_NAME;
use crate::types::StatusFilter;

pub fn cmd_sub_add(main: &str, name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.add_sub_project(main, name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "created",
                "main_project": main,
                "sub_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Created sub-project {} under {}", name.cyan(), main.cyan());
    Ok(())
}

pub fn cmd_sub_ls(main: Option<&str>, filter: StatusFilter, output_json: bool) -> Result<()> {
    let repo = open_repository()?;
    let subs = repo.list_sub_projects(main, filter)?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&subs)?);
        return Ok(());
    }

    for s in &subs {
        println!(
            "{} {} / {}",
            format_status(s.status),
            s.main_project_name,
            s.sub_project_name
        );
    }
    Ok(())
}

pub fn cmd_sub_rename(main: &str, name: &str, new_name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.rename_sub_project(main, name, new_name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "renamed",
                "main_project": main,
                "sub_project": new_name,
                "previous_name": name,
            }))?
        );
        return Ok(());
    }
    println!("Renamed {} -> {}", name.cyan(), new_name.cyan());
    Ok(())
}

pub fn cmd_sub_close(main: &str, name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.close_sub_project(main, name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "closed",
                "main_project": main,
                "sub_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Closed {} / {}", main.cyan(), name.cyan());
    Ok(())
}

pub fn cmd_sub_reopen(main: &str, name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.reopen_sub_project(main, name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "reopened",
                "main_project": main,
                "sub_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Reopened {} / {}", main.cyan(), name.cyan());
    Ok(())
}

pub fn cmd_sub_delete(main: &str, name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.delete_sub_project(main, name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "deleted",
                "main_project": main,
                "sub_project": name,
            }))?
        );
        return Ok(());
    }
    println!("Deleted {} / {} and its time entries", main.cyan(), name.cyan());
    Ok(())
}

pub fn cmd_sub_move(main: &str, name: &str, dest: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.move_sub_project(main, name, dest)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "moved",
                "sub_project": name,
                "from": main,
                "to": dest,
            }))?
        );
        return Ok(());
    }
    println!("Moved {} from {} to {}", name.cyan(), main.cyan(), dest.cyan());
    Ok(())
}

pub fn cmd_sub_promote(main: &str, name: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    repo.promote_sub_project(main, name)?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "promoted",
                "main_project": name,
                "sub_project": PROMOTED_SUB_NAME,
                "previous_main": main,
            }))?
        );
        return Ok(());
    }
    println!(
        "Promoted {} to a main project (entries moved to {})",
        name.cyan(),
        PROMOTED_SUB_NAME.cyan()
    );
    Ok(())
}

pub fn cmd_sub_inactive(weeks: u32, output_json: bool) -> Result<()> {
    let repo = open_repository()?;
    let clock = SystemClock;
    let inactive = InactivityAnalyzer::new(&repo, &clock).list_inactive_sub_projects(weeks);

    if output_json {
        println!("{}", serde_json::to_string_pretty(&inactive)?);
        return Ok(());
    }

    if inactive.is_empty() {
        println!("No sub-projects inactive for {} weeks", weeks);
        return Ok(());
    }
    for s in &inactive {
        println!(
            "{} / {} (last activity: {})",
            s.main_project.cyan(),
            s.sub_project.cyan(),
            s.last_activity
        );
    }
    Ok(())
}

pub fn cmd_sub_closed(output_json: bool) -> Result<()> {
    let repo = open_repository()?;
    let closed = repo.list_sub_projects(None, StatusFilter::Closed)?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&closed)?);
        return Ok(());
    }

    for s in &closed {
        println!("{} / {}", s.main_project_name, s.sub_project_name);
    }
    Ok(())
}

pub fn cmd_sub_prune_closed(output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    let removed = repo.delete_all_closed_sub_projects()?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "pruned",
                "removed": removed,
            }))?
        );
        return Ok(());
    }

    if removed == 0 {
        println!("No closed sub-projects to delete");
    } else {
        println!("Deleted {} closed sub-project(s)", removed);
    }
    Ok(())
}
