use owo_colors::OwoColorize;
use serde_json::json;

use super::open_repository;
use crate::clock::SystemClock;
use crate::error::Result;
use crate::session::SessionTracker;

/// Start a session on a sub-project, stopping any running one first
pub fn cmd_start(main: &str, sub: &str, output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    let clock = SystemClock;
    let mut tracker = SessionTracker::new(&mut repo, &clock);
    tracker.start_work(main, sub)?;

    if output_json {
        let start_time = tracker.get_current_work().map(|w| w.start_time);
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "started",
                "main_project": main,
                "sub_project": sub,
                "start_time": start_time,
            }))?
        );
        return Ok(());
    }

    println!("Started working on {} / {}", main.cyan(), sub.cyan());
    Ok(())
}

/// Stop the running session, if there is one
pub fn cmd_stop(output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    let clock = SystemClock;
    let was_running = SessionTracker::new(&mut repo, &clock).stop_work()?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "action": "stopped",
                "was_running": was_running,
            }))?
        );
        return Ok(());
    }

    if was_running {
        println!("Stopped the running session");
    } else {
        println!("No session is running");
    }
    Ok(())
}

/// Show the currently running session
pub fn cmd_current(output_json: bool) -> Result<()> {
    let mut repo = open_repository()?;
    let clock = SystemClock;
    let current = SessionTracker::new(&mut repo, &clock).get_current_work();

    if output_json {
        match current {
            Some(work) => println!("{}", serde_json::to_string_pretty(&work)?),
            None => println!("null"),
        }
        return Ok(());
    }

    match current {
        Some(work) => println!(
            "Working on {} / {} since {}",
            work.main_project_name.cyan(),
            work.sub_project_name.cyan(),
            work.start_time
        ),
        None => println!("No session is running"),
    }
    Ok(())
}
