use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use jiff::civil::Date;
use std::io;
use std::str::FromStr;

use crate::types::{StatusFilter, VALID_FILTERS};

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "Plain-text time tracking")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start working on a sub-project (stops any running session first)
    Start {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project name
        #[arg(value_parser = parse_project_name)]
        sub: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Stop the running session
    Stop {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what is currently being worked on
    Current {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage main projects
    Main {
        #[command(subcommand)]
        action: MainAction,
    },

    /// Manage sub-projects
    Sub {
        #[command(subcommand)]
        action: SubAction,
    },

    /// Generate time reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum MainAction {
    /// Create a main project
    Add {
        /// Project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List main projects
    #[command(visible_alias = "l")]
    Ls {
        /// Filter by status: open, closed, all (default: open)
        #[arg(long, default_value = "open", value_parser = parse_status_filter)]
        status: StatusFilter,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a main project
    Rename {
        /// Current name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// New name
        #[arg(value_parser = parse_project_name)]
        new_name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a main project as closed
    Close {
        /// Project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reopen a closed main project
    Reopen {
        /// Project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a main project and all its data
    Delete {
        /// Project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List main projects whose newest completed entry is older than a cutoff
    Inactive {
        /// Inactivity cutoff in weeks
        #[arg(long, default_value = "4")]
        weeks: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List main projects where every sub-project is closed
    Completed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Demote a main project into a sub-project of another
    Demote {
        /// Project to demote
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Main project to demote into
        #[arg(value_parser = parse_project_name)]
        parent: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum SubAction {
    /// Create a sub-project under a main project
    Add {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List sub-projects
    #[command(visible_alias = "l")]
    Ls {
        /// Restrict to one main project
        #[arg(long)]
        main: Option<String>,

        /// Filter by status: open, closed, all (default: open)
        #[arg(long, default_value = "open", value_parser = parse_status_filter)]
        status: StatusFilter,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a sub-project
    Rename {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Current sub-project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// New name
        #[arg(value_parser = parse_project_name)]
        new_name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a sub-project as closed
    Close {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reopen a closed sub-project
    Reopen {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a sub-project and its time entries
    Delete {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project name
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a sub-project to a different main project
    Move {
        /// Current main project
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project to move
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Destination main project
        #[arg(value_parser = parse_project_name)]
        dest: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Promote a sub-project to a main project of its own
    Promote {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project to promote
        #[arg(value_parser = parse_project_name)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List sub-projects with no recent activity
    Inactive {
        /// Inactivity cutoff in weeks
        #[arg(long, default_value = "4")]
        weeks: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all closed sub-projects
    Closed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete every closed sub-project
    PruneClosed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Completed time for one day, grouped by project
    Daily {
        /// Day to report on (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },

    /// Completed time over an inclusive date range
    Range {
        /// Range start (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        start: Date,

        /// Range end (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        end: Date,
    },

    /// Detailed statistics for one sub-project
    Sub {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        main: String,

        /// Sub-project name
        #[arg(value_parser = parse_project_name)]
        name: String,
    },

    /// Detailed statistics for a whole main project
    Main {
        /// Main project name
        #[arg(value_parser = parse_project_name)]
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (data_path, clipboard.enabled)
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (data_path, clipboard.enabled)
        key: String,
        /// Value to set
        value: String,
    },
}

fn parse_project_name(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }
    Ok(s.to_string())
}

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::from_str(s).map_err(|_| {
        format!(
            "Invalid status filter. Must be one of: {}",
            VALID_FILTERS.join(", ")
        )
    })
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::from_str(s).map_err(|_| format!("Invalid date '{s}'. Expected YYYY-MM-DD"))
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "tempo", &mut io::stdout());
}
