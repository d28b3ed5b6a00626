mod config;
mod project;
mod report;
mod sub;
mod work;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use project::{
    cmd_main_add, cmd_main_close, cmd_main_completed, cmd_main_delete, cmd_main_demote,
    cmd_main_inactive, cmd_main_ls, cmd_main_rename, cmd_main_reopen,
};
pub use report::{cmd_report_daily, cmd_report_main, cmd_report_range, cmd_report_sub};
pub use sub::{
    cmd_sub_add, cmd_sub_close, cmd_sub_closed, cmd_sub_delete, cmd_sub_inactive, cmd_sub_ls,
    cmd_sub_move, cmd_sub_promote, cmd_sub_prune_closed, cmd_sub_rename, cmd_sub_reopen,
};
pub use work::{cmd_current, cmd_start, cmd_stop};

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::error::Result;
use crate::repository::ProjectRepository;
use crate::store::ProjectStore;
use crate::types::ProjectStatus;

/// Open the repository at the configured data path
fn open_repository() -> Result<ProjectRepository> {
    let config = Config::load()?;
    ProjectRepository::open(ProjectStore::new(config.data_path()))
}

/// Format a status tag for list display
fn format_status(status: ProjectStatus) -> String {
    let tag = format!("[{}]", status);
    match status {
        ProjectStatus::Open => tag.yellow().to_string(),
        ProjectStatus::Closed => tag.green().to_string(),
    }
}
