use clap::Parser;
use std::process::ExitCode;

use tempo::cli::{Cli, Commands, ConfigAction, MainAction, ReportAction, SubAction, generate_completions};
use tempo::commands::{
    cmd_config_get, cmd_config_set, cmd_config_show, cmd_current, cmd_main_add, cmd_main_close,
    cmd_main_completed, cmd_main_delete, cmd_main_demote, cmd_main_inactive, cmd_main_ls,
    cmd_main_rename, cmd_main_reopen, cmd_report_daily, cmd_report_main, cmd_report_range,
    cmd_report_sub, cmd_start, cmd_stop, cmd_sub_add, cmd_sub_close, cmd_sub_closed,
    cmd_sub_delete, cmd_sub_inactive, cmd_sub_ls, cmd_sub_move, cmd_sub_promote,
    cmd_sub_prune_closed, cmd_sub_rename, cmd_sub_reopen,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start { main, sub, json } => cmd_start(&main, &sub, json),
        Commands::Stop { json } => cmd_stop(json),
        Commands::Current { json } => cmd_current(json),

        Commands::Main { action } => match action {
            MainAction::Add { name, json } => cmd_main_add(&name, json),
            MainAction::Ls { status, json } => cmd_main_ls(status, json),
            MainAction::Rename {
                name,
                new_name,
                json,
            } => cmd_main_rename(&name, &new_name, json),
            MainAction::Close { name, json } => cmd_main_close(&name, json),
            MainAction::Reopen { name, json } => cmd_main_reopen(&name, json),
            MainAction::Delete { name, json } => cmd_main_delete(&name, json),
            MainAction::Inactive { weeks, json } => cmd_main_inactive(weeks, json),
            MainAction::Completed { json } => cmd_main_completed(json),
            MainAction::Demote { name, parent, json } => cmd_main_demote(&name, &parent, json),
        },

        Commands::Sub { action } => match action {
            SubAction::Add { main, name, json } => cmd_sub_add(&main, &name, json),
            SubAction::Ls { main, status, json } => cmd_sub_ls(main.as_deref(), status, json),
            SubAction::Rename {
                main,
                name,
                new_name,
                json,
            } => cmd_sub_rename(&main, &name, &new_name, json),
            SubAction::Close { main, name, json } => cmd_sub_close(&main, &name, json),
            SubAction::Reopen { main, name, json } => cmd_sub_reopen(&main, &name, json),
            SubAction::Delete { main, name, json } => cmd_sub_delete(&main, &name, json),
            SubAction::Move {
                main,
                name,
                dest,
                json,
            } => cmd_sub_move(&main, &name, &dest, json),
            SubAction::Promote { main, name, json } => cmd_sub_promote(&main, &name, json),
            SubAction::Inactive { weeks, json } => cmd_sub_inactive(weeks, json),
            SubAction::Closed { json } => cmd_sub_closed(json),
            SubAction::PruneClosed { json } => cmd_sub_prune_closed(json),
        },

        Commands::Report { action } => match action {
            ReportAction::Daily { date } => cmd_report_daily(date),
            ReportAction::Range { start, end } => cmd_report_range(start, end),
            ReportAction::Sub { main, name } => cmd_report_sub(&main, &name),
            ReportAction::Main { name } => cmd_report_main(&name),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(json),
            ConfigAction::Get { key } => cmd_config_get(&key),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
        },

        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
