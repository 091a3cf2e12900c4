mod commands;
mod core;
mod record;

use crate::core::error::{KeepError, print_error};
use crate::record::BumpLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keep a release metadata record in sync with your git history
#[derive(Parser)]
#[command(name = "relkeep")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct KeepCli {
  /// Path to the release record file (overrides relkeep.toml)
  #[arg(long, global = true, value_name = "PATH")]
  record: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bump the version, derive the build number, stamp today's date
  Bump {
    /// Version component to bump
    #[arg(value_enum, default_value = "patch")]
    level: BumpLevel,
    /// Explicit build number (default: commit count from git history)
    #[arg(long)]
    build: Option<u64>,
    /// Note recorded on the new milestone (repeatable)
    #[arg(long = "feature", value_name = "TEXT")]
    features: Vec<String>,
    /// Output the updated record in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Set the release date to today's calendar date
  SyncToday,

  /// Set the release date to the date of the latest commit
  SyncLastCommit,

  /// Rewrite the release date AND every milestone date to today (destructive)
  RewriteAllDates,

  /// Post-commit hook entry point (same behavior as sync-last-commit)
  PostCommitHook,

  /// Show the current release record
  Show {
    /// Output the record in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let KeepCli { record, command } = KeepCli::parse();

  let result = match command {
    Commands::Bump {
      level,
      build,
      features,
      json,
    } => commands::run_bump(record, level, build, features, json),
    Commands::SyncToday => commands::run_sync_today(record),
    Commands::SyncLastCommit | Commands::PostCommitHook => commands::run_sync_last_commit(record),
    Commands::RewriteAllDates => commands::run_rewrite_all_dates(record),
    Commands::Show { json } => commands::run_show(record, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: KeepError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
