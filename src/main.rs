//! # daylist - date-bucketed to-do manager
//!
//! A local-first to-do manager with date-bucketed agenda views, sticky
//! notes and an optional terminal user interface (TUI).
//!
//! ## Key Features
//!
//! - **Date buckets**: tasks group into overdue / today / tomorrow /
//!   this week / next week / beyond, recomputed live from due dates
//! - **Lists and tags**: tasks file under one list and any number of tags,
//!   with active-task counts derived on every read
//! - **Sticky wall**: free-form pinned notes alongside the task lists
//! - **Search**: case-insensitive search across titles, descriptions,
//!   lists and tags, title matches ranked first
//! - **Two interfaces**: full CLI for scripting + interactive TUI with
//!   sidebar navigation, live search and a persisted dark mode
//! - **Local file storage**: one JSON file per state slice; a damaged
//!   slice falls back to seed data without taking the rest with it
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! daylist ui
//!
//! # Add a task via CLI
//! daylist add "Book dentist appointment" --list Personal --tag Health --due tomorrow
//!
//! # What's on today (and what slipped)
//! daylist agenda
//!
//! # Search everything
//! daylist search meeting
//! ```
//!
//! Data is stored locally in `~/.daylist`, one JSON file per slice. Point
//! `--data-dir` somewhere else to keep separate setups.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod note;
pub mod seed;
pub mod storage;
pub mod store;
pub mod task;
pub mod views;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod input;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use storage::Storage;
use store::Store;

fn main() {
    let cli = Cli::parse();

    // Completions need no store (and must not pollute stdout with
    // anything else).
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    let data_dir = cli.data_dir.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".daylist")
    });

    let storage = match Storage::open(&data_dir) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Failed to open data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
    };

    // File logging keeps diagnostics out of the TUI's screen. Logging is
    // best-effort; the app runs fine without it.
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|l| {
            l.log_to_file(
                flexi_logger::FileSpec::default()
                    .directory(data_dir.join("logs"))
                    .basename("daylist"),
            )
            .append()
            .start()
        })
        .map_err(|e| eprintln!("Logging disabled: {e}"))
        .ok();

    let mut store = Store::open(storage);

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),
        Commands::Ui => cmd_ui(&mut store),
        Commands::Add {
            title,
            desc,
            list,
            tags,
            due,
            priority,
        } => cmd_add(&mut store, title, desc, list, tags, due, priority),
        Commands::List {
            all,
            list,
            tag,
            priority,
            due,
            limit,
        } => cmd_list(&store, all, list, tag, priority, due, limit),
        Commands::Agenda => cmd_agenda(&store),
        Commands::View { id } => cmd_view(&store, id),
        Commands::Update {
            id,
            title,
            desc,
            list,
            due,
            priority,
            status,
            add_tags,
            rm_tags,
            clear_due,
        } => cmd_update(
            &mut store, id, title, desc, list, due, priority, status, add_tags, rm_tags, clear_due,
        ),
        Commands::Complete { id } => cmd_complete(&mut store, id),
        Commands::Reopen { id } => cmd_reopen(&mut store, id),
        Commands::Cancel { id } => cmd_cancel(&mut store, id),
        Commands::Delete { id } => cmd_delete(&mut store, id),
        Commands::Lists { action } => cmd_lists(&mut store, action),
        Commands::Tags { action } => cmd_tags(&mut store, action),
        Commands::Notes { action } => cmd_notes(&mut store, action),
        Commands::Search { query } => cmd_search(&store, query),
    }
}
