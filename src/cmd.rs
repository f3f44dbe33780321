//! Command implementations for the CLI interface.
//!
//! This module contains all the command handlers that implement the
//! subcommands available in the CLI, from task CRUD through agenda views,
//! list/tag/note management and search.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use chrono::{TimeZone, Utc};

use crate::fields::{format_priority, format_status, DueBucket, Priority, Status};
use crate::note::NotePatch;
use crate::seed::{DEFAULT_LIST_COLOR, DEFAULT_NOTE_COLOR, DEFAULT_TAG_COLOR};
use crate::store::Store;
use crate::task::{NewTask, Task, TaskPatch};
use crate::tui::run::run_tui;
use crate::views;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// List to file the task under (defaults to "Personal").
        #[arg(long)]
        list: Option<String>,
        /// Tag name. May be repeated.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd", or a weekday.
        #[arg(long)]
        due: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },

    /// List tasks with optional filters.
    List {
        /// Include completed, closed and cancelled tasks.
        #[arg(long)]
        all: bool,
        /// Filter by list name.
        #[arg(long)]
        list: Option<String>,
        /// Filter by tag name.
        #[arg(long)]
        tag: Option<String>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Date bucket: overdue | today | tomorrow | this-week | next-week
        /// | beyond | upcoming | none.
        #[arg(long, value_enum)]
        due: Option<DueBucket>,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the agenda: overdue, today and all upcoming buckets.
    Agenda,

    /// View a single task by ID.
    View {
        /// Task ID to view.
        id: u64,
    },

    /// Update fields on a task.
    Update {
        /// Task ID to update.
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        list: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Add a tag. May be repeated.
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,
        /// Remove a tag. May be repeated.
        #[arg(long = "rm-tag")]
        rm_tags: Vec<String>,
        /// Clear the due date.
        #[arg(long)]
        clear_due: bool,
    },

    /// Mark a task done (status closed).
    Complete {
        /// Task ID to complete.
        id: u64,
    },

    /// Reopen a closed or cancelled task.
    Reopen {
        /// Task ID to reopen.
        id: u64,
    },

    /// Cancel a task without deleting it.
    Cancel {
        /// Task ID to cancel.
        id: u64,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID to delete.
        id: u64,
    },

    /// Show task lists, or manage them.
    Lists {
        #[command(subcommand)]
        action: Option<ListsAction>,
    },

    /// Show tags, or manage them.
    Tags {
        #[command(subcommand)]
        action: Option<TagsAction>,
    },

    /// Show sticky notes, or manage them.
    Notes {
        #[command(subcommand)]
        action: Option<NotesAction>,
    },

    /// Search active tasks by title, description, list or tag.
    Search {
        /// Search query.
        query: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ListsAction {
    /// Create a new list.
    Add {
        /// List name (must be unique).
        name: String,
        /// Hex color, e.g. "#3B82F6".
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a list; its tasks move to "Personal".
    Rm {
        /// List ID to delete.
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum TagsAction {
    /// Create a new tag.
    Add {
        /// Tag name (must be unique).
        name: String,
        /// Hex color, e.g. "#DC2626".
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a tag; it is pruned from every task.
    Rm {
        /// Tag ID to delete.
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum NotesAction {
    /// Add a sticky note.
    Add {
        /// Note title.
        title: String,
        /// Note body.
        #[arg(long, default_value = "")]
        content: String,
        /// Hex color, e.g. "#FEF08A".
        #[arg(long)]
        color: Option<String>,
    },
    /// Edit a sticky note.
    Edit {
        /// Note ID to edit.
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Toggle a note's pinned state.
    Pin {
        /// Note ID to pin or unpin.
        id: u64,
    },
    /// Delete a sticky note.
    Rm {
        /// Note ID to delete.
        id: u64,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(store: &mut Store) {
    if let Err(e) = run_tui(store) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the store.
pub fn cmd_add(
    store: &mut Store,
    title: String,
    desc: Option<String>,
    list: Option<String>,
    tags: Vec<String>,
    due: Option<String>,
    priority: Option<Priority>,
) {
    if let Some(ref name) = list {
        if !store.lists().iter().any(|l| &l.name == name) {
            eprintln!("No list named '{name}'. Create it with `daylist lists add`.");
            std::process::exit(1);
        }
    }
    for tag in &tags {
        if !store.has_tag(tag) {
            eprintln!("note: tag '{tag}' does not exist yet (create it with `daylist tags add`)");
        }
    }
    let due_date = due.map(|ds| match views::parse_due_input(&ds) {
        Some(d) => d,
        None => {
            eprintln!("Unrecognised due date. Use YYYY-MM-DD, 'today', 'tomorrow', 'in Nd', or a weekday.");
            std::process::exit(1);
        }
    });
    let id = store.add_task(NewTask {
        title,
        description: desc,
        list,
        tags,
        due_date,
        priority,
    });
    println!("Added task {id}");
}

/// List tasks with optional filters.
pub fn cmd_list(
    store: &Store,
    all: bool,
    list: Option<String>,
    tag: Option<String>,
    priority: Option<Priority>,
    due: Option<DueBucket>,
    limit: Option<usize>,
) {
    let today = views::today();
    let mut rows: Vec<&Task> = match due {
        Some(bucket) => views::by_bucket(store.tasks(), bucket, today),
        None => store.tasks().iter().collect(),
    };
    if !all {
        rows.retain(|t| views::is_active(t));
    }
    if let Some(ref name) = list {
        rows.retain(|t| &t.list == name);
    }
    if let Some(ref name) = tag {
        rows.retain(|t| t.tags.iter().any(|tg| tg == name));
    }
    if let Some(p) = priority {
        rows.retain(|t| t.priority == p);
    }
    // Buckets come pre-ordered; otherwise sort by due date.
    if due.is_none() {
        rows.sort_by_key(|t| t.due_date.map(views::normalise_date).unwrap_or(chrono::NaiveDate::MAX));
    }
    if let Some(n) = limit {
        rows.truncate(n);
    }
    print_task_table(&rows);
}

/// Print the agenda: every date bucket with its tasks, skipping empty ones.
pub fn cmd_agenda(store: &Store) {
    let today = views::today();
    let tasks = store.tasks();
    let sections: [(&str, Vec<&Task>); 6] = [
        ("Overdue", views::overdue(tasks, today)),
        ("Today", views::due_today(tasks, today)),
        ("Tomorrow", views::due_tomorrow(tasks, today)),
        ("This Week", views::due_this_week(tasks, today)),
        ("Next Week", views::due_next_week(tasks, today)),
        ("Beyond Next Week", views::due_beyond_next_week(tasks, today)),
    ];
    let mut printed_any = false;
    for (heading, rows) in sections {
        if rows.is_empty() {
            continue;
        }
        if printed_any {
            println!();
        }
        println!("{heading} ({})", rows.len());
        print_task_table(&rows);
        printed_any = true;
    }
    if !printed_any {
        println!("Nothing scheduled.");
    }
}

/// View detailed information about a specific task.
pub fn cmd_view(store: &Store, id: u64) {
    let Some(task) = store.get_task(id) else {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    };
    let today = views::today();
    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Status:       {}", format_status(task.status));
    println!("Priority:     {}", format_priority(task.priority));
    println!("List:         {}", task.list);
    println!(
        "Due:          {}",
        match task.due_date {
            Some(d) => format!("{d} ({})", views::format_due_relative(Some(d), today)),
            None => "-".into(),
        }
    );
    println!(
        "Tags:         {}",
        if task.tags.is_empty() {
            "-".into()
        } else {
            task.tags.join(",")
        }
    );
    println!(
        "Created UTC:  {}",
        Utc.timestamp_opt(task.created_at_utc, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "Description:\n{}\n",
        task.description.as_deref().unwrap_or("-")
    );
}

/// Update an existing task's fields.
#[allow(clippy::too_many_arguments)]
pub fn cmd_update(
    store: &mut Store,
    id: u64,
    title: Option<String>,
    desc: Option<String>,
    list: Option<String>,
    due: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    add_tags: Vec<String>,
    rm_tags: Vec<String>,
    clear_due: bool,
) {
    let Some(current) = store.get_task(id) else {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    };

    if let Some(ref name) = list {
        if !store.lists().iter().any(|l| &l.name == name) {
            eprintln!("No list named '{name}'. Create it with `daylist lists add`.");
            std::process::exit(1);
        }
    }

    let mut due_patch = None;
    if clear_due {
        due_patch = Some(None);
    }
    if let Some(ds) = due {
        match views::parse_due_input(&ds) {
            Some(d) => due_patch = Some(Some(d)),
            None => {
                eprintln!("Unrecognised due date. Use YYYY-MM-DD, 'today', 'tomorrow', 'in Nd', or a weekday.");
                std::process::exit(1);
            }
        }
    }

    let tags_patch = if add_tags.is_empty() && rm_tags.is_empty() {
        None
    } else {
        let mut tags = current.tags.clone();
        for tag in add_tags {
            if !store.has_tag(&tag) {
                eprintln!("note: tag '{tag}' does not exist yet (create it with `daylist tags add`)");
            }
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags.retain(|t| !rm_tags.contains(t));
        Some(tags)
    };

    store.update_task(
        id,
        TaskPatch {
            title,
            description: desc.map(|d| if d.is_empty() { None } else { Some(d) }),
            list,
            tags: tags_patch,
            due_date: due_patch,
            status,
            priority,
            completed: None,
        },
    );
    println!("Updated task {id}");
}

/// Mark a task done: status closed, legacy completion flag set.
pub fn cmd_complete(store: &mut Store, id: u64) {
    let done = store.update_task(
        id,
        TaskPatch {
            status: Some(Status::Closed),
            completed: Some(true),
            ..TaskPatch::default()
        },
    );
    if !done {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    }
    println!("Completed task {id}");
}

/// Reopen a closed or cancelled task.
pub fn cmd_reopen(store: &mut Store, id: u64) {
    let done = store.update_task(
        id,
        TaskPatch {
            status: Some(Status::New),
            completed: Some(false),
            ..TaskPatch::default()
        },
    );
    if !done {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    }
    println!("Reopened task {id}");
}

/// Cancel a task, keeping it around for the record.
pub fn cmd_cancel(store: &mut Store, id: u64) {
    let done = store.update_task(
        id,
        TaskPatch {
            status: Some(Status::Cancelled),
            ..TaskPatch::default()
        },
    );
    if !done {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    }
    println!("Cancelled task {id}");
}

/// Delete a task.
pub fn cmd_delete(store: &mut Store, id: u64) {
    if !store.delete_task(id) {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    }
    println!("Deleted task {id}");
}

/// Show or manage task lists.
pub fn cmd_lists(store: &mut Store, action: Option<ListsAction>) {
    match action {
        None => {
            println!("{:<5} {:<16} {:<9} {}", "ID", "Name", "Color", "Active");
            for list in store.lists() {
                println!(
                    "{:<5} {:<16} {:<9} {}",
                    list.id,
                    truncate(&list.name, 16),
                    list.color,
                    list.count
                );
            }
        }
        Some(ListsAction::Add { name, color }) => {
            let color = color.unwrap_or_else(|| DEFAULT_LIST_COLOR.to_string());
            match store.add_list(&name, &color) {
                Ok(id) => println!("Added list {id} ('{name}')"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(ListsAction::Rm { id }) => {
            // The store has no last-list guard; the collaborators do.
            if store.lists().len() <= 1 {
                eprintln!("Cannot delete the last remaining list.");
                std::process::exit(1);
            }
            let Some(name) = store.get_list(id).map(|l| l.name.clone()) else {
                eprintln!("List {id} not found.");
                std::process::exit(1);
            };
            store.delete_list(id);
            println!("Deleted list '{name}'; its tasks moved to 'Personal'.");
        }
    }
}

/// Show or manage tags.
pub fn cmd_tags(store: &mut Store, action: Option<TagsAction>) {
    match action {
        None => {
            println!("{:<5} {:<16} {:<9} {}", "ID", "Name", "Color", "Active");
            for tag in store.tags() {
                println!(
                    "{:<5} {:<16} {:<9} {}",
                    tag.id,
                    truncate(&tag.name, 16),
                    tag.color,
                    tag.count
                );
            }
        }
        Some(TagsAction::Add { name, color }) => {
            let color = color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
            match store.add_tag(&name, &color) {
                Ok(id) => println!("Added tag {id} ('{name}')"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(TagsAction::Rm { id }) => {
            let Some(name) = store.get_tag(id).map(|t| t.name.clone()) else {
                eprintln!("Tag {id} not found.");
                std::process::exit(1);
            };
            store.delete_tag(id);
            println!("Deleted tag '{name}' and removed it from all tasks.");
        }
    }
}

/// Show or manage sticky notes.
pub fn cmd_notes(store: &mut Store, action: Option<NotesAction>) {
    match action {
        None => {
            for note in store.sticky_notes() {
                let pin = if note.pinned { " [pinned]" } else { "" };
                println!("#{} {}{}", note.id, note.title, pin);
                for line in note.content.lines() {
                    println!("    {line}");
                }
                println!();
            }
        }
        Some(NotesAction::Add {
            title,
            content,
            color,
        }) => {
            let color = color.unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_string());
            let id = store.add_sticky_note(&title, &content, &color);
            println!("Added note {id}");
        }
        Some(NotesAction::Edit {
            id,
            title,
            content,
            color,
        }) => {
            let done = store.update_sticky_note(
                id,
                NotePatch {
                    title,
                    content,
                    color,
                    pinned: None,
                },
            );
            if !done {
                eprintln!("Note {id} not found.");
                std::process::exit(1);
            }
            println!("Updated note {id}");
        }
        Some(NotesAction::Pin { id }) => {
            let Some(pinned) = store.get_sticky_note(id).map(|n| n.pinned) else {
                eprintln!("Note {id} not found.");
                std::process::exit(1);
            };
            store.update_sticky_note(
                id,
                NotePatch {
                    pinned: Some(!pinned),
                    ..NotePatch::default()
                },
            );
            println!("{} note {id}", if pinned { "Unpinned" } else { "Pinned" });
        }
        Some(NotesAction::Rm { id }) => {
            if !store.delete_sticky_note(id) {
                eprintln!("Note {id} not found.");
                std::process::exit(1);
            }
            println!("Deleted note {id}");
        }
    }
}

/// Search active tasks and print the ranked results.
pub fn cmd_search(store: &Store, query: String) {
    let hits = store.search_tasks(&query);
    if hits.is_empty() {
        println!("No matches.");
        return;
    }
    let refs: Vec<&Task> = hits.iter().collect();
    print_task_table(&refs);
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Print tasks in a formatted table.
pub fn print_task_table(tasks: &[&Task]) {
    println!(
        "{:<5} {:<12} {:<8} {:<10} {:<14} {}",
        "ID", "Status", "Pri", "Due", "List", "Title [tags]"
    );
    let today = views::today();
    for t in tasks {
        let tags = if t.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.tags.join(","))
        };
        let due = views::format_due_relative(t.due_date, today);
        println!(
            "{:<5} {:<12} {:<8} {:<10} {:<14} {}{}",
            t.id,
            format_status(t.status),
            format_priority(t.priority),
            due,
            truncate(&t.list, 14),
            t.title,
            tags
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long list name", 8), "a very …");
    }
}
