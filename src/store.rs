//! The state container: single source of truth for tasks, lists, tags,
//! sticky notes and UI flags.
//!
//! The store is constructed explicitly from a [`Storage`] handle and
//! passed by reference to whichever presentation surface is active; there
//! is no module-level instance. Each slice hydrates independently at
//! startup, falling back to seed data when absent or corrupt, and every
//! mutation persists the slice(s) it touched before returning.

use chrono::{Local, Utc};
use log::info;

use crate::fields::{Priority, Status};
use crate::note::{NotePatch, StickyNote};
use crate::seed;
use crate::storage::{
    Storage, KEY_DARK_MODE, KEY_LISTS, KEY_SIDEBAR_OPEN, KEY_STICKY_NOTES, KEY_TAGS, KEY_TASKS,
};
use crate::task::{List, NewTask, Tag, Task, TaskPatch};
use crate::views;

/// Tasks orphaned by a list deletion are reassigned to this list.
pub const DEFAULT_LIST: &str = "Personal";

/// In-memory application state backed by slice-per-key storage.
pub struct Store {
    storage: Storage,
    tasks: Vec<Task>,
    lists: Vec<List>,
    tags: Vec<Tag>,
    sticky_notes: Vec<StickyNote>,

    // Monotonic id counters, seeded from the hydrated slices. Ids are
    // never reused within a process, even after deleting the max-id entry.
    next_task_id: u64,
    next_list_id: u64,
    next_tag_id: u64,
    next_note_id: u64,

    // UI flags. Dark mode and the sidebar survive restarts; the rest
    // reset with the session.
    dark_mode: bool,
    sidebar_open: bool,
    selected_task: Option<u64>,
    is_creating_task: bool,
    search_query: String,
}

fn next_id_after<I: Iterator<Item = u64>>(ids: I) -> u64 {
    ids.max().unwrap_or(0) + 1
}

impl Store {
    /// Hydrate a store from storage, seeding any slice that is absent or
    /// corrupt. Freshly seeded slices are persisted immediately so the
    /// next open reads them back.
    pub fn open(storage: Storage) -> Self {
        let today = Local::now().date_naive();

        let (tasks, tasks_seeded) = match storage.read(KEY_TASKS) {
            Some(tasks) => (tasks, false),
            None => (seed::default_tasks(today), true),
        };
        let (lists, lists_seeded) = match storage.read(KEY_LISTS) {
            Some(lists) => (lists, false),
            None => (seed::default_lists(), true),
        };
        let (tags, tags_seeded) = match storage.read(KEY_TAGS) {
            Some(tags) => (tags, false),
            None => (seed::default_tags(), true),
        };
        let (sticky_notes, notes_seeded) = match storage.read(KEY_STICKY_NOTES) {
            Some(notes) => (notes, false),
            None => (seed::default_sticky_notes(), true),
        };
        let dark_mode = storage.read(KEY_DARK_MODE).unwrap_or(false);
        let sidebar_open = storage.read(KEY_SIDEBAR_OPEN).unwrap_or(true);

        let store = Store {
            next_task_id: next_id_after(tasks.iter().map(|t| t.id)),
            next_list_id: next_id_after(lists.iter().map(|l| l.id)),
            next_tag_id: next_id_after(tags.iter().map(|t| t.id)),
            next_note_id: next_id_after(sticky_notes.iter().map(|n| n.id)),
            storage,
            tasks,
            lists,
            tags,
            sticky_notes,
            dark_mode,
            sidebar_open,
            selected_task: None,
            is_creating_task: false,
            search_query: String::new(),
        };

        if tasks_seeded {
            info!("seeding task slice with demo data");
            store.storage.write(KEY_TASKS, &store.tasks);
        }
        if lists_seeded {
            store.storage.write(KEY_LISTS, &store.lists);
        }
        if tags_seeded {
            store.storage.write(KEY_TAGS, &store.tags);
        }
        if notes_seeded {
            store.storage.write(KEY_STICKY_NOTES, &store.sticky_notes);
        }
        store
    }

    fn persist_tasks(&self) {
        self.storage.write(KEY_TASKS, &self.tasks);
    }

    fn persist_lists(&self) {
        self.storage.write(KEY_LISTS, &self.lists);
    }

    fn persist_tags(&self) {
        self.storage.write(KEY_TAGS, &self.tags);
    }

    fn persist_notes(&self) {
        self.storage.write(KEY_STICKY_NOTES, &self.sticky_notes);
    }

    // ---- tasks ----

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by id.
    pub fn get_task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task. Status starts as `New`, the completion flag cleared,
    /// list and priority defaulted when omitted. Returns the assigned id.
    pub fn add_task(&mut self, new: NewTask) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        self.tasks.push(Task {
            id,
            title: new.title,
            description: new.description,
            list: new.list.unwrap_or_else(|| DEFAULT_LIST.to_string()),
            tags: new.tags,
            due_date: new.due_date,
            status: Status::New,
            priority: new.priority.unwrap_or_default(),
            completed: false,
            created_at_utc: Utc::now().timestamp(),
        });
        self.persist_tasks();
        id
    }

    /// Shallow-merge a patch into the matching task. Returns `false`
    /// (silent no-op) when the id is absent.
    pub fn update_task(&mut self, id: u64, patch: TaskPatch) -> bool {
        let Some(t) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if let Some(title) = patch.title {
            t.title = title;
        }
        if let Some(description) = patch.description {
            t.description = description;
        }
        if let Some(list) = patch.list {
            t.list = list;
        }
        if let Some(tags) = patch.tags {
            t.tags = tags;
        }
        if let Some(due_date) = patch.due_date {
            t.due_date = due_date;
        }
        if let Some(status) = patch.status {
            t.status = status;
        }
        if let Some(priority) = patch.priority {
            t.priority = priority;
        }
        if let Some(completed) = patch.completed {
            t.completed = completed;
        }
        self.persist_tasks();
        true
    }

    /// Remove a task by id. Returns `false` when the id is absent.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist_tasks();
        true
    }

    // ---- lists ----

    /// Lists with their derived active-task counts.
    pub fn lists(&self) -> Vec<List> {
        views::list_counts(&self.lists, &self.tasks)
    }

    /// Look up a list by id.
    pub fn get_list(&self, id: u64) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Create a list. Names are foreign keys, so empty and duplicate names
    /// are rejected.
    pub fn add_list(&mut self, name: &str, color: &str) -> Result<u64, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("list name cannot be empty".into());
        }
        if self.lists.iter().any(|l| l.name == name) {
            return Err(format!("a list named '{name}' already exists"));
        }
        let id = self.next_list_id;
        self.next_list_id += 1;
        self.lists.push(List {
            id,
            name: name.to_string(),
            color: color.to_string(),
            count: 0,
        });
        self.persist_lists();
        Ok(id)
    }

    /// Delete a list by id. Tasks referencing it move to the default
    /// "Personal" list. Returns `false` when the id is absent.
    pub fn delete_list(&mut self, id: u64) -> bool {
        let Some(pos) = self.lists.iter().position(|l| l.id == id) else {
            return false;
        };
        let name = self.lists.remove(pos).name;
        self.persist_lists();
        let mut reassigned = false;
        for t in self.tasks.iter_mut() {
            if t.list == name {
                t.list = DEFAULT_LIST.to_string();
                reassigned = true;
            }
        }
        if reassigned {
            self.persist_tasks();
        }
        true
    }

    // ---- tags ----

    /// Tags with their derived active-task counts.
    pub fn tags(&self) -> Vec<Tag> {
        views::tag_counts(&self.tags, &self.tasks)
    }

    /// Look up a tag by id.
    pub fn get_tag(&self, id: u64) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Check whether a tag with the given name exists.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Create a tag. Same naming rules as lists.
    pub fn add_tag(&mut self, name: &str, color: &str) -> Result<u64, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("tag name cannot be empty".into());
        }
        if self.tags.iter().any(|t| t.name == name) {
            return Err(format!("a tag named '{name}' already exists"));
        }
        let id = self.next_tag_id;
        self.next_tag_id += 1;
        self.tags.push(Tag {
            id,
            name: name.to_string(),
            color: color.to_string(),
            count: 0,
        });
        self.persist_tags();
        Ok(id)
    }

    /// Delete a tag by id and prune its name from every task's tag set.
    /// Returns `false` when the id is absent.
    pub fn delete_tag(&mut self, id: u64) -> bool {
        let Some(pos) = self.tags.iter().position(|t| t.id == id) else {
            return false;
        };
        let name = self.tags.remove(pos).name;
        self.persist_tags();
        let mut pruned = false;
        for t in self.tasks.iter_mut() {
            let before = t.tags.len();
            t.tags.retain(|tag| tag != &name);
            pruned |= t.tags.len() != before;
        }
        if pruned {
            self.persist_tasks();
        }
        true
    }

    // ---- sticky notes ----

    /// Sticky notes, pinned first, otherwise in insertion order.
    pub fn sticky_notes(&self) -> Vec<StickyNote> {
        let mut notes = self.sticky_notes.clone();
        notes.sort_by_key(|n| !n.pinned);
        notes
    }

    /// Look up a sticky note by id.
    pub fn get_sticky_note(&self, id: u64) -> Option<&StickyNote> {
        self.sticky_notes.iter().find(|n| n.id == id)
    }

    /// Create a sticky note. Returns the assigned id.
    pub fn add_sticky_note(&mut self, title: &str, content: &str, color: &str) -> u64 {
        let id = self.next_note_id;
        self.next_note_id += 1;
        let now = Utc::now().timestamp();
        self.sticky_notes.push(StickyNote {
            id,
            title: title.to_string(),
            content: content.to_string(),
            color: color.to_string(),
            pinned: false,
            created_at_utc: now,
            updated_at_utc: now,
        });
        self.persist_notes();
        id
    }

    /// Shallow-merge a patch into the matching note, bumping its update
    /// timestamp. Returns `false` when the id is absent.
    pub fn update_sticky_note(&mut self, id: u64, patch: NotePatch) -> bool {
        let Some(n) = self.sticky_notes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if let Some(title) = patch.title {
            n.title = title;
        }
        if let Some(content) = patch.content {
            n.content = content;
        }
        if let Some(color) = patch.color {
            n.color = color;
        }
        if let Some(pinned) = patch.pinned {
            n.pinned = pinned;
        }
        n.updated_at_utc = Utc::now().timestamp();
        self.persist_notes();
        true
    }

    /// Remove a sticky note by id. Returns `false` when the id is absent.
    pub fn delete_sticky_note(&mut self, id: u64) -> bool {
        let before = self.sticky_notes.len();
        self.sticky_notes.retain(|n| n.id != id);
        if self.sticky_notes.len() == before {
            return false;
        }
        self.persist_notes();
        true
    }

    // ---- derived views ----

    /// Active tasks due today.
    pub fn today_tasks(&self) -> Vec<Task> {
        clone_all(views::due_today(&self.tasks, views::today()))
    }

    /// Active tasks due tomorrow.
    pub fn tomorrow_tasks(&self) -> Vec<Task> {
        clone_all(views::due_tomorrow(&self.tasks, views::today()))
    }

    /// Active tasks due later this week.
    pub fn this_week_tasks(&self) -> Vec<Task> {
        clone_all(views::due_this_week(&self.tasks, views::today()))
    }

    /// Active tasks due next week.
    pub fn next_week_tasks(&self) -> Vec<Task> {
        clone_all(views::due_next_week(&self.tasks, views::today()))
    }

    /// Active tasks due after next week.
    pub fn beyond_next_week_tasks(&self) -> Vec<Task> {
        clone_all(views::due_beyond_next_week(&self.tasks, views::today()))
    }

    /// Active tasks with a due date in the past.
    pub fn overdue_tasks(&self) -> Vec<Task> {
        clone_all(views::overdue(&self.tasks, views::today()))
    }

    /// Tomorrow through beyond-next-week, concatenated in bucket order.
    pub fn upcoming_tasks(&self) -> Vec<Task> {
        clone_all(views::upcoming(&self.tasks, views::today()))
    }

    /// Active tasks on the named list, in due-date order.
    pub fn tasks_by_list(&self, name: &str) -> Vec<Task> {
        clone_all(views::by_list(&self.tasks, name))
    }

    /// Active tasks carrying the named tag, in due-date order.
    pub fn tasks_by_tag(&self, name: &str) -> Vec<Task> {
        clone_all(views::by_tag(&self.tasks, name))
    }

    /// Active tasks at the given priority, in due-date order.
    pub fn tasks_by_priority(&self, priority: Priority) -> Vec<Task> {
        clone_all(views::by_priority(&self.tasks, priority))
    }

    /// Search active tasks; see [`views::search`] for matching and ranking.
    pub fn search_tasks(&self, query: &str) -> Vec<Task> {
        clone_all(views::search(&self.tasks, query))
    }

    // ---- UI flags ----

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, on: bool) {
        self.dark_mode = on;
        self.storage.write(KEY_DARK_MODE, &self.dark_mode);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.dark_mode);
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
        self.storage.write(KEY_SIDEBAR_OPEN, &self.sidebar_open);
    }

    pub fn toggle_sidebar(&mut self) {
        self.set_sidebar_open(!self.sidebar_open);
    }

    pub fn selected_task(&self) -> Option<u64> {
        self.selected_task
    }

    pub fn set_selected_task(&mut self, id: Option<u64>) {
        self.selected_task = id;
    }

    pub fn is_creating_task(&self) -> bool {
        self.is_creating_task
    }

    pub fn set_is_creating_task(&mut self, creating: bool) {
        self.is_creating_task = creating;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: String) {
        self.search_query = query;
    }
}

fn clone_all(tasks: Vec<&Task>) -> Vec<Task> {
    tasks.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;

    fn fresh_store(dir: &std::path::Path) -> Store {
        Store::open(Storage::open(dir).unwrap())
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            ..NewTask::default()
        }
    }

    #[test]
    fn test_add_task_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let id = store.add_task(new_task("Water the plants"));
        let t = store.get_task(id).unwrap();
        assert_eq!(t.status, Status::New);
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.list, DEFAULT_LIST);
        assert!(!t.completed);
    }

    #[test]
    fn test_task_ids_are_not_reused() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let first = store.add_task(new_task("one"));
        assert!(store.delete_task(first));
        let second = store.add_task(new_task("two"));
        assert!(second > first);
    }

    #[test]
    fn test_update_task_with_empty_patch_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let id = store.add_task(new_task("Stable"));
        let before = store.get_task(id).unwrap().clone();
        assert!(store.update_task(id, TaskPatch::default()));
        assert_eq!(store.get_task(id).unwrap(), &before);
    }

    #[test]
    fn test_update_and_delete_missing_ids_are_noops() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let count = store.tasks().len();
        assert!(!store.update_task(9999, TaskPatch::default()));
        assert!(!store.delete_task(9999));
        assert_eq!(store.tasks().len(), count);
    }

    #[test]
    fn test_patch_can_clear_due_date() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let id = store.add_task(NewTask {
            title: "Dated".into(),
            due_date: Some(chrono::NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
            ..NewTask::default()
        });
        store.update_task(
            id,
            TaskPatch {
                due_date: Some(None),
                ..TaskPatch::default()
            },
        );
        assert!(store.get_task(id).unwrap().due_date.is_none());
    }

    #[test]
    fn test_add_then_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let added = {
            let mut store = fresh_store(dir.path());
            let id = store.add_task(NewTask {
                title: "Persisted".into(),
                list: Some("Work".into()),
                tags: vec!["Urgent".into()],
                ..NewTask::default()
            });
            store.get_task(id).unwrap().clone()
        };
        let reopened = fresh_store(dir.path());
        assert_eq!(reopened.get_task(added.id), Some(&added));
    }

    #[test]
    fn test_corrupt_task_slice_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tasks.json"), "{broken").unwrap();
        let store = fresh_store(dir.path());
        // The seed set, not an empty or partial slice.
        assert!(!store.tasks().is_empty());
        assert!(store.tasks().iter().any(|t| t.title == "Team standup meeting"));
    }

    #[test]
    fn test_delete_list_reassigns_tasks_to_personal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let work = store.lists().iter().find(|l| l.name == "Work").unwrap().id;
        let orphans: Vec<u64> = store
            .tasks()
            .iter()
            .filter(|t| t.list == "Work")
            .map(|t| t.id)
            .collect();
        assert!(!orphans.is_empty());
        assert!(store.delete_list(work));
        for id in orphans {
            assert_eq!(store.get_task(id).unwrap().list, DEFAULT_LIST);
        }
    }

    #[test]
    fn test_delete_tag_prunes_task_references() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let urgent = store.tags().iter().find(|t| t.name == "Urgent").unwrap().id;
        assert!(store.delete_tag(urgent));
        for t in store.tasks() {
            assert!(!t.tags.iter().any(|tag| tag == "Urgent"));
        }
    }

    #[test]
    fn test_duplicate_and_empty_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        assert!(store.add_list("Personal", "#000000").is_err());
        assert!(store.add_list("  ", "#000000").is_err());
        assert!(store.add_tag("Urgent", "#000000").is_err());
        assert!(store.add_list("Errands", "#000000").is_ok());
    }

    #[test]
    fn test_list_counts_follow_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let before = store
            .lists()
            .iter()
            .find(|l| l.name == "Personal")
            .unwrap()
            .count;
        store.add_task(new_task("One more"));
        let after = store
            .lists()
            .iter()
            .find(|l| l.name == "Personal")
            .unwrap()
            .count;
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_sticky_note_crud_and_pin_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = fresh_store(dir.path());
        let id = store.add_sticky_note("Ideas", "- one\n- two", "#FEF08A");
        assert!(store.update_sticky_note(
            id,
            NotePatch {
                pinned: Some(true),
                ..NotePatch::default()
            }
        ));
        assert_eq!(store.sticky_notes().first().unwrap().id, id);
        assert!(store.delete_sticky_note(id));
        assert!(!store.delete_sticky_note(id));
    }

    #[test]
    fn test_dark_mode_persists_and_transient_flags_reset() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = fresh_store(dir.path());
            store.set_dark_mode(true);
            store.set_sidebar_open(false);
            store.set_search_query("meeting".into());
            store.set_selected_task(Some(1));
            store.set_is_creating_task(true);
        }
        let store = fresh_store(dir.path());
        assert!(store.dark_mode());
        assert!(!store.sidebar_open());
        assert_eq!(store.search_query(), "");
        assert_eq!(store.selected_task(), None);
        assert!(!store.is_creating_task());
    }

    #[test]
    fn test_search_goes_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(dir.path());
        let hits = store.search_tasks("standup");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Team standup meeting");
        assert!(store.search_tasks("").is_empty());
    }
}
