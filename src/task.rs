//! Task, list and tag data structures.
//!
//! This module defines the core `Task` struct along with the `List` and
//! `Tag` collections tasks reference by name, and the input types used by
//! the store when creating or patching a task.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

/// A single to-do item.
///
/// Tasks reference their list and tags by name. Due dates carry no time
/// component. `completed` is a legacy flag kept alongside `status`; either
/// one can take the task out of the active set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    /// Name of the list this task belongs to.
    pub list: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at_utc: i64,
}

/// A named task list (e.g. "Personal", "Work").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: u64,
    /// Unique across lists; tasks reference it as a foreign key.
    pub name: String,
    /// Hex color, e.g. "#EF4444".
    pub color: String,
    /// Number of active tasks on the list. Derived on read, never stored.
    #[serde(skip)]
    pub count: usize,
}

/// A label attachable to any number of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub color: String,
    #[serde(skip)]
    pub count: usize,
}

/// Fields supplied when creating a task.
///
/// Id, status, completion flag and creation timestamp are assigned by the
/// store; list and priority fall back to their defaults when omitted.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub list: Option<String>,
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

/// A partial update applied to an existing task.
///
/// `None` fields are left untouched. The double-`Option` fields
/// distinguish "leave alone" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub list: Option<String>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_tolerates_missing_optional_fields() {
        // Priority, tags and completed may be absent in older slices.
        let json = r#"{
            "id": 7,
            "title": "Renew license",
            "description": null,
            "list": "Personal",
            "due_date": "2024-06-13",
            "status": "new",
            "created_at_utc": 1700000000
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert!(t.tags.is_empty());
        assert!(!t.completed);
        assert_eq!(
            t.due_date,
            NaiveDate::from_ymd_opt(2024, 6, 13)
        );
    }

    #[test]
    fn test_list_count_is_not_persisted() {
        let list = List {
            id: 1,
            name: "Work".into(),
            color: "#3B82F6".into(),
            count: 42,
        };
        let json = serde_json::to_string(&list).unwrap();
        assert!(!json.contains("count"));
        let back: List = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count, 0);
    }
}
