//! Enumerations and field types for task management.
//!
//! This module defines the structured data types used to classify tasks:
//! lifecycle status, priority, and the date buckets tasks are grouped into.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
///
/// `Closed` and `Cancelled` both take a task out of the active set; the
/// legacy `completed` flag on the task does the same independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    New,
    InProgress,
    Closed,
    Cancelled,
}

/// Priority classification for task importance.
///
/// Tasks persisted without a priority read back as `Medium`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Date buckets for filtering task lists.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    Beyond,
    /// Tomorrow through beyond-next-week, concatenated in bucket order.
    Upcoming,
    /// Tasks without a due date.
    None,
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::New => "New",
        Status::InProgress => "In Progress",
        Status::Closed => "Closed",
        Status::Cancelled => "Cancelled",
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialises_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in_progress\""
        );
        let s: Status = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(s, Status::Cancelled);
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
