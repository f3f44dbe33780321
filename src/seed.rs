//! Seed data used when a slice has never been persisted.
//!
//! The demo tasks are dated relative to the day the store is first opened,
//! so a fresh install always has something in every date bucket.

use chrono::{Duration, NaiveDate, Utc};

use crate::fields::{Priority, Status};
use crate::note::StickyNote;
use crate::task::{List, Tag, Task};

/// Color assigned to lists created without an explicit one.
pub const DEFAULT_LIST_COLOR: &str = "#3B82F6";
/// Color assigned to tags created without an explicit one.
pub const DEFAULT_TAG_COLOR: &str = "#7C3AED";
/// Color assigned to sticky notes created without an explicit one.
pub const DEFAULT_NOTE_COLOR: &str = "#FEF08A";

/// The three starter lists. "Personal" doubles as the reassignment target
/// when a list is deleted.
pub fn default_lists() -> Vec<List> {
    [
        (1, "Personal", "#EF4444"),
        (2, "Work", "#3B82F6"),
        (3, "Fitness", "#10B981"),
    ]
    .into_iter()
    .map(|(id, name, color)| List {
        id,
        name: name.into(),
        color: color.into(),
        count: 0,
    })
    .collect()
}

/// The starter tag palette.
pub fn default_tags() -> Vec<Tag> {
    [
        (1, "Urgent", "#DC2626"),
        (2, "Meeting", "#2563EB"),
        (3, "Research", "#7C3AED"),
        (4, "Planning", "#EA580C"),
        (5, "Review", "#0D9488"),
        (6, "Health", "#059669"),
    ]
    .into_iter()
    .map(|(id, name, color)| Tag {
        id,
        name: name.into(),
        color: color.into(),
        count: 0,
    })
    .collect()
}

struct SeedTask {
    title: &'static str,
    description: &'static str,
    list: &'static str,
    tags: &'static [&'static str],
    due_offset: Option<i64>,
    status: Status,
    priority: Priority,
    completed: bool,
}

/// Demo tasks spread across every date bucket, including a few closed and
/// cancelled ones so the active-task filters have something to exclude.
pub fn default_tasks(today: NaiveDate) -> Vec<Task> {
    use Priority::*;
    use Status::*;

    let seeds = [
        // Today
        SeedTask {
            title: "Research content ideas for blog posts",
            description: "Brainstorm and research trending topics for upcoming blog posts",
            list: "Personal",
            tags: &["Research", "Planning"],
            due_offset: Some(0),
            status: New,
            priority: Medium,
            completed: false,
        },
        SeedTask {
            title: "Morning workout routine",
            description: "Complete 45-minute cardio and strength training session",
            list: "Fitness",
            tags: &["Health"],
            due_offset: Some(0),
            status: InProgress,
            priority: High,
            completed: false,
        },
        SeedTask {
            title: "Team standup meeting",
            description: "Daily standup with development team at 9:00 AM",
            list: "Work",
            tags: &["Meeting", "Urgent"],
            due_offset: Some(0),
            status: New,
            priority: High,
            completed: false,
        },
        SeedTask {
            title: "Review quarterly reports",
            description: "Analyse Q3 performance metrics and prepare summary",
            list: "Work",
            tags: &["Review", "Urgent"],
            due_offset: Some(0),
            status: InProgress,
            priority: High,
            completed: false,
        },
        // Tomorrow
        SeedTask {
            title: "Create job posting for SEO specialist",
            description: "Draft comprehensive job description and requirements",
            list: "Work",
            tags: &["Planning"],
            due_offset: Some(1),
            status: New,
            priority: Medium,
            completed: false,
        },
        SeedTask {
            title: "Request design assets for landing page",
            description: "Contact design team for new product landing page assets",
            list: "Work",
            tags: &["Review"],
            due_offset: Some(1),
            status: New,
            priority: Medium,
            completed: false,
        },
        SeedTask {
            title: "Grocery shopping for meal prep",
            description: "Buy ingredients for weekly meal preparation",
            list: "Personal",
            tags: &["Health", "Planning"],
            due_offset: Some(1),
            status: New,
            priority: Medium,
            completed: false,
        },
        // Later this week
        SeedTask {
            title: "Renew driver's license",
            description: "Visit DMV to renew expiring driver's license",
            list: "Personal",
            tags: &["Urgent"],
            due_offset: Some(3),
            status: New,
            priority: High,
            completed: false,
        },
        SeedTask {
            title: "Plan weekly meal prep",
            description: "Create meal plan and prep schedule for next week",
            list: "Fitness",
            tags: &["Health", "Planning"],
            due_offset: Some(7),
            status: New,
            priority: Medium,
            completed: false,
        },
        SeedTask {
            title: "Client presentation preparation",
            description: "Prepare slides and materials for client proposal meeting",
            list: "Work",
            tags: &["Meeting", "Planning"],
            due_offset: Some(7),
            status: InProgress,
            priority: High,
            completed: false,
        },
        // Further out
        SeedTask {
            title: "Quarterly business review",
            description: "Comprehensive review of business metrics and strategy",
            list: "Work",
            tags: &["Meeting", "Review"],
            due_offset: Some(14),
            status: New,
            priority: Medium,
            completed: false,
        },
        SeedTask {
            title: "Plan vacation itinerary",
            description: "Research and book activities for summer vacation",
            list: "Personal",
            tags: &["Planning"],
            due_offset: Some(14),
            status: New,
            priority: Low,
            completed: false,
        },
        // Overdue
        SeedTask {
            title: "Submit tax documents",
            description: "Complete and submit remaining tax documentation",
            list: "Personal",
            tags: &["Urgent"],
            due_offset: Some(-1),
            status: New,
            priority: High,
            completed: false,
        },
        SeedTask {
            title: "Update portfolio website",
            description: "Add recent projects and update contact information",
            list: "Work",
            tags: &["Planning", "Review"],
            due_offset: Some(-7),
            status: InProgress,
            priority: Medium,
            completed: false,
        },
        SeedTask {
            title: "Schedule annual checkup",
            description: "Book appointment with primary care physician",
            list: "Personal",
            tags: &["Health", "Urgent"],
            due_offset: Some(-1),
            status: New,
            priority: High,
            completed: false,
        },
        // Completed
        SeedTask {
            title: "Complete project documentation",
            description: "Finalise documentation for completed project",
            list: "Work",
            tags: &["Review"],
            due_offset: Some(-1),
            status: Closed,
            priority: Medium,
            completed: true,
        },
        SeedTask {
            title: "Weekly team meeting",
            description: "Attend weekly team sync and project updates",
            list: "Work",
            tags: &["Meeting"],
            due_offset: Some(-7),
            status: Closed,
            priority: Medium,
            completed: true,
        },
        // Cancelled
        SeedTask {
            title: "Attend conference webinar",
            description: "Webinar cancelled by organisers due to technical issues",
            list: "Work",
            tags: &["Meeting"],
            due_offset: Some(-1),
            status: Cancelled,
            priority: Low,
            completed: false,
        },
    ];

    let now = Utc::now().timestamp();
    seeds
        .into_iter()
        .enumerate()
        .map(|(i, s)| Task {
            id: i as u64 + 1,
            title: s.title.into(),
            description: Some(s.description.into()),
            list: s.list.into(),
            tags: s.tags.iter().map(|t| (*t).into()).collect(),
            due_date: s.due_offset.map(|off| today + Duration::days(off)),
            status: s.status,
            priority: s.priority,
            completed: s.completed,
            created_at_utc: now,
        })
        .collect()
}

/// The starter sticky wall.
pub fn default_sticky_notes() -> Vec<StickyNote> {
    let now = Utc::now().timestamp();
    [
        (
            1,
            "Social Media",
            "- Plan social content\n- Build content calendar\n- Plan promotion and distribution",
            "#FEF08A",
        ),
        (
            2,
            "Content Strategy",
            "Would need time to get insights (goals, personas, budget, audits), but after, \
             it would be good to focus on assembling my team. Start with an SEO specialist, \
             then perhaps an email marketer? Also need to brainstorm on tooling.",
            "#BFDBFE",
        ),
        (
            3,
            "Email A/B Tests",
            "- Subject lines\n- Sender\n- CTA\n- Sending times",
            "#FBCFE8",
        ),
        (
            4,
            "Banner Ads",
            "Notes from the workshop:\n- Sizing matters\n- Choose distinctive imagery\n- The landing page must match the display ad",
            "#FED7AA",
        ),
    ]
    .into_iter()
    .map(|(id, title, content, color)| StickyNote {
        id,
        title: title.into(),
        content: content.into(),
        color: color.into(),
        pinned: false,
        created_at_utc: now,
        updated_at_utc: now,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views;

    #[test]
    fn test_seed_references_are_consistent() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let lists = default_lists();
        let tags = default_tags();
        for task in default_tasks(today) {
            assert!(
                lists.iter().any(|l| l.name == task.list),
                "task '{}' references unknown list '{}'",
                task.title,
                task.list
            );
            for tag in &task.tags {
                assert!(
                    tags.iter().any(|t| &t.name == tag),
                    "task '{}' references unknown tag '{}'",
                    task.title,
                    tag
                );
            }
        }
    }

    #[test]
    fn test_seed_populates_every_bucket() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let tasks = default_tasks(today);
        assert!(!views::due_today(&tasks, today).is_empty());
        assert!(!views::due_tomorrow(&tasks, today).is_empty());
        assert!(!views::overdue(&tasks, today).is_empty());
        assert!(!views::upcoming(&tasks, today).is_empty());
    }
}
