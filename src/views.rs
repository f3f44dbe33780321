//! Derived view engine: date bucketing, filtering, counting and search.
//!
//! Everything in this module is a pure function over the task collection.
//! Results are recomputed on every call; there is no caching or
//! invalidation layer, the store simply rescans its slices.
//!
//! Due dates are compared after being pinned to a fixed reference year, so
//! the bundled demo data buckets the same way regardless of the year it
//! was written in.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::fields::{DueBucket, Priority, Status};
use crate::task::{List, Tag, Task};

/// Every due date is pinned to this year before comparison. 2024 is a leap
/// year, so every month/day combination survives the mapping.
pub const REFERENCE_YEAR: i32 = 2024;

/// Pin a date to the reference year.
pub fn normalise_date(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, d.month(), d.day())
        .expect("every month/day exists in the leap reference year")
}

/// Today's date, normalised.
pub fn today() -> NaiveDate {
    normalise_date(Local::now().date_naive())
}

/// A task counts as active unless it is completed, closed or cancelled.
pub fn is_active(task: &Task) -> bool {
    !task.completed && task.status != Status::Closed && task.status != Status::Cancelled
}

fn normalised_due(task: &Task) -> Option<NaiveDate> {
    task.due_date.map(normalise_date)
}

/// Last day of the week containing `today`. Weeks end on Sunday; when
/// `today` is itself a Sunday the week ends on the following Sunday,
/// matching the `7 - weekday` convention (Sunday = 0).
pub fn end_of_week(today: NaiveDate) -> NaiveDate {
    let days_left = 7 - i64::from(today.weekday().num_days_from_sunday());
    today + Duration::days(days_left)
}

fn active_with_due(tasks: &[Task]) -> impl Iterator<Item = (&Task, NaiveDate)> {
    tasks
        .iter()
        .filter(|t| is_active(t))
        .filter_map(|t| normalised_due(t).map(|d| (t, d)))
}

/// Active tasks due today.
pub fn due_today(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    active_with_due(tasks)
        .filter(|&(_, d)| d == today)
        .map(|(t, _)| t)
        .collect()
}

/// Active tasks due tomorrow.
pub fn due_tomorrow(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let tomorrow = today + Duration::days(1);
    active_with_due(tasks)
        .filter(|&(_, d)| d == tomorrow)
        .map(|(t, _)| t)
        .collect()
}

/// Active tasks due after tomorrow, up to and including the end of this
/// week.
pub fn due_this_week(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let tomorrow = today + Duration::days(1);
    let week_end = end_of_week(today);
    active_with_due(tasks)
        .filter(|&(_, d)| d > tomorrow && d <= week_end)
        .map(|(t, _)| t)
        .collect()
}

/// Active tasks due in the week after this one.
pub fn due_next_week(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let week_end = end_of_week(today);
    let next_week_end = week_end + Duration::days(7);
    active_with_due(tasks)
        .filter(|&(_, d)| d > week_end && d <= next_week_end)
        .map(|(t, _)| t)
        .collect()
}

/// Active tasks due after the end of next week.
pub fn due_beyond_next_week(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let next_week_end = end_of_week(today) + Duration::days(7);
    active_with_due(tasks)
        .filter(|&(_, d)| d > next_week_end)
        .map(|(t, _)| t)
        .collect()
}

/// Active tasks whose due date has passed.
pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    active_with_due(tasks)
        .filter(|&(_, d)| d < today)
        .map(|(t, _)| t)
        .collect()
}

/// Tomorrow, this week, next week and beyond, concatenated in that order.
pub fn upcoming(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let mut out = due_tomorrow(tasks, today);
    out.extend(due_this_week(tasks, today));
    out.extend(due_next_week(tasks, today));
    out.extend(due_beyond_next_week(tasks, today));
    out
}

/// Select active tasks for a single date bucket.
pub fn by_bucket(tasks: &[Task], bucket: DueBucket, today: NaiveDate) -> Vec<&Task> {
    match bucket {
        DueBucket::Overdue => overdue(tasks, today),
        DueBucket::Today => due_today(tasks, today),
        DueBucket::Tomorrow => due_tomorrow(tasks, today),
        DueBucket::ThisWeek => due_this_week(tasks, today),
        DueBucket::NextWeek => due_next_week(tasks, today),
        DueBucket::Beyond => due_beyond_next_week(tasks, today),
        DueBucket::Upcoming => upcoming(tasks, today),
        DueBucket::None => tasks
            .iter()
            .filter(|t| is_active(t) && t.due_date.is_none())
            .collect(),
    }
}

fn due_sort_key(task: &Task) -> NaiveDate {
    normalised_due(task).unwrap_or(NaiveDate::MAX)
}

/// Sort ascending by normalised due date, dateless tasks last. The sort is
/// stable, so ties keep their original order.
fn sort_by_due(mut tasks: Vec<&Task>) -> Vec<&Task> {
    tasks.sort_by_key(|t| due_sort_key(t));
    tasks
}

/// Active tasks on the named list, in due-date order.
pub fn by_list<'a>(tasks: &'a [Task], name: &str) -> Vec<&'a Task> {
    sort_by_due(
        tasks
            .iter()
            .filter(|t| is_active(t) && t.list == name)
            .collect(),
    )
}

/// Active tasks carrying the named tag, in due-date order.
pub fn by_tag<'a>(tasks: &'a [Task], name: &str) -> Vec<&'a Task> {
    sort_by_due(
        tasks
            .iter()
            .filter(|t| is_active(t) && t.tags.iter().any(|tag| tag == name))
            .collect(),
    )
}

/// Active tasks at the given priority, in due-date order.
pub fn by_priority(tasks: &[Task], priority: Priority) -> Vec<&Task> {
    sort_by_due(
        tasks
            .iter()
            .filter(|t| is_active(t) && t.priority == priority)
            .collect(),
    )
}

/// Recompute the derived `count` field for every list.
pub fn list_counts(lists: &[List], tasks: &[Task]) -> Vec<List> {
    lists
        .iter()
        .map(|l| {
            let mut l = l.clone();
            l.count = tasks
                .iter()
                .filter(|t| is_active(t) && t.list == l.name)
                .count();
            l
        })
        .collect()
}

/// Recompute the derived `count` field for every tag.
pub fn tag_counts(tags: &[Tag], tasks: &[Task]) -> Vec<Tag> {
    tags.iter()
        .map(|tag| {
            let mut tag = tag.clone();
            tag.count = tasks
                .iter()
                .filter(|t| is_active(t) && t.tags.iter().any(|name| name == &tag.name))
                .count();
            tag
        })
        .collect()
}

/// Case-insensitive substring search over title, description, list name
/// and tags, restricted to active tasks.
///
/// Title matches rank first; within a rank, tasks order by due date with
/// dateless tasks last. A blank query returns nothing.
pub fn search<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<&Task> = tasks
        .iter()
        .filter(|t| {
            if !is_active(t) {
                return false;
            }
            t.title.to_lowercase().contains(&term)
                || t.description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
                || t.list.to_lowercase().contains(&term)
                || t.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
        })
        .collect();
    hits.sort_by_key(|t| (!t.title.to_lowercase().contains(&term), due_sort_key(t)));
    hits
}

/// Parse human-readable due date input.
///
/// Supports:
/// - "today", "tomorrow"
/// - bare weekday names ("friday") for this week's occurrence
/// - "next monday", "next tuesday", etc.
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    let weekdays = [
        ("sunday", 0u32),
        ("monday", 1),
        ("tuesday", 2),
        ("wednesday", 3),
        ("thursday", 4),
        ("friday", 5),
        ("saturday", 6),
    ];
    for (day_name, target) in weekdays {
        let current = today.weekday().num_days_from_sunday();
        let days_ahead = i64::from((target + 7 - current) % 7);
        if s == day_name {
            return Some(today + Duration::days(days_ahead));
        }
        if s == format!("next {day_name}") {
            let days_to_add = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return Some(today + Duration::days(days_to_add));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d",
/// "2d late"). Comparison happens in normalised space like the buckets.
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let delta = normalise_date(d) - today;
            match delta.num_days() {
                0 => "today".into(),
                1 => "tomorrow".into(),
                n if n > 1 => format!("in {n}d"),
                n => format!("{}d late", -n),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, due: Option<&str>) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            list: "Personal".into(),
            tags: Vec::new(),
            due_date: due.map(|d| d.parse().unwrap()),
            status: Status::New,
            priority: Priority::Medium,
            completed: false,
            created_at_utc: 0,
        }
    }

    // 2024-06-10 is a Monday; this week ends Sunday 2024-06-16.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_active_predicate() {
        let mut t = task(1, None);
        assert!(is_active(&t));
        t.status = Status::InProgress;
        assert!(is_active(&t));
        t.status = Status::Closed;
        assert!(!is_active(&t));
        t.status = Status::Cancelled;
        assert!(!is_active(&t));
        t.status = Status::New;
        t.completed = true;
        assert!(!is_active(&t));
    }

    #[test]
    fn test_bucket_examples() {
        let tasks = vec![
            task(1, Some("2024-06-11")),
            task(2, Some("2024-06-09")),
            task(3, Some("2024-06-17")),
        ];
        let today = monday();
        assert_eq!(ids(due_tomorrow(&tasks, today)), vec![1]);
        assert_eq!(ids(overdue(&tasks, today)), vec![2]);
        assert_eq!(ids(due_next_week(&tasks, today)), vec![3]);
    }

    #[test]
    fn test_buckets_are_disjoint() {
        // One task per day across a five-week window straddling today.
        let start = NaiveDate::from_ymd_opt(2024, 5, 27).unwrap();
        let tasks: Vec<Task> = (0..35)
            .map(|i| {
                task(
                    i + 1,
                    Some(&(start + Duration::days(i as i64)).to_string()),
                )
            })
            .collect();
        let today = monday();
        let buckets = [
            overdue(&tasks, today),
            due_today(&tasks, today),
            due_tomorrow(&tasks, today),
            due_this_week(&tasks, today),
            due_next_week(&tasks, today),
            due_beyond_next_week(&tasks, today),
        ];
        let total: usize = buckets.iter().map(|b| b.len()).sum();
        assert_eq!(total, tasks.len());
        let mut seen = std::collections::HashSet::new();
        for bucket in &buckets {
            for t in bucket {
                assert!(seen.insert(t.id), "task {} appears twice", t.id);
            }
        }
    }

    #[test]
    fn test_dateless_tasks_never_bucket() {
        let tasks = vec![task(1, None)];
        let today = monday();
        assert!(due_today(&tasks, today).is_empty());
        assert!(overdue(&tasks, today).is_empty());
        assert!(upcoming(&tasks, today).is_empty());
    }

    #[test]
    fn test_year_is_ignored_when_bucketing() {
        // A 2022 date buckets as if written in the reference year.
        let tasks = vec![task(1, Some("2022-06-11"))];
        assert_eq!(ids(due_tomorrow(&tasks, monday())), vec![1]);
    }

    #[test]
    fn test_week_ends_on_sunday() {
        assert_eq!(
            end_of_week(monday()),
            NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()
        );
        // On a Sunday the week end rolls to the following Sunday.
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert_eq!(
            end_of_week(sunday),
            NaiveDate::from_ymd_opt(2024, 6, 23).unwrap()
        );
    }

    #[test]
    fn test_upcoming_preserves_bucket_order() {
        let tasks = vec![
            task(1, Some("2024-06-30")), // beyond
            task(2, Some("2024-06-11")), // tomorrow
            task(3, Some("2024-06-14")), // this week
            task(4, Some("2024-06-18")), // next week
        ];
        assert_eq!(ids(upcoming(&tasks, monday())), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_inactive_tasks_are_excluded_everywhere() {
        let mut closed = task(1, Some("2024-06-10"));
        closed.status = Status::Closed;
        let mut done = task(2, Some("2024-06-10"));
        done.completed = true;
        let tasks = vec![closed, done, task(3, Some("2024-06-10"))];
        assert_eq!(ids(due_today(&tasks, monday())), vec![3]);
        assert_eq!(ids(by_list(&tasks, "Personal")), vec![3]);
    }

    #[test]
    fn test_filters_sort_dateless_last_and_ties_stable() {
        let tasks = vec![
            task(1, None),
            task(2, Some("2024-06-12")),
            task(3, Some("2024-06-12")),
            task(4, Some("2024-06-11")),
        ];
        assert_eq!(ids(by_list(&tasks, "Personal")), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_priority_filter() {
        let mut high = task(1, None);
        high.priority = Priority::High;
        let tasks = vec![high, task(2, None)];
        assert_eq!(ids(by_priority(&tasks, Priority::High)), vec![1]);
        assert_eq!(ids(by_priority(&tasks, Priority::Medium)), vec![2]);
    }

    #[test]
    fn test_counts_only_cover_active_tasks() {
        let lists = vec![List {
            id: 1,
            name: "Personal".into(),
            color: "#EF4444".into(),
            count: 0,
        }];
        let tags = vec![Tag {
            id: 1,
            name: "Urgent".into(),
            color: "#DC2626".into(),
            count: 0,
        }];
        let mut tagged = task(1, None);
        tagged.tags = vec!["Urgent".into()];
        let mut closed = task(2, None);
        closed.tags = vec!["Urgent".into()];
        closed.status = Status::Cancelled;
        let tasks = vec![tagged, closed];
        assert_eq!(list_counts(&lists, &tasks)[0].count, 1);
        assert_eq!(tag_counts(&tags, &tasks)[0].count, 1);
    }

    #[test]
    fn test_search_ranks_title_matches_first() {
        let mut standup = task(1, None);
        standup.title = "Team standup meeting".into();
        let mut review = task(2, None);
        review.title = "Budget review".into();
        review.tags = vec!["Meeting".into()];
        let tasks = vec![review, standup];
        let hits = search(&tasks, "meeting");
        assert_eq!(ids(hits), vec![1, 2]);
    }

    #[test]
    fn test_search_blank_query_returns_nothing() {
        let tasks = vec![task(1, None)];
        assert!(search(&tasks, "").is_empty());
        assert!(search(&tasks, "   ").is_empty());
    }

    #[test]
    fn test_search_covers_description_list_and_tags() {
        let mut t = task(1, None);
        t.description = Some("Prepare slides".into());
        t.list = "Work".into();
        t.tags = vec!["Planning".into()];
        let tasks = vec![t];
        assert_eq!(search(&tasks, "slides").len(), 1);
        assert_eq!(search(&tasks, "work").len(), 1);
        assert_eq!(search(&tasks, "plan").len(), 1);
        assert!(search(&tasks, "missing").is_empty());
    }

    #[test]
    fn test_empty_collection_yields_empty_views() {
        let tasks: Vec<Task> = Vec::new();
        let today = monday();
        assert!(due_today(&tasks, today).is_empty());
        assert!(upcoming(&tasks, today).is_empty());
        assert!(overdue(&tasks, today).is_empty());
        assert!(search(&tasks, "").is_empty());
    }

    #[test]
    fn test_parse_due_input_iso() {
        assert_eq!(
            parse_due_input("2024-12-25"),
            NaiveDate::from_ymd_opt(2024, 12, 25)
        );
        assert!(parse_due_input("not a date").is_none());
    }

    #[test]
    fn test_format_due_relative() {
        let today = monday();
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(
            format_due_relative(NaiveDate::from_ymd_opt(2024, 6, 10), today),
            "today"
        );
        assert_eq!(
            format_due_relative(NaiveDate::from_ymd_opt(2024, 6, 13), today),
            "in 3d"
        );
        assert_eq!(
            format_due_relative(NaiveDate::from_ymd_opt(2024, 6, 8), today),
            "2d late"
        );
    }

    fn ids(tasks: Vec<&Task>) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }
}
