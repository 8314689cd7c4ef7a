//! Property tests for the filter → sort → paginate pipeline.

use chrono::{DateTime, Duration, TimeZone, Utc};
use decentra_core::domain::{
    AccountId, Difficulty, SearchFilters, SearchRequest, SortKey, Task, TaskId, TaskPriority,
    TaskStatus,
};
use decentra_core::search::{filter_tasks, paginate, search, sort_tasks, total_pages};
use proptest::prelude::*;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn arb_task(id: u32) -> impl Strategy<Value = Task> {
    (
        1u8..=10,
        0u64..1_000,
        0usize..4,
        0usize..5,
        any::<bool>(),
        prop::option::of(0i64..500),
        0i64..500,
        "[a-z ]{0,12}",
    )
        .prop_map(
            move |(difficulty, reward, priority, status, assigned, deadline, created, title)| {
                let created_at = epoch() + Duration::hours(created);
                let mut task = Task::new(
                    TaskId::new(id).unwrap(),
                    title,
                    AccountId::new(if id % 2 == 0 { "alice" } else { "bob" }),
                    created_at,
                )
                .with_difficulty(Difficulty::new(difficulty).unwrap())
                .with_reward(reward)
                .with_priority(TaskPriority::ALL[priority])
                .with_status(TaskStatus::ALL[status])
                .with_updated_at(created_at + Duration::minutes(reward as i64));
                if assigned {
                    task = task.with_assignee(AccountId::new("charlie"));
                }
                if let Some(hours) = deadline {
                    task = task.with_deadline(epoch() + Duration::hours(hours));
                }
                task
            },
        )
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    (0u32..40).prop_flat_map(|n| (1..=n).map(arb_task).collect::<Vec<_>>())
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn ids(tasks: &[&Task]) -> Vec<u32> {
    tasks.iter().map(|t| t.id.get()).collect()
}

proptest! {
    /// An empty filter keeps every task in its original order.
    #[test]
    fn prop_empty_filter_is_identity(tasks in arb_tasks()) {
        let kept = filter_tasks(&tasks, &SearchFilters::default());
        let expected: Vec<u32> = tasks.iter().map(|t| t.id.get()).collect();
        prop_assert_eq!(ids(&kept), expected);
    }

    /// Difficulty range inclusion holds iff min <= difficulty <= max.
    #[test]
    fn prop_difficulty_range_is_inclusive(
        tasks in arb_tasks(),
        min in 1u8..=10,
        max in 1u8..=10,
    ) {
        let kept = filter_tasks(&tasks, &SearchFilters::new().difficulty_range(min, max));
        for task in &tasks {
            let d = task.difficulty.get();
            let included = kept.iter().any(|k| k.id == task.id);
            prop_assert_eq!(included, min <= d && d <= max);
        }
        if min > max {
            prop_assert!(kept.is_empty());
        }
    }

    /// Reward range with min > max never matches.
    #[test]
    fn prop_inverted_reward_range_is_empty(tasks in arb_tasks(), low in 0u64..500, gap in 1u64..500) {
        let kept = filter_tasks(&tasks, &SearchFilters::new().reward_range(low + gap, low));
        prop_assert!(kept.is_empty());
    }

    /// Sorting twice gives the same order as sorting once.
    #[test]
    fn prop_sort_is_idempotent(tasks in arb_tasks(), key in arb_sort_key(), desc: bool) {
        let mut once: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut once, key, desc);
        let mut twice = once.clone();
        sort_tasks(&mut twice, key, desc);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    /// Equal sort keys fall back to ascending id.
    #[test]
    fn prop_sort_ties_break_by_id(tasks in arb_tasks(), desc: bool) {
        let mut sorted: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut sorted, SortKey::Difficulty, desc);
        for pair in sorted.windows(2) {
            if pair[0].difficulty == pair[1].difficulty {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    /// Concatenating every page reproduces the sorted sequence.
    #[test]
    fn prop_pages_concatenate_to_whole(
        tasks in arb_tasks(),
        key in arb_sort_key(),
        desc: bool,
        page_size in 1u32..15,
    ) {
        let mut sorted: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut sorted, key, desc);

        let pages = total_pages(sorted.len(), page_size) as u32;
        let mut joined = Vec::new();
        for page in 1..=pages {
            let result = paginate(&sorted, page, page_size).unwrap();
            prop_assert_eq!(result.total, sorted.len());
            joined.extend(result.items.into_iter().map(|t| t.id.get()));
        }
        prop_assert_eq!(joined, ids(&sorted));

        let past_end = paginate(&sorted, pages + 1, page_size).unwrap();
        prop_assert!(past_end.items.is_empty());
    }

    /// page_size == 0 is always rejected.
    #[test]
    fn prop_zero_page_size_is_invalid(tasks in arb_tasks(), page in 1u32..5) {
        let request = SearchRequest::default().page(page, 0);
        prop_assert!(search(&tasks, &request).is_err());
    }
}

#[test]
fn twenty_five_tasks_second_page() {
    let tasks: Vec<Task> = (1..=25)
        .map(|i| {
            Task::new(
                TaskId::new(i).unwrap(),
                format!("Task {i}"),
                AccountId::new("alice"),
                epoch() + Duration::hours(i64::from(i)),
            )
        })
        .collect();

    let request = SearchRequest::default().page(2, 10);
    let page = search(&tasks, &request).unwrap();

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sort_tasks(&mut sorted, SortKey::CreatedAt, true);
    let expected: Vec<u32> = ids(&sorted[10..20]);

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(
        page.items.iter().map(|t| t.id.get()).collect::<Vec<_>>(),
        expected
    );
    // newest first: ids 15 down to 6
    assert_eq!(expected.first(), Some(&15));
    assert_eq!(expected.last(), Some(&6));
}
