//! Sort engine.
//!
//! - timestamp / 数値キーは生の値で比較（期限なしは 0 = epoch として扱う）
//! - priority は序数 Low=1 .. Urgent=4 で比較
//! - 同値のときは id の昇順（方向に関係なく）で決定的に並べる

use std::cmp::Ordering;

use crate::domain::{SortKey, Task};

/// 並べ替えに使うキー値
///
/// i128 に揃えるので、負の timestamp と u64 全域の Balance を損失なく比較できます。
pub fn sort_value(task: &Task, key: SortKey) -> i128 {
    match key {
        SortKey::CreatedAt => i128::from(task.created_at.timestamp_millis()),
        SortKey::UpdatedAt => i128::from(task.updated_at.timestamp_millis()),
        SortKey::Deadline => i128::from(task.deadline.map_or(0, |d| d.timestamp_millis())),
        SortKey::Reward => i128::from(task.reward),
        SortKey::Difficulty => i128::from(task.difficulty.get()),
        SortKey::Priority => i128::from(task.priority.ordinal()),
    }
}

/// Three-way comparator with the id tie-break.
pub fn compare(a: &Task, b: &Task, key: SortKey, descending: bool) -> Ordering {
    let primary = sort_value(a, key).cmp(&sort_value(b, key));
    let primary = if descending { primary.reverse() } else { primary };
    primary.then_with(|| a.id.cmp(&b.id))
}

pub fn sort_tasks(tasks: &mut [&Task], key: SortKey, descending: bool) {
    tasks.sort_by(|a, b| compare(a, b, key, descending));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_tasks, task};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sorted_ids(tasks: &[Task], key: SortKey, descending: bool) -> Vec<u32> {
        let mut refs: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut refs, key, descending);
        refs.iter().map(|t| t.id.get()).collect()
    }

    #[rstest]
    #[case::created_desc(SortKey::CreatedAt, true, vec![5, 4, 3, 2, 1])]
    #[case::created_asc(SortKey::CreatedAt, false, vec![1, 2, 3, 4, 5])]
    #[case::updated_desc(SortKey::UpdatedAt, true, vec![1, 2, 5, 4, 3])]
    #[case::reward_desc(SortKey::Reward, true, vec![4, 1, 2, 5, 3])]
    #[case::difficulty_asc(SortKey::Difficulty, false, vec![3, 5, 2, 1, 4])]
    #[case::priority_desc(SortKey::Priority, true, vec![4, 1, 2, 5, 3])]
    #[case::deadline_asc(SortKey::Deadline, false, vec![3, 5, 4, 2, 1])]
    fn sorts_by_key(#[case] key: SortKey, #[case] desc: bool, #[case] expected: Vec<u32>) {
        assert_eq!(sorted_ids(&sample_tasks(), key, desc), expected);
    }

    #[test]
    fn missing_deadline_sorts_as_earliest() {
        let tasks = sample_tasks();
        let ids = sorted_ids(&tasks, SortKey::Deadline, true);
        assert_eq!(ids, vec![1, 2, 4, 3, 5]);
    }

    #[test]
    fn ties_break_by_id_ascending_in_both_directions() {
        let tasks = vec![task(3, 5, 100), task(1, 5, 100), task(2, 5, 100)];
        assert_eq!(sorted_ids(&tasks, SortKey::Reward, true), vec![1, 2, 3]);
        assert_eq!(sorted_ids(&tasks, SortKey::Reward, false), vec![1, 2, 3]);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let tasks = sample_tasks();
        let mut refs: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut refs, SortKey::Priority, true);
        let once: Vec<u32> = refs.iter().map(|t| t.id.get()).collect();
        sort_tasks(&mut refs, SortKey::Priority, true);
        let twice: Vec<u32> = refs.iter().map(|t| t.id.get()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn rewards_above_i64_range_keep_their_order() {
        let above_i64 = u64::try_from(i64::MAX).unwrap() + 1;
        let tasks = vec![task(1, 5, above_i64), task(2, 5, u64::MAX), task(3, 5, 7)];
        assert_eq!(sorted_ids(&tasks, SortKey::Reward, true), vec![2, 1, 3]);
        assert_eq!(sorted_ids(&tasks, SortKey::Reward, false), vec![3, 1, 2]);
        assert!(sort_value(&tasks[1], SortKey::Reward) > sort_value(&tasks[0], SortKey::Reward));
    }
}
