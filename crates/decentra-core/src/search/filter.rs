//! Filter engine: conjunction of optional predicates over a task snapshot.

use super::matcher::Needle;
use crate::domain::{SearchFilters, Task};

/// Filters prepared for one pass (needles lowercased once).
struct Prepared<'f> {
    filters: &'f SearchFilters,
    keyword: Option<Needle>,
    creator: Option<Needle>,
    assignee: Option<Needle>,
}

impl<'f> Prepared<'f> {
    fn new(filters: &'f SearchFilters) -> Self {
        Self {
            filters,
            keyword: filters.keyword.as_deref().and_then(Needle::new),
            creator: filters.creator.as_deref().and_then(Needle::new),
            assignee: filters.assignee.as_deref().and_then(Needle::new),
        }
    }

    fn matches(&self, task: &Task) -> bool {
        let f = self.filters;

        if let Some(keyword) = &self.keyword
            && !(keyword.is_in(&task.title) || keyword.is_in(&task.description))
        {
            return false;
        }
        if f.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if f.priority.is_some_and(|priority| task.priority != priority) {
            return false;
        }
        if let Some(range) = &f.difficulty_range
            && !range.contains(&task.difficulty.get())
        {
            return false;
        }
        if let Some(range) = &f.reward_range
            && !range.contains(&task.reward)
        {
            return false;
        }
        if let Some(creator) = &self.creator
            && !creator.is_in(task.creator.as_str())
        {
            return false;
        }
        if let Some(assignee) = &self.assignee
            && !task
                .assignee
                .as_ref()
                .is_some_and(|account| assignee.is_in(account.as_str()))
        {
            return false;
        }
        if let Some(range) = &f.deadline_range
            && !task.deadline.is_some_and(|deadline| range.contains(&deadline))
        {
            return false;
        }
        if let Some(range) = &f.created_range
            && !range.contains(&task.created_at)
        {
            return false;
        }
        if f.unassigned_only && task.assignee.is_some() {
            return false;
        }
        if f.has_deadline && task.deadline.is_none() {
            return false;
        }
        true
    }
}

/// 条件を満たすタスクを元の順序のまま返す（入力は変更しない）
pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &SearchFilters) -> Vec<&'a Task> {
    let prepared = Prepared::new(filters);
    tasks.iter().filter(|task| prepared.matches(task)).collect()
}

/// Single-task check with the same semantics as [`filter_tasks`].
pub fn matches(task: &Task, filters: &SearchFilters) -> bool {
    Prepared::new(filters).matches(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskPriority, TaskStatus};
    use crate::testing::{at, sample_tasks, task};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ids(tasks: &[&Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn empty_filters_keep_everything_in_order() {
        let tasks = sample_tasks();
        let kept = filter_tasks(&tasks, &SearchFilters::default());
        assert_eq!(ids(&kept), vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    #[case::title_keyword(SearchFilters::new().keyword("react"), vec![1, 2, 4])]
    #[case::description_keyword(SearchFilters::new().keyword("POSTGRESQL"), vec![3])]
    #[case::missing_keyword(SearchFilters::new().keyword("bug"), vec![])]
    #[case::blank_keyword(SearchFilters::new().keyword(""), vec![1, 2, 3, 4, 5])]
    #[case::status(SearchFilters::new().status(TaskStatus::InProgress), vec![2])]
    #[case::priority(SearchFilters::new().priority(TaskPriority::Medium), vec![2, 5])]
    #[case::difficulty(SearchFilters::new().difficulty_range(5, 7), vec![1, 2, 5])]
    #[case::reward(SearchFilters::new().reward_range(300, 500), vec![1, 2, 5])]
    #[case::creator(SearchFilters::new().creator("ALI"), vec![1, 3])]
    #[case::assignee(SearchFilters::new().assignee("char"), vec![2])]
    #[case::unassigned(SearchFilters::new().unassigned_only(), vec![3, 4, 5])]
    #[case::has_deadline(SearchFilters::new().has_deadline(), vec![1, 2, 4])]
    #[case::combined(
        SearchFilters::new().keyword("development").priority(TaskPriority::High).difficulty_range(5, 7),
        vec![1]
    )]
    fn single_predicates(#[case] filters: SearchFilters, #[case] expected: Vec<u32>) {
        let tasks = sample_tasks();
        assert_eq!(ids(&filter_tasks(&tasks, &filters)), expected);
    }

    #[test]
    fn assignee_filter_never_matches_unassigned_tasks() {
        let tasks = vec![task(1, 5, 100)];
        let kept = filter_tasks(&tasks, &SearchFilters::new().assignee("a"));
        assert!(kept.is_empty());
    }

    #[test]
    fn exact_difficulty_range_includes_boundary() {
        let tasks = vec![task(1, 7, 500)];
        let kept = filter_tasks(&tasks, &SearchFilters::new().difficulty_range(7, 7));
        assert_eq!(ids(&kept), vec![1]);
    }

    #[test]
    fn inverted_ranges_yield_nothing() {
        let tasks = sample_tasks();
        assert!(filter_tasks(&tasks, &SearchFilters::new().difficulty_range(8, 2)).is_empty());
        assert!(filter_tasks(&tasks, &SearchFilters::new().reward_range(600, 100)).is_empty());
    }

    #[test]
    fn deadline_range_excludes_tasks_without_deadline() {
        let tasks = sample_tasks();
        let filters = SearchFilters::new().deadline_range(at(1, 0), at(30, 0));
        assert_eq!(ids(&filter_tasks(&tasks, &filters)), vec![1, 2, 4]);

        let filters = SearchFilters::new().deadline_range(at(5, 0), at(7, 0));
        assert_eq!(ids(&filter_tasks(&tasks, &filters)), vec![2]);
    }

    #[test]
    fn created_range_is_inclusive() {
        let tasks = sample_tasks();
        let filters = SearchFilters::new().created_range(at(1, 2), at(1, 3));
        assert_eq!(ids(&filter_tasks(&tasks, &filters)), vec![2, 3]);
    }

    #[test]
    fn filtering_does_not_mutate_input() {
        let tasks = sample_tasks();
        let before = tasks.clone();
        let _ = filter_tasks(&tasks, &SearchFilters::new().keyword("react"));
        assert_eq!(tasks, before);
    }

    #[test]
    fn single_task_check_agrees_with_batch() {
        let tasks = sample_tasks();
        let filters = SearchFilters::new().unassigned_only().has_deadline();
        let batch = ids(&filter_tasks(&tasks, &filters));
        let single: Vec<u32> = tasks
            .iter()
            .filter(|t| matches(t, &filters))
            .map(|t| t.id.get())
            .collect();
        assert_eq!(batch, single);
        assert_eq!(batch, vec![4]);
    }
}
