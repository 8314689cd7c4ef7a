//! Paginator: 1-indexed page slicing with total count.

use serde::{Deserialize, Serialize};

use crate::domain::{SearchError, Task};

/// SearchPage は 1 ページ分の結果と、切り出し前の総件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<Task>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl SearchPage {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn total_pages(total: usize, page_size: u32) -> usize {
    match page_size {
        0 => 0,
        size => total.div_ceil(size as usize),
    }
}

/// `[(page-1)*page_size, page*page_size)` を境界で切り詰めて返す
///
/// 範囲外のページは空の items（エラーではない）。
/// page_size == 0 / page == 0 は InvalidArgument。
pub fn paginate(sorted: &[&Task], page: u32, page_size: u32) -> Result<SearchPage, SearchError> {
    if page_size == 0 {
        return Err(SearchError::invalid("page_size", "must be positive, got 0"));
    }
    if page == 0 {
        return Err(SearchError::invalid("page", "pages are 1-indexed, got 0"));
    }

    let size = page_size as usize;
    let start = (page as usize - 1).saturating_mul(size);
    let items = sorted
        .iter()
        .skip(start)
        .take(size)
        .map(|task| (*task).clone())
        .collect();

    Ok(SearchPage {
        items,
        total: sorted.len(),
        page,
        page_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::task;
    use rstest::rstest;

    fn tasks(n: u32) -> Vec<Task> {
        (1..=n).map(|i| task(i, 5, u64::from(i))).collect()
    }

    fn page_ids(page: &SearchPage) -> Vec<u32> {
        page.items.iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn second_page_of_twenty_five() {
        let tasks = tasks(25);
        let refs: Vec<&Task> = tasks.iter().collect();
        let page = paginate(&refs, 2, 10).unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 25);
        assert_eq!(page_ids(&page), (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn last_page_is_clipped() {
        let tasks = tasks(25);
        let refs: Vec<&Task> = tasks.iter().collect();
        let page = paginate(&refs, 3, 10).unwrap();
        assert_eq!(page_ids(&page), (21..=25).collect::<Vec<_>>());
    }

    #[rstest]
    #[case(4, 10)]
    #[case(u32::MAX, u32::MAX)]
    fn page_past_the_end_is_empty_not_error(#[case] page: u32, #[case] size: u32) {
        let tasks = tasks(25);
        let refs: Vec<&Task> = tasks.iter().collect();
        let page = paginate(&refs, page, size).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, 25);
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let tasks = tasks(3);
        let refs: Vec<&Task> = tasks.iter().collect();
        let err = paginate(&refs, 1, 0).unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidArgument { field: "page_size", .. }
        ));
    }

    #[test]
    fn zero_page_is_invalid() {
        let err = paginate(&[], 0, 10).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument { field: "page", .. }));
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(5, 0, 0)]
    fn counts_pages(#[case] total: usize, #[case] size: u32, #[case] expected: usize) {
        assert_eq!(total_pages(total, size), expected);
    }
}
