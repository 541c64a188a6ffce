//! Page arithmetic over a fixed-size article window.

use std::ops::Range;

use serde::Serialize;

use super::{
    error::DomainError,
    types::{ArticleVisibility, PER_PAGE, PageNumber},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    article_count: usize,
    per_page: usize,
}

impl PageLayout {
    pub fn new(article_count: usize) -> Self {
        Self::with_per_page(article_count, PER_PAGE)
    }

    pub(crate) fn with_per_page(article_count: usize, per_page: usize) -> Self {
        debug_assert!(per_page > 0, "per_page must be positive");
        Self {
            article_count,
            per_page,
        }
    }

    pub fn article_count(&self) -> usize {
        self.article_count
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page_count(&self) -> usize {
        let full = self.article_count / self.per_page;
        if self.article_count % self.per_page == 0 {
            full
        } else {
            full + 1
        }
    }

    pub fn contains(&self, page: PageNumber) -> bool {
        page.index() < self.page_count()
    }

    pub fn pages(&self) -> impl Iterator<Item = PageNumber> + use<> {
        (0..self.page_count()).filter_map(PageNumber::from_index)
    }

    pub fn check(&self, page: PageNumber) -> Result<(), DomainError> {
        if self.contains(page) {
            Ok(())
        } else {
            Err(DomainError::PageOutOfRange {
                page,
                page_count: self.page_count(),
            })
        }
    }

    /// Article indices shown on `page`, clamped to the listing length.
    pub fn range(&self, page: PageNumber) -> Range<usize> {
        let offset = page.index().saturating_mul(self.per_page);
        let start = offset.min(self.article_count);
        let end = offset.saturating_add(self.per_page).min(self.article_count);
        start..end
    }

    pub fn visibility(&self, page: PageNumber, index: usize) -> ArticleVisibility {
        let offset = page.index().saturating_mul(self.per_page);
        let window_end = offset.saturating_add(self.per_page);
        if index < offset || index >= window_end || index >= self.article_count {
            return ArticleVisibility::Hidden;
        }
        let last = index + 1 == window_end || index + 1 == self.article_count;
        ArticleVisibility::Shown { last }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).expect("page")
    }

    #[test]
    fn page_count_rounds_up() {
        let counts: Vec<usize> = (0..=7).map(|n| PageLayout::new(n).page_count()).collect();
        assert_eq!(counts, vec![0, 1, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn seven_articles_split_three_three_one() {
        let layout = PageLayout::new(7);
        let sizes: Vec<usize> = layout.pages().map(|p| layout.range(p).len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(layout.visibility(page(3), 6), ArticleVisibility::Shown { last: true });
    }

    #[test]
    fn window_end_is_marked_last() {
        let layout = PageLayout::new(7);
        assert_eq!(layout.visibility(page(2), 3), ArticleVisibility::Shown { last: false });
        assert_eq!(layout.visibility(page(2), 5), ArticleVisibility::Shown { last: true });
        assert_eq!(layout.visibility(page(2), 6), ArticleVisibility::Hidden);
        assert_eq!(layout.visibility(page(2), 2), ArticleVisibility::Hidden);
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        let layout = PageLayout::new(9);
        assert!(layout.check(page(3)).is_ok());
        let err = layout.check(page(4)).expect_err("page 4 rejected");
        assert!(matches!(err, DomainError::PageOutOfRange { page_count: 3, .. }));
    }
}
