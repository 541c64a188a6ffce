//! Fixed-size pagination over the archive's article list.

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    articles::{ArticleList, ArticleRecord},
    error::DomainError,
    layout::PageLayout,
    sections::SidebarEntry,
    types::{ArticleId, ArticleVisibility, PageNumber},
};

/// A clickable page-number control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControl {
    pub page: PageNumber,
    pub label: String,
}

/// Visibility of one article after a page activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticlePlacement {
    pub article: ArticleId,
    pub visibility: ArticleVisibility,
}

/// Everything a page activation changes, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageActivation {
    pub page: PageNumber,
    pub placements: Vec<ArticlePlacement>,
    pub sidebar: Vec<SidebarEntry>,
}

impl PageActivation {
    pub fn shown(&self) -> impl Iterator<Item = &ArticleId> {
        self.placements
            .iter()
            .filter(|placement| placement.visibility.is_shown())
            .map(|placement| &placement.article)
    }
}

#[derive(Debug, Clone)]
pub struct Paginator {
    articles: ArticleList,
    layout: PageLayout,
}

impl Paginator {
    /// Build a paginator; an empty archive has nothing to paginate.
    pub fn new(articles: ArticleList) -> Result<Self, DomainError> {
        if articles.is_empty() {
            return Err(DomainError::EmptyArchive);
        }
        let layout = PageLayout::new(articles.len());
        debug!(
            articles = layout.article_count(),
            pages = layout.page_count(),
            "paginator initialised"
        );
        Ok(Self { articles, layout })
    }

    pub fn articles(&self) -> &ArticleList {
        &self.articles
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    pub fn contains(&self, page: PageNumber) -> bool {
        self.layout.contains(page)
    }

    pub fn controls(&self) -> Vec<PageControl> {
        self.layout
            .pages()
            .map(|page| PageControl {
                page,
                label: page.to_string(),
            })
            .collect()
    }

    pub fn article(&self, id: &ArticleId) -> Option<&ArticleRecord> {
        self.articles.position(id).and_then(|index| self.articles.get(index))
    }

    pub fn activate(&self, page: PageNumber) -> Result<PageActivation, DomainError> {
        self.layout.check(page)?;

        let mut placements = Vec::with_capacity(self.articles.len());
        let mut sidebar = Vec::with_capacity(self.layout.per_page());
        for (index, article) in self.articles.iter().enumerate() {
            let visibility = self.layout.visibility(page, index);
            if visibility.is_shown() {
                sidebar.push(SidebarEntry::for_article(article));
            }
            placements.push(ArticlePlacement {
                article: article.id.clone(),
                visibility,
            });
        }

        Ok(PageActivation {
            page,
            placements,
            sidebar,
        })
    }
}
