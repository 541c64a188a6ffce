//! Scroll-synchronised highlighting of the sidebar.

use serde::Serialize;

use crate::{
    application::settings::ScrollThresholds,
    domain::{sections::ActiveItem, types::ArticleId},
};

/// Viewport geometry sampled from the document, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            document_height,
        }
    }
}

/// Document offsets of the article and heading backing one sidebar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryOffset {
    pub article: ArticleId,
    pub article_top: f64,
    pub heading_top: f64,
}

/// Where a click asks the viewport to go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollTarget {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SidebarSync {
    thresholds: ScrollThresholds,
}

impl SidebarSync {
    pub fn new(thresholds: ScrollThresholds) -> Self {
        Self { thresholds }
    }

    pub fn is_at_bottom(&self, metrics: &ScrollMetrics) -> bool {
        metrics.scroll_top + metrics.viewport_height
            >= metrics.document_height - self.thresholds.bottom_slack
    }

    /// Pick the item reflecting the reading position. `entries` are in document order.
    pub fn select_active(&self, metrics: &ScrollMetrics, entries: &[EntryOffset]) -> ActiveItem {
        if self.is_at_bottom(metrics) {
            return ActiveItem::Bottom;
        }

        let Some(first) = entries.first() else {
            return ActiveItem::None;
        };

        if metrics.scroll_top < self.thresholds.top_zone {
            return ActiveItem::Entry(first.article.clone());
        }

        // Later headings override earlier ones: the lowest heading scrolled past wins.
        let passed = entries
            .iter()
            .rev()
            .find(|entry| entry.heading_top - self.thresholds.heading_lead < metrics.scroll_top)
            .unwrap_or(first);
        ActiveItem::Entry(passed.article.clone())
    }

    /// Align the article's top with the viewport top.
    pub fn entry_target(&self, entry: &EntryOffset) -> ScrollTarget {
        ScrollTarget {
            top: entry.article_top.max(0.0),
            smooth: true,
        }
    }

    /// Toggle between the very top and the very bottom of the document.
    pub fn bottom_target(&self, active: &ActiveItem, metrics: &ScrollMetrics) -> ScrollTarget {
        let top = if active.is_bottom() {
            0.0
        } else {
            metrics.document_height
        };
        ScrollTarget { top, smooth: true }
    }
}
