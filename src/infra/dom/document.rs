//! The archive document: element discovery, geometry and effect application.

use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use crate::{
    application::{
        archive::Effect,
        pagination::{ArticlePlacement, PageControl},
        settings::Selectors,
        sidebar::{EntryOffset, ScrollMetrics, ScrollTarget},
    },
    domain::{
        articles::ArticleRecord,
        sections::{ActiveItem, SidebarEntry},
        types::{ArticleId, ArticleVisibility, PageNumber},
    },
    infra::error::InfraError,
};

const CLASS_HIDDEN: &str = "hidden";
const CLASS_SHOW: &str = "show";
const CLASS_LAST: &str = "last";
const CLASS_ACTIVE: &str = "active";
const CLASS_SIDEBAR_ITEM: &str = "articles-sidebar-item";
const CLASS_PAGE_CONTROL: &str = "pagination-item";
pub(super) const ATTR_ARTICLE: &str = "data-article";
pub(super) const ATTR_PAGE: &str = "data-page";

pub(super) fn js_error(context: &'static str) -> impl FnOnce(JsValue) -> InfraError {
    move |err| InfraError::dom(format!("{context}: {err:?}"))
}

struct ArticleNode {
    id: ArticleId,
    element: Element,
    heading: Option<Element>,
}

pub(super) struct ArchiveDocument {
    window: Window,
    document: Document,
    selectors: Selectors,
    articles: Vec<ArticleNode>,
    sidebar: Element,
    bottom: Element,
    pagination: Option<Element>,
    controls: Vec<(PageNumber, Element)>,
}

impl ArchiveDocument {
    /// Locate the landmarks and article blocks of the current document.
    pub(super) fn discover(window: Window, selectors: Selectors) -> Result<Self, InfraError> {
        let document = window
            .document()
            .ok_or_else(|| InfraError::dom("window has no document"))?;

        let content = require(&document, &selectors.content)?;
        let sidebar = require(&document, &selectors.sidebar)?;
        let bottom = require(&document, &selectors.sidebar_bottom)?;

        let nodes = content
            .query_selector_all(&selectors.article)
            .map_err(js_error("query articles"))?;
        let mut articles = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let position = articles.len();
            let id = element
                .get_attribute("id")
                .and_then(|raw| ArticleId::new(raw).ok())
                .unwrap_or_else(|| ArticleId::synthetic(position));
            let heading = element
                .query_selector(&selectors.heading)
                .map_err(js_error("query heading"))?;
            if heading.is_none() {
                warn!(article = %id, "article has no heading");
            }
            articles.push(ArticleNode {
                id,
                element,
                heading,
            });
        }

        Ok(Self {
            window,
            document,
            selectors,
            articles,
            sidebar,
            bottom,
            pagination: None,
            controls: Vec::new(),
        })
    }

    pub(super) fn records(&self) -> Vec<ArticleRecord> {
        self.articles
            .iter()
            .map(|node| {
                let (html, text) = node
                    .heading
                    .as_ref()
                    .map(|heading| (heading.inner_html(), heading.text_content().unwrap_or_default()))
                    .unwrap_or_default();
                ArticleRecord::new(node.id.clone(), html, text)
            })
            .collect()
    }

    pub(super) fn window(&self) -> &Window {
        &self.window
    }

    pub(super) fn sidebar(&self) -> &Element {
        &self.sidebar
    }

    pub(super) fn bottom(&self) -> &Element {
        &self.bottom
    }

    pub(super) fn pagination(&self) -> Option<&Element> {
        self.pagination.as_ref()
    }

    /// Insert the pagination container before the footer and fill it with controls.
    pub(super) fn build_controls(&mut self, controls: &[PageControl]) -> Result<(), InfraError> {
        let footer = require(&self.document, &self.selectors.footer)?;
        let parent = footer
            .parent_node()
            .ok_or_else(|| InfraError::dom("footer is detached from the document"))?;

        let container = self
            .document
            .create_element("div")
            .map_err(js_error("create pagination"))?;
        container.set_id(&self.selectors.pagination_id);

        for control in controls {
            let item = self
                .document
                .create_element("a")
                .map_err(js_error("create page control"))?;
            item.set_class_name(CLASS_PAGE_CONTROL);
            item.set_attribute("role", "button")
                .map_err(js_error("set control role"))?;
            item.set_attribute(ATTR_PAGE, &control.label)
                .map_err(js_error("set control page"))?;
            item.set_text_content(Some(&control.label));
            container
                .append_child(&item)
                .map_err(js_error("append page control"))?;
            self.controls.push((control.page, item));
        }

        parent
            .insert_before(&container, Some(&footer))
            .map_err(js_error("insert pagination"))?;
        self.pagination = Some(container);
        Ok(())
    }

    pub(super) fn location_hash(&self) -> Option<String> {
        self.window
            .location()
            .hash()
            .ok()
            .filter(|hash| !hash.is_empty())
    }

    pub(super) fn metrics(&self) -> ScrollMetrics {
        let scroll_top = self.window.scroll_y().unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        let document_height = self
            .document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0);
        ScrollMetrics::new(scroll_top, viewport_height, document_height)
    }

    /// Offsets of the articles currently mirrored in the sidebar, in sidebar order.
    pub(super) fn entry_offsets(&self) -> Result<Vec<EntryOffset>, InfraError> {
        let scroll_top = self.window.scroll_y().unwrap_or(0.0);
        let entries = self
            .sidebar
            .query_selector_all(&format!("[{ATTR_ARTICLE}]"))
            .map_err(js_error("query sidebar entries"))?;

        let mut offsets = Vec::with_capacity(entries.length() as usize);
        for index in 0..entries.length() {
            let Some(raw) = entries
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
                .and_then(|entry| entry.get_attribute(ATTR_ARTICLE))
            else {
                continue;
            };
            let Some(node) = self.articles.iter().find(|node| node.id.as_str() == raw) else {
                warn!(article = %raw, "sidebar entry without article");
                continue;
            };
            let article_top = node.element.get_bounding_client_rect().top() + scroll_top;
            let heading_top = node
                .heading
                .as_ref()
                .map(|heading| heading.get_bounding_client_rect().top() + scroll_top)
                .unwrap_or(article_top);
            offsets.push(EntryOffset {
                article: node.id.clone(),
                article_top,
                heading_top,
            });
        }
        Ok(offsets)
    }

    /// Apply one effect. `RefreshActiveItem` is resolved by the caller.
    pub(super) fn apply(&self, effect: &Effect) -> Result<(), InfraError> {
        match effect {
            Effect::ClearSidebar => self.clear_sidebar(),
            Effect::SetVisibility(placement) => self.set_visibility(placement),
            Effect::AppendSidebarEntry(entry) => self.append_entry(entry),
            Effect::ActivateControl { page } => self.activate_control(*page),
            Effect::ScrollTo(target) => {
                self.scroll_to(target);
                Ok(())
            }
            Effect::WriteFragment { fragment } => self.write_fragment(fragment),
            Effect::HighlightItem { item } => self.highlight(item),
            Effect::RefreshActiveItem => Ok(()),
        }
    }

    fn clear_sidebar(&self) -> Result<(), InfraError> {
        let entries = self
            .sidebar
            .query_selector_all(&format!("[{ATTR_ARTICLE}]"))
            .map_err(js_error("query sidebar entries"))?;
        for index in 0..entries.length() {
            if let Some(entry) = entries.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                entry.remove();
            }
        }
        Ok(())
    }

    fn set_visibility(&self, placement: &ArticlePlacement) -> Result<(), InfraError> {
        let Some(node) = self.articles.iter().find(|node| node.id == placement.article) else {
            return Err(InfraError::dom(format!(
                "article `{}` is not part of the document",
                placement.article
            )));
        };
        let classes = node.element.class_list();
        match placement.visibility {
            ArticleVisibility::Hidden => {
                classes.add_1(CLASS_HIDDEN).map_err(js_error("hide article"))?;
                classes.remove_1(CLASS_SHOW).map_err(js_error("hide article"))?;
                classes.remove_1(CLASS_LAST).map_err(js_error("hide article"))?;
            }
            ArticleVisibility::Shown { last } => {
                classes.remove_1(CLASS_HIDDEN).map_err(js_error("show article"))?;
                classes.add_1(CLASS_SHOW).map_err(js_error("show article"))?;
                classes
                    .toggle_with_force(CLASS_LAST, last)
                    .map_err(js_error("mark last article"))?;
            }
        }
        Ok(())
    }

    fn append_entry(&self, entry: &SidebarEntry) -> Result<(), InfraError> {
        let item = self
            .document
            .create_element("li")
            .map_err(js_error("create sidebar entry"))?;
        item.set_id(&entry.entry_id);
        item.set_class_name(CLASS_SIDEBAR_ITEM);
        item.set_attribute(ATTR_ARTICLE, entry.article.as_str())
            .map_err(js_error("set sidebar article"))?;
        item.set_inner_html(&entry.heading_html);
        self.sidebar
            .insert_before(&item, Some(&self.bottom))
            .map_err(js_error("insert sidebar entry"))?;
        Ok(())
    }

    fn activate_control(&self, page: PageNumber) -> Result<(), InfraError> {
        for (control_page, element) in &self.controls {
            element
                .class_list()
                .toggle_with_force(CLASS_ACTIVE, *control_page == page)
                .map_err(js_error("toggle page control"))?;
        }
        Ok(())
    }

    fn scroll_to(&self, target: &ScrollTarget) {
        let options = ScrollToOptions::new();
        options.set_top(target.top);
        if target.smooth {
            options.set_behavior(ScrollBehavior::Smooth);
        }
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn write_fragment(&self, fragment: &str) -> Result<(), InfraError> {
        let location = self.window.location();
        let current = location.hash().map_err(js_error("read location hash"))?;
        if current.trim_start_matches('#') == fragment {
            return Ok(());
        }
        debug!(fragment, "writing location hash");
        location.set_hash(fragment).map_err(js_error("write location hash"))
    }

    fn highlight(&self, item: &ActiveItem) -> Result<(), InfraError> {
        let entries = self
            .sidebar
            .query_selector_all(&format!("[{ATTR_ARTICLE}]"))
            .map_err(js_error("query sidebar entries"))?;
        let wanted = item.article().map(ArticleId::as_str);
        for index in 0..entries.length() {
            let Some(entry) = entries.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let active = wanted.is_some() && entry.get_attribute(ATTR_ARTICLE).as_deref() == wanted;
            entry
                .class_list()
                .toggle_with_force(CLASS_ACTIVE, active)
                .map_err(js_error("toggle sidebar entry"))?;
        }
        self.bottom
            .class_list()
            .toggle_with_force(CLASS_ACTIVE, item.is_bottom())
            .map_err(js_error("toggle bottom sentinel"))?;
        Ok(())
    }
}

fn require(document: &Document, selector: &str) -> Result<Element, InfraError> {
    document
        .query_selector(selector)
        .map_err(js_error("query landmark"))?
        .ok_or_else(|| InfraError::dom(format!("missing `{selector}`")))
}
