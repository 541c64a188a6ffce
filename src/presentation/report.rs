//! Plain-text and JSON reports for the `plan` and `route` commands.

use std::fmt;

use serde::Serialize;

use crate::{
    application::{
        archive::{Effect, Transition},
        error::AppError,
        pagination::Paginator,
        router::{IgnoreReason, RouteDecision},
    },
    domain::{
        fragment,
        sections::SidebarEntry,
        types::{ArticleId, ArticleVisibility, PageNumber},
    },
};

#[derive(Debug, Clone, Serialize)]
pub struct ControlRow {
    pub page: PageNumber,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleRow {
    pub id: ArticleId,
    pub heading: String,
    pub visibility: ArticleVisibility,
}

/// What the archive looks like once a page has been activated.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub source: String,
    pub article_count: usize,
    pub page_count: usize,
    pub page: PageNumber,
    pub fragment: String,
    pub controls: Vec<ControlRow>,
    pub articles: Vec<ArticleRow>,
    pub sidebar: Vec<SidebarEntry>,
    pub missing_landmarks: Vec<&'static str>,
}

impl PlanReport {
    /// Build the report from the effects of an activating transition.
    pub fn from_transition(
        source: impl Into<String>,
        paginator: &Paginator,
        transition: &Transition,
        missing_landmarks: Vec<&'static str>,
    ) -> Result<Self, AppError> {
        let page = transition
            .activated()
            .ok_or_else(|| AppError::unexpected("transition did not activate a page"))?;

        let mut articles = Vec::new();
        let mut sidebar = Vec::new();
        let mut written = None;
        for effect in &transition.effects {
            match effect {
                Effect::SetVisibility(placement) => articles.push(ArticleRow {
                    id: placement.article.clone(),
                    heading: paginator
                        .article(&placement.article)
                        .map(|record| record.heading_text.clone())
                        .unwrap_or_default(),
                    visibility: placement.visibility,
                }),
                Effect::AppendSidebarEntry(entry) => sidebar.push(entry.clone()),
                Effect::WriteFragment { fragment } => written = Some(fragment.clone()),
                _ => {}
            }
        }

        let controls = paginator
            .controls()
            .into_iter()
            .map(|control| ControlRow {
                active: control.page == page,
                page: control.page,
                label: control.label,
            })
            .collect();

        Ok(Self {
            source: source.into(),
            article_count: paginator.articles().len(),
            page_count: paginator.page_count(),
            page,
            fragment: format!("#{}", written.unwrap_or_else(|| fragment::encode(page))),
            controls,
            articles,
            sidebar,
            missing_landmarks,
        })
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source: {}", self.source)?;
        writeln!(
            f,
            "articles: {}, pages: {}",
            self.article_count, self.page_count
        )?;
        writeln!(f, "page {} ({})", self.page, self.fragment)?;
        if !self.missing_landmarks.is_empty() {
            writeln!(f, "missing: {}", self.missing_landmarks.join(", "))?;
        }

        let controls = self
            .controls
            .iter()
            .map(|control| {
                if control.active {
                    format!("[{}]", control.label)
                } else {
                    control.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f)?;
        writeln!(f, "controls: {controls}")?;

        let id_width = self
            .articles
            .iter()
            .map(|row| row.id.as_str().len())
            .max()
            .unwrap_or(0);
        writeln!(f)?;
        writeln!(f, "articles:")?;
        for row in &self.articles {
            let state = match row.visibility {
                ArticleVisibility::Hidden => "hidden",
                ArticleVisibility::Shown { last: false } => "shown",
                ArticleVisibility::Shown { last: true } => "shown last",
            };
            writeln!(
                f,
                "  {state:<10}  {:<id_width$}  {}",
                row.id.as_str(),
                row.heading
            )?;
        }

        writeln!(f)?;
        writeln!(f, "sidebar:")?;
        for entry in &self.sidebar {
            writeln!(f, "  {}  {}", entry.entry_id, entry.heading_text)?;
        }
        Ok(())
    }
}

/// One observed fragment and how the router treated it.
#[derive(Debug, Clone, Serialize)]
pub struct RouteStep {
    pub fragment: String,
    pub decision: RouteDecision,
    pub active_page: Option<PageNumber>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub source: String,
    pub page_count: usize,
    pub steps: Vec<RouteStep>,
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source: {}", self.source)?;
        writeln!(f, "pages: {}", self.page_count)?;
        let width = self
            .steps
            .iter()
            .map(|step| step.fragment.len())
            .max()
            .unwrap_or(0);
        for step in &self.steps {
            let decision = match step.decision {
                RouteDecision::Activate(page) => format!("activate {page}"),
                RouteDecision::Ignore(reason) => format!("ignore ({})", ignore_label(reason)),
            };
            let active = step
                .active_page
                .map(|page| page.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "  {:<width$}  {decision:<24}  active: {active}",
                step.fragment
            )?;
        }
        Ok(())
    }
}

fn ignore_label(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::AlreadyActive => "already active",
        IgnoreReason::Malformed => "malformed",
        IgnoreReason::OutOfRange => "out of range",
    }
}
