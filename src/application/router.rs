//! Two-way binding between the active page and the URL fragment.

use serde::Serialize;
use tracing::debug;

use crate::domain::{fragment, types::PageNumber};

/// Outcome of observing the current fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "detail")]
pub enum RouteDecision {
    /// Activate the page (either encoded by the fragment or the default first page).
    Activate(PageNumber),
    /// Nothing to do: the fragment is the page already seen, or it is unusable.
    Ignore(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    AlreadyActive,
    Malformed,
    OutOfRange,
}

/// Decide what an observed fragment means for the pager.
///
/// `last_seen` is the page the router last activated or wrote; `has_active` tells
/// whether any page is active yet.
pub fn route(
    raw_fragment: Option<&str>,
    last_seen: Option<PageNumber>,
    has_active: bool,
    page_count: usize,
) -> RouteDecision {
    let decoded = raw_fragment
        .filter(|value| !value.is_empty() && *value != "#")
        .map(fragment::decode);

    let decision = match decoded {
        Some(Some(page)) if page.index() >= page_count => {
            fallback(has_active, IgnoreReason::OutOfRange)
        }
        Some(Some(page)) if Some(page) == last_seen && has_active => {
            RouteDecision::Ignore(IgnoreReason::AlreadyActive)
        }
        Some(Some(page)) => RouteDecision::Activate(page),
        Some(None) => fallback(has_active, IgnoreReason::Malformed),
        None if has_active => RouteDecision::Ignore(IgnoreReason::AlreadyActive),
        None => RouteDecision::Activate(PageNumber::FIRST),
    };

    debug!(fragment = ?raw_fragment, ?last_seen, ?decision, "fragment routed");
    decision
}

fn fallback(has_active: bool, reason: IgnoreReason) -> RouteDecision {
    if has_active {
        RouteDecision::Ignore(reason)
    } else {
        RouteDecision::Activate(PageNumber::FIRST)
    }
}
