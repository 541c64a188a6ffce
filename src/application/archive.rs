//! Archive controller: explicit pager state in, next state and DOM effects out.
//!
//! Every handler takes the current [`ArchiveState`] by value and returns a
//! [`Transition`]. Adapters store the returned state and apply the effects in
//! order; nothing here touches the document.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    application::{
        pagination::{ArticlePlacement, PageActivation, PageControl, Paginator},
        router::{RouteDecision, route},
        settings::PagerSettings,
        sidebar::{EntryOffset, ScrollMetrics, ScrollTarget, SidebarSync},
    },
    domain::{
        articles::ArticleList, error::DomainError, fragment, sections::ActiveItem,
        sections::SidebarEntry, types::ArticleId, types::PageNumber,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ArchiveState {
    pub active_page: Option<PageNumber>,
    /// Page last written to or read from the fragment.
    pub last_seen_hash: Option<PageNumber>,
    pub active_item: ActiveItem,
}

/// A single DOM mutation requested by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum Effect {
    ClearSidebar,
    SetVisibility(ArticlePlacement),
    AppendSidebarEntry(SidebarEntry),
    ActivateControl { page: PageNumber },
    ScrollTo(ScrollTarget),
    WriteFragment { fragment: String },
    /// Measure the document and feed the result back through `on_scroll`.
    RefreshActiveItem,
    HighlightItem { item: ActiveItem },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ArchiveState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: ArchiveState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    /// Page activated by this transition, if any.
    pub fn activated(&self) -> Option<PageNumber> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::ActivateControl { page } => Some(*page),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveController {
    paginator: Paginator,
    sidebar: SidebarSync,
}

impl ArchiveController {
    pub fn new(articles: ArticleList, settings: &PagerSettings) -> Result<Self, DomainError> {
        Ok(Self {
            paginator: Paginator::new(articles)?,
            sidebar: SidebarSync::new(settings.thresholds),
        })
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn controls(&self) -> Vec<PageControl> {
        self.paginator.controls()
    }

    /// Resolve the initial page from the fragment present at load time.
    pub fn on_load(&self, fragment: Option<&str>) -> Transition {
        self.on_fragment(ArchiveState::default(), fragment)
    }

    /// React to a fragment observation (change notification or poll tick).
    pub fn on_fragment(&self, state: ArchiveState, fragment: Option<&str>) -> Transition {
        let decision = route(
            fragment,
            state.last_seen_hash,
            state.active_page.is_some(),
            self.paginator.page_count(),
        );
        match decision {
            RouteDecision::Activate(page) => self.activate(state, page),
            RouteDecision::Ignore(_) => Transition::unchanged(state),
        }
    }

    /// A pagination control was clicked.
    pub fn on_control_click(
        &self,
        state: ArchiveState,
        page: PageNumber,
    ) -> Result<Transition, DomainError> {
        self.paginator.layout().check(page)?;
        Ok(self.activate(state, page))
    }

    /// Recompute the highlighted sidebar item from the current geometry.
    pub fn on_scroll(
        &self,
        mut state: ArchiveState,
        metrics: &ScrollMetrics,
        offsets: &[EntryOffset],
    ) -> Transition {
        let item = self.sidebar.select_active(metrics, offsets);
        if item == state.active_item {
            return Transition::unchanged(state);
        }
        state.active_item = item.clone();
        Transition {
            state,
            effects: vec![Effect::HighlightItem { item }],
        }
    }

    /// A sidebar entry was clicked: bring its article to the top of the viewport.
    pub fn on_entry_click(
        &self,
        state: ArchiveState,
        article: &ArticleId,
        offsets: &[EntryOffset],
    ) -> Transition {
        match offsets.iter().find(|offset| &offset.article == article) {
            Some(offset) => Transition {
                state,
                effects: vec![Effect::ScrollTo(self.sidebar.entry_target(offset))],
            },
            None => {
                warn!(%article, "sidebar entry has no visible article");
                Transition::unchanged(state)
            }
        }
    }

    /// The bottom sentinel was clicked.
    pub fn on_bottom_click(&self, state: ArchiveState, metrics: &ScrollMetrics) -> Transition {
        let target = self.sidebar.bottom_target(&state.active_item, metrics);
        Transition {
            state,
            effects: vec![Effect::ScrollTo(target)],
        }
    }

    fn activate(&self, mut state: ArchiveState, page: PageNumber) -> Transition {
        let activation = match self.paginator.activate(page) {
            Ok(activation) => activation,
            Err(err) => {
                warn!(error = %err, %page, "page activation rejected");
                return Transition::unchanged(state);
            }
        };
        debug!(%page, shown = activation.sidebar.len(), "page activated");

        state.active_page = Some(page);
        state.last_seen_hash = Some(page);
        // The sidebar is rebuilt, so the highlight has to be re-applied.
        state.active_item = ActiveItem::None;

        Transition {
            state,
            effects: activation_effects(activation),
        }
    }
}

fn activation_effects(activation: PageActivation) -> Vec<Effect> {
    let PageActivation {
        page,
        placements,
        sidebar,
    } = activation;

    let mut effects = Vec::with_capacity(placements.len() + sidebar.len() + 5);
    effects.push(Effect::ClearSidebar);
    effects.extend(placements.into_iter().map(Effect::SetVisibility));
    effects.extend(sidebar.into_iter().map(Effect::AppendSidebarEntry));
    effects.push(Effect::ActivateControl { page });
    effects.push(Effect::ScrollTo(ScrollTarget {
        top: 0.0,
        smooth: true,
    }));
    effects.push(Effect::WriteFragment {
        fragment: fragment::encode(page),
    });
    effects.push(Effect::RefreshActiveItem);
    effects
}
