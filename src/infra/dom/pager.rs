//! Live pager: controller state shared by the document listeners.

use std::{cell::RefCell, rc::Rc};

use tracing::{error, info, trace, warn};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Element, Event, EventTarget, Node, Window};

use crate::{
    application::{
        archive::{ArchiveController, ArchiveState, Effect, Transition},
        settings::{HashWatch, PagerSettings},
    },
    domain::{articles::ArticleList, types::ArticleId, types::PageNumber},
    infra::error::InfraError,
};

use super::document::{ATTR_ARTICLE, ATTR_PAGE, ArchiveDocument, js_error};

pub(super) struct Pager {
    document: ArchiveDocument,
    controller: ArchiveController,
    state: RefCell<ArchiveState>,
}

impl Pager {
    /// Discover the archive, insert the pagination and activate the initial page.
    ///
    /// Returns `Ok(None)` when the document has no articles to paginate.
    pub(super) fn mount(
        window: Window,
        settings: &PagerSettings,
    ) -> Result<Option<Rc<Self>>, InfraError> {
        let mut document = ArchiveDocument::discover(window, settings.selectors.clone())?;
        let records = document.records();
        if records.is_empty() {
            info!("archive has no articles; pager not mounted");
            return Ok(None);
        }

        let articles = ArticleList::new(records).map_err(|err| InfraError::dom(err.to_string()))?;
        let controller = ArchiveController::new(articles, settings)
            .map_err(|err| InfraError::dom(err.to_string()))?;
        document.build_controls(&controller.controls())?;

        let pager = Rc::new(Self {
            document,
            controller,
            state: RefCell::new(ArchiveState::default()),
        });

        pager.listen_controls()?;
        pager.listen_sidebar()?;
        pager.listen_scroll()?;
        match settings.hash_watch {
            HashWatch::Event => pager.listen_hashchange()?,
            HashWatch::Poll => Rc::clone(&pager).schedule_poll(settings.poll_interval.millis()),
        }

        let fragment = pager.document.location_hash();
        let loaded = pager.controller.on_load(fragment.as_deref());
        pager.commit(loaded);
        info!(
            pages = pager.controller.paginator().page_count(),
            watch = ?settings.hash_watch,
            "pager mounted"
        );
        Ok(Some(pager))
    }

    pub(super) fn state(&self) -> ArchiveState {
        self.state.borrow().clone()
    }

    pub(super) fn page_count(&self) -> usize {
        self.controller.paginator().page_count()
    }

    pub(super) fn go_to(&self, page: PageNumber) -> Result<(), InfraError> {
        let transition = self
            .controller
            .on_control_click(self.state(), page)
            .map_err(|err| InfraError::dom(err.to_string()))?;
        self.commit(transition);
        Ok(())
    }

    fn on_hash(&self) {
        let fragment = self.document.location_hash();
        let transition = self.controller.on_fragment(self.state(), fragment.as_deref());
        self.commit(transition);
    }

    fn on_scroll(&self) {
        let offsets = match self.document.entry_offsets() {
            Ok(offsets) => offsets,
            Err(err) => {
                warn!(error = %err, "could not measure sidebar entries");
                return;
            }
        };
        let metrics = self.document.metrics();
        let transition = self.controller.on_scroll(self.state(), &metrics, &offsets);
        self.commit(transition);
    }

    fn on_control(&self, target: &Element) {
        let Some(page) = closest(target, &format!("[{ATTR_PAGE}]"))
            .and_then(|control| control.get_attribute(ATTR_PAGE))
            .and_then(|raw| raw.parse::<u32>().ok())
            .and_then(PageNumber::new)
        else {
            return;
        };
        if let Err(err) = self.go_to(page) {
            warn!(error = %err, %page, "page control ignored");
        }
    }

    /// Returns whether the click landed on an entry or the bottom sentinel.
    fn on_sidebar(&self, target: &Element) -> bool {
        if let Some(entry) = closest(target, &format!("[{ATTR_ARTICLE}]")) {
            let Some(article) = entry
                .get_attribute(ATTR_ARTICLE)
                .and_then(|raw| ArticleId::new(raw).ok())
            else {
                return false;
            };
            match self.document.entry_offsets() {
                Ok(offsets) => {
                    let transition =
                        self.controller
                            .on_entry_click(self.state(), &article, &offsets);
                    self.commit(transition);
                }
                Err(err) => warn!(error = %err, "could not measure sidebar entries"),
            }
            return true;
        }

        let node: &Node = target;
        if self.document.bottom().contains(Some(node)) {
            let metrics = self.document.metrics();
            let transition = self.controller.on_bottom_click(self.state(), &metrics);
            self.commit(transition);
            return true;
        }
        false
    }

    /// Store the next state, then apply its effects in order.
    fn commit(&self, transition: Transition) {
        let Transition { state, effects } = transition;
        *self.state.borrow_mut() = state;

        for effect in &effects {
            if matches!(effect, Effect::RefreshActiveItem) {
                self.on_scroll();
                continue;
            }
            if let Err(err) = self.document.apply(effect) {
                error!(error = %err, ?effect, "failed to apply effect");
            }
        }
    }

    fn listen_controls(self: &Rc<Self>) -> Result<(), InfraError> {
        let Some(pagination) = self.document.pagination() else {
            return Ok(());
        };
        let pager = Rc::clone(self);
        listen(pagination, "click", move |event: Event| {
            if let Some(target) = event_element(&event) {
                event.prevent_default();
                pager.on_control(&target);
            }
        })
    }

    fn listen_sidebar(self: &Rc<Self>) -> Result<(), InfraError> {
        let pager = Rc::clone(self);
        listen(self.document.sidebar(), "click", move |event: Event| {
            if let Some(target) = event_element(&event)
                && pager.on_sidebar(&target)
            {
                // Entries carry the heading's link; stay on the archive.
                event.prevent_default();
            }
        })
    }

    fn listen_scroll(self: &Rc<Self>) -> Result<(), InfraError> {
        let pager = Rc::clone(self);
        listen(self.document.window(), "scroll", move |_event: Event| {
            pager.on_scroll();
        })
    }

    fn listen_hashchange(self: &Rc<Self>) -> Result<(), InfraError> {
        let pager = Rc::clone(self);
        listen(self.document.window(), "hashchange", move |_event: Event| {
            pager.on_hash();
        })
    }

    /// Re-arms itself after every tick, so ticks never overlap.
    fn schedule_poll(self: Rc<Self>, millis: u32) {
        let window = self.document.window().clone();
        let tick = Closure::once_into_js(move || {
            self.on_hash();
            self.schedule_poll(millis);
        });
        let timeout = i32::try_from(millis).unwrap_or(i32::MAX);
        if let Err(err) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(tick.unchecked_ref(), timeout)
        {
            error!(error = ?err, "failed to schedule fragment poll");
        } else {
            trace!(millis, "fragment poll scheduled");
        }
    }
}

fn listen<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<(), InfraError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_error("add event listener"))?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}
