//! Application container wiring the flows to one page.
//!
//! [`App`] owns one instance of every controller, all sharing the page's [`Dom`]
//! handle and one [`HttpJsonClient`]. Each flow keeps its own request sequencer, so
//! a slow search never discards a feed page and vice versa.

use super::pagination::PaginationController;
use super::review::ReviewFlow;
use super::search::SearchFlow;
use super::submission::SubmissionController;
use super::view::{ViewLayout, ViewStateMachine};
use crate::dom::{Dom, NodeId};
use crate::domain::error::Result;
use crate::http::{HttpJsonClient, Transport};
use crate::storage::SubmissionCache;
use crate::Config;
use std::cell::RefCell;
use std::rc::Rc;

/// Id of the page-wide loading indicator.
pub const LOADER_ID: &str = "global-loader";

/// The client for one page load.
#[derive(Debug)]
pub struct App {
    pub(super) config: Config,
    pub(super) dom: Dom,
    pub(super) client: HttpJsonClient,
    pub(super) cache: Rc<SubmissionCache>,
    pub(super) search: SearchFlow,
    pub(super) review: ReviewFlow,
    pub(super) feed: PaginationController,
    view: RefCell<Option<ViewStateMachine>>,
}

impl App {
    #[must_use]
    pub fn new(
        config: Config,
        dom: Dom,
        transport: Rc<dyn Transport>,
        cache: SubmissionCache,
    ) -> Self {
        let client = HttpJsonClient::new(transport);
        let controller = SubmissionController::new(dom.clone(), client.clone());
        let cache = Rc::new(cache);

        let search = SearchFlow::new(controller.clone(), config.url(&config.search_endpoint));
        let review = ReviewFlow::new(
            controller.clone(),
            Rc::clone(&cache),
            config.url(&config.submit_endpoint),
            config.url(&config.confirmation_page),
        );
        let feed = PaginationController::new(controller, config.url(&config.feed_endpoint));

        Self {
            config,
            dom,
            client,
            cache,
            search,
            review,
            feed,
            view: RefCell::new(None),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn dom(&self) -> &Dom {
        &self.dom
    }

    #[must_use]
    pub fn cache(&self) -> &SubmissionCache {
        &self.cache
    }

    /// The page's loading indicator, if it has one.
    pub(super) fn loader(&self) -> Option<NodeId> {
        self.dom.read(|doc| doc.get_element_by_id(LOADER_ID))
    }

    /// Runs `f` against the page's view machine, resolving its layout on first use.
    pub(super) fn with_view<R>(
        &self,
        f: impl FnOnce(&mut ViewStateMachine) -> Result<R>,
    ) -> Result<R> {
        let mut slot = self.view.borrow_mut();
        if let Some(view) = slot.as_mut() {
            return f(view);
        }
        let layout = ViewLayout::resolve(&self.dom)?;
        f(slot.insert(ViewStateMachine::new(self.dom.clone(), layout)))
    }
}
