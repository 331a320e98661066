/// Input controller: applies user interactions to the filter state and
/// keeps the current view in sync.
///
/// Filter, search and reset actions re-filter the full catalog. A sort change
/// only reorders the last view, so records that tie under the new key keep the
/// order they had on screen.
use tracing::debug;

use crate::filter::{FilterAction, FilterCategory, FilterState, FilterValue};
use crate::model::ApproachRecord;
use crate::render::{render, DisplayTree};
use crate::sort::{sort_with, SortKey};
use crate::store::CatalogStore;

pub struct CatalogSession {
    store: CatalogStore,
    state: FilterState,
    /// Indices into `store.approaches()`, in display order.
    view: Vec<usize>,
}

impl CatalogSession {
    pub fn new(store: CatalogStore) -> Self {
        let mut session = Self {
            store,
            state: FilterState::default(),
            view: Vec::new(),
        };
        session.refilter();
        session
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn view(&self) -> Vec<&ApproachRecord> {
        let all = self.store.approaches();
        self.view.iter().map(|&i| &all[i]).collect()
    }

    pub fn dispatch(&mut self, action: FilterAction) -> DisplayTree {
        let refilter = action.requires_refilter();
        debug!(action = ?action, "filter action");
        self.state = self.state.apply(action);
        if refilter {
            self.refilter();
        } else {
            self.resort();
        }
        self.current()
    }

    pub fn set_filter(&mut self, category: FilterCategory, value: FilterValue) -> DisplayTree {
        self.dispatch(FilterAction::SetFilter(category, value))
    }

    pub fn set_search(&mut self, query: impl Into<String>) -> DisplayTree {
        self.dispatch(FilterAction::SetSearch(query.into()))
    }

    pub fn set_sort(&mut self, key: SortKey) -> DisplayTree {
        self.dispatch(FilterAction::SetSort(key))
    }

    pub fn reset(&mut self) -> DisplayTree {
        self.dispatch(FilterAction::Reset)
    }

    /// Swap in a freshly loaded store and rebuild the view with the current
    /// filter state. A failed store replaces a good one too, like a page
    /// reload that errors.
    pub fn replace_store(&mut self, store: CatalogStore) -> DisplayTree {
        self.store = store;
        self.refilter();
        self.current()
    }

    pub fn current(&self) -> DisplayTree {
        if self.store.is_failed() {
            return DisplayTree::load_error();
        }
        render(&self.view())
    }

    fn refilter(&mut self) {
        let all = self.store.approaches();
        let mut view: Vec<usize> = all
            .iter()
            .enumerate()
            .filter(|(_, a)| self.state.matches(a))
            .map(|(i, _)| i)
            .collect();
        sort_with(&mut view, self.state.sort_key, |&i| &all[i]);
        debug!(visible = view.len(), total = all.len(), "view recomputed");
        self.view = view;
    }

    fn resort(&mut self) {
        let all = self.store.approaches();
        sort_with(&mut self.view, self.state.sort_key, |&i| &all[i]);
    }
}
