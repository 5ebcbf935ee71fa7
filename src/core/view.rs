//! View state, its transitions and the projection of a page
//!
//! A view is driven by discrete user actions. Each action is a
//! [`ViewEvent`] folded into the [`ViewState`] by [`reduce`]; projecting the
//! state over the record store runs filter → sort → paginate and yields a
//! [`PaginatedResponse`].

use crate::config::ViewConfig;
use crate::core::criteria::{FilterCriteria, Predicate};
use crate::core::error::Result;
use crate::core::pipeline;
use crate::core::query::{PageWindow, PaginationMeta, QueryParams, SortKey};
use crate::core::record::{Record, RecordField};
use crate::core::store::RecordStore;
use serde::{Deserialize, Serialize};

/// Layout used to render the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

/// Transient state of one view: criteria, sort key, page window, layout
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F> {
    pub criteria: FilterCriteria<F>,
    pub sort: SortKey<F>,
    pub window: PageWindow,
    pub mode: ViewMode,
}

/// A user action changing a view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent<F> {
    /// Keystroke in the search box
    SearchChanged(String),
    /// A filter control changed
    FilterSet(Predicate<F>),
    /// A filter control was cleared
    FilterCleared(F),
    /// "Reset filters" (also clears the search term)
    FiltersReset,
    /// Column header clicked
    SortRequested(F),
    /// Page button clicked
    PageChanged(usize),
    NextPage,
    PreviousPage,
    /// Table/cards toggle
    ModeChanged(ViewMode),
}

/// Records of one page plus pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// The records of the current page
    pub data: Vec<T>,

    /// Pagination metadata (totals are after filters)
    pub pagination: PaginationMeta,

    /// Number of records in the store before filters
    pub total_records: usize,
}

impl<T> PaginatedResponse<T> {
    /// Whether the filters left nothing to show ("no records found")
    pub fn is_empty(&self) -> bool {
        self.pagination.total == 0
    }
}

impl<F: RecordField> ViewState<F> {
    /// Unfiltered state on the first page
    pub fn new(sort: SortKey<F>, page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::new(),
            sort,
            window: PageWindow::first(page_size),
            mode: ViewMode::default(),
        }
    }

    /// Initial state of a view as configured
    pub fn from_config<R: Record<Field = F>>(config: &ViewConfig) -> Result<Self> {
        Ok(Self::new(config.sort_key::<R>()?, config.page_size))
    }

    /// Build a validated state from query parameters
    ///
    /// Parameters override the configured defaults; unknown fields and
    /// malformed values are rejected. A missing limit means the configured
    /// page size; a given one is clamped to `[1, 100]`.
    pub fn from_params<R: Record<Field = F>>(
        params: &QueryParams,
        config: &ViewConfig,
    ) -> Result<Self> {
        let sort = match params.sort.as_deref() {
            Some(expr) if !expr.trim().is_empty() => SortKey::parse(expr)?,
            _ => config.sort_key::<R>()?,
        };

        let mut criteria = match params.filter_value()? {
            Some(filter) => FilterCriteria::from_json(&filter)?,
            None => FilterCriteria::new(),
        };
        if let Some(term) = &params.search {
            criteria.set_search(term.clone());
        }

        Ok(Self {
            criteria,
            sort,
            window: PageWindow::new(
                params.page(),
                params.limit().unwrap_or(config.page_size),
            ),
            mode: ViewMode::default(),
        })
    }

    /// Apply one event
    ///
    /// Any change to the criteria or the sort key resets the page to 1.
    pub fn reduce(mut self, event: ViewEvent<F>) -> Self {
        match event {
            ViewEvent::SearchChanged(term) => {
                self.criteria.set_search(term);
                self.window.page = 1;
            }
            ViewEvent::FilterSet(predicate) => {
                self.criteria.set(predicate);
                self.window.page = 1;
            }
            ViewEvent::FilterCleared(field) => {
                self.criteria.clear(field);
                self.window.page = 1;
            }
            ViewEvent::FiltersReset => {
                self.criteria.reset();
                self.window.page = 1;
            }
            ViewEvent::SortRequested(field) => {
                self.sort = self.sort.toggle(field);
                self.window.page = 1;
            }
            ViewEvent::PageChanged(page) => {
                self.window.page = page.max(1);
            }
            ViewEvent::NextPage => {
                self.window.page = self.window.page.saturating_add(1);
            }
            ViewEvent::PreviousPage => {
                self.window.page = self.window.page.saturating_sub(1).max(1);
            }
            ViewEvent::ModeChanged(mode) => {
                self.mode = mode;
            }
        }
        self
    }

    /// Run filter → sort → paginate over the records
    ///
    /// The page window is clamped to the filtered count, so an out-of-range
    /// page shows the nearest valid page instead of failing.
    pub fn project<R: Record<Field = F>>(&self, records: &[R]) -> PaginatedResponse<R> {
        let filtered = pipeline::filter(records, &self.criteria);
        let sorted = pipeline::sort(&filtered, &self.sort);
        let window = self.window.clamp(sorted.len());

        PaginatedResponse {
            data: pipeline::paginate(&sorted, window.page, window.page_size),
            pagination: PaginationMeta::new(window.page, window.page_size, sorted.len()),
            total_records: records.len(),
        }
    }
}

/// Fold one event into a state
pub fn reduce<F: RecordField>(state: ViewState<F>, event: ViewEvent<F>) -> ViewState<F> {
    state.reduce(event)
}

/// A mounted view: the record store, its state and the current page
///
/// Dispatching an event recomputes the whole pipeline and settles the page
/// number onto the valid range, so "next page" on the last page stays put.
pub struct DashboardView<R: Record> {
    store: RecordStore<R>,
    state: ViewState<R::Field>,
    current: PaginatedResponse<R>,
}

impl<R: Record> DashboardView<R> {
    pub fn new(store: RecordStore<R>, state: ViewState<R::Field>) -> Self {
        let current = state.project(store.records());
        let mut view = Self {
            store,
            state,
            current,
        };
        view.settle();
        view
    }

    /// Mount a view with the configured defaults
    pub fn mount(store: RecordStore<R>, config: &ViewConfig) -> Result<Self> {
        Ok(Self::new(store, ViewState::from_config::<R>(config)?))
    }

    /// Apply an event and return the recomputed page
    pub fn dispatch(&mut self, event: ViewEvent<R::Field>) -> &PaginatedResponse<R> {
        tracing::debug!(resource = R::resource_name(), ?event, "view event");

        self.state = self.state.clone().reduce(event);
        self.current = self.state.project(self.store.records());
        self.settle();
        &self.current
    }

    pub fn state(&self) -> &ViewState<R::Field> {
        &self.state
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    /// The page as last projected
    pub fn current(&self) -> &PaginatedResponse<R> {
        &self.current
    }

    /// Leave the view: transient state goes back to its defaults
    pub fn reset(&mut self, config: &ViewConfig) -> Result<&PaginatedResponse<R>> {
        self.state = ViewState::from_config::<R>(config)?;
        self.current = self.state.project(self.store.records());
        Ok(&self.current)
    }

    fn settle(&mut self) {
        self.state.window.page = self.current.pagination.page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::SortDirection;
    use crate::core::record::test_support::{Item, ItemField, items};

    fn state() -> ViewState<ItemField> {
        ViewState::new(SortKey::asc(ItemField::Name), 2)
    }

    fn ids(page: &PaginatedResponse<Item>) -> Vec<u64> {
        page.data.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_filter_and_sort_events_reset_page() {
        let mut s = state().reduce(ViewEvent::PageChanged(3));
        assert_eq!(s.window.page, 3);

        s = s.reduce(ViewEvent::SearchChanged("a".to_string()));
        assert_eq!(s.window.page, 1);

        s = s.reduce(ViewEvent::PageChanged(2));
        s = s.reduce(ViewEvent::SortRequested(ItemField::Score));
        assert_eq!(s.window.page, 1);
        assert_eq!(s.sort, SortKey::asc(ItemField::Score));

        s = s.reduce(ViewEvent::PageChanged(2));
        s = s.reduce(ViewEvent::FilterSet(
            Predicate::parse_equals(ItemField::Tag, "red").unwrap(),
        ));
        assert_eq!(s.window.page, 1);
    }

    #[test]
    fn test_sort_requested_toggles() {
        let s = state()
            .reduce(ViewEvent::SortRequested(ItemField::Name))
            .reduce(ViewEvent::SortRequested(ItemField::Name));
        assert_eq!(s.sort.direction, SortDirection::Asc);

        let s = state().reduce(ViewEvent::SortRequested(ItemField::Name));
        assert_eq!(s.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_page_events_never_go_below_one() {
        let s = state()
            .reduce(ViewEvent::PreviousPage)
            .reduce(ViewEvent::PageChanged(0));
        assert_eq!(s.window.page, 1);
    }

    #[test]
    fn test_mode_change_keeps_page() {
        let s = state()
            .reduce(ViewEvent::PageChanged(2))
            .reduce(ViewEvent::ModeChanged(ViewMode::Cards));
        assert_eq!(s.mode, ViewMode::Cards);
        assert_eq!(s.window.page, 2);
    }

    #[test]
    fn test_project_pages() {
        let s = state();
        let page = s.project(&items());
        assert_eq!(ids(&page), vec![3, 2]);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.total_records, 5);

        let last = s.reduce(ViewEvent::PageChanged(3)).project(&items());
        assert_eq!(ids(&last), vec![4]);
    }

    #[test]
    fn test_project_clamps_out_of_range_page() {
        let page = state().reduce(ViewEvent::PageChanged(9)).project(&items());
        assert_eq!(page.pagination.page, 3);
        assert_eq!(ids(&page), vec![4]);
    }

    #[test]
    fn test_project_no_records_found() {
        let page = state()
            .reduce(ViewEvent::SearchChanged("sofa".to_string()))
            .project(&items());
        assert!(page.is_empty());
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_dashboard_view_settles_page() {
        let store = RecordStore::from_records(items());
        let mut view = DashboardView::new(store, state());

        view.dispatch(ViewEvent::NextPage);
        view.dispatch(ViewEvent::NextPage);
        view.dispatch(ViewEvent::NextPage);
        assert_eq!(view.state().window.page, 3);

        let page = view.dispatch(ViewEvent::PreviousPage);
        assert_eq!(page.pagination.page, 2);
    }

    #[test]
    fn test_from_params() {
        let params = QueryParams {
            page: 2,
            limit: Some(500),
            search: Some("e".to_string()),
            filter: Some(r#"{"tag": "blue", "score>=": 5}"#.to_string()),
            sort: Some("score:desc".to_string()),
        };
        let s = ViewState::from_params::<Item>(&params, &ViewConfig::default()).unwrap();

        assert_eq!(s.sort, SortKey::desc(ItemField::Score));
        assert_eq!(s.window, PageWindow::new(2, 100));
        assert_eq!(s.criteria.search_term(), Some("e"));
        assert_eq!(s.criteria.active_count(), 3);
    }

    #[test]
    fn test_from_params_falls_back_to_default_sort() {
        let s = ViewState::from_params::<Item>(&QueryParams::default(), &ViewConfig::default())
            .unwrap();
        assert_eq!(s.sort, SortKey::asc(ItemField::Name));
        assert!(s.criteria.is_unrestricted());
        assert_eq!(s.window, PageWindow::new(1, 10));
    }

    #[test]
    fn test_from_params_uses_configured_page_size() {
        let config = ViewConfig::new(2, "score:desc");

        let params: QueryParams = serde_json::from_str("{}").unwrap();
        let s = ViewState::from_params::<Item>(&params, &config).unwrap();
        assert_eq!(s.window, PageWindow::new(1, 2));
        assert_eq!(ids(&s.project(&items())).len(), 2);

        let s = ViewState::from_params::<Item>(&QueryParams::default(), &config).unwrap();
        assert_eq!(s.window.page_size, 2);

        let params = QueryParams {
            limit: Some(4),
            ..Default::default()
        };
        let s = ViewState::from_params::<Item>(&params, &config).unwrap();
        assert_eq!(s.window.page_size, 4);
    }

    #[test]
    fn test_from_params_rejects_unknown_fields() {
        let params = QueryParams {
            sort: Some("price".to_string()),
            ..Default::default()
        };
        let result = ViewState::<ItemField>::from_params::<Item>(&params, &ViewConfig::default());
        assert!(result.is_err());

        let params = QueryParams {
            filter: Some(r#"{"colour": "red"}"#.to_string()),
            ..Default::default()
        };
        let err = ViewState::<ItemField>::from_params::<Item>(&params, &ViewConfig::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
    }

    #[test]
    fn test_reset_restores_configured_state() {
        let config = ViewConfig::new(2, "score:desc");
        let mut view = DashboardView::mount(RecordStore::from_records(items()), &config).unwrap();
        assert_eq!(view.state().sort, SortKey::desc(ItemField::Score));

        view.dispatch(ViewEvent::SearchChanged("lamp".to_string()));
        assert_eq!(view.current().pagination.total, 1);

        let page = view.reset(&config).unwrap();
        assert_eq!(page.pagination.total, 5);
        assert_eq!(ids(page), vec![1, 4]);
    }

    #[test]
    fn test_free_reduce_matches_method() {
        let event = ViewEvent::SortRequested(ItemField::Score);
        assert_eq!(reduce(state(), event.clone()), state().reduce(event));
    }
}
