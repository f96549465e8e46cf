use std::sync::Arc;

use tracing::info;

use crate::domain::distinct::{distinct_values, DistinctValue};
use crate::domain::entities::column::ColumnDescriptor;
use crate::domain::entities::filter::{ActiveFilters, FilterClause};
use crate::domain::entities::listing::{ListScope, SortSpec};
use crate::domain::entities::record::Record;
use crate::state::browser_state::{BrowserAction, BrowserState, FetchRequest};
use crate::usecase::error::BrowseError;
use crate::usecase::ports::repo::PagesRepository;
use crate::usecase::services::alert_links;
use crate::usecase::services::column_service::ColumnService;
use crate::usecase::services::query_service::{FetchParams, QueryService};
use crate::usecase::services::taxonomy_filter::apply_client_filters;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Absolute URL of the site hosting the pages library.
    pub web_url: String,
    pub list_title: String,
    pub page_size: usize,
    pub fetch_cap: usize,
    pub scope: ListScope,
}

/// Drives [`BrowserState`] against a repository, one fetch at a time.
pub struct PagesBrowser {
    repo: Arc<dyn PagesRepository>,
    columns: ColumnService,
    query: QueryService,
    state: BrowserState,
    web_url: String,
    list_id: Option<String>,
}

impl PagesBrowser {
    pub fn new(repo: Arc<dyn PagesRepository>, settings: BrowserSettings) -> Self {
        Self {
            columns: ColumnService::new(repo.clone()),
            query: QueryService::new(repo.clone(), settings.list_title, settings.fetch_cap),
            state: BrowserState::new(settings.scope, settings.page_size),
            web_url: settings.web_url,
            list_id: None,
            repo,
        }
    }

    /// Resolves the view's columns and loads the first result set.
    pub fn load_view(&mut self, view_id: &str) -> Result<(), BrowseError> {
        let columns = self.columns.resolve_columns(view_id)?;
        self.dispatch(BrowserAction::ColumnsLoaded {
            view_id: view_id.to_string(),
            columns,
        })
    }

    pub fn set_scope(&mut self, scope: ListScope) -> Result<(), BrowseError> {
        self.dispatch(BrowserAction::SetScope(scope))
    }

    pub fn apply_filter(&mut self, clause: FilterClause) -> Result<(), BrowseError> {
        self.dispatch(BrowserAction::ApplyFilter(clause))
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.dispatch_local(BrowserAction::SetSearchText(text.into()));
    }

    pub fn submit_search(&mut self) -> Result<(), BrowseError> {
        self.dispatch(BrowserAction::SubmitSearch)
    }

    pub fn sort_by(&mut self, field: impl Into<String>) -> Result<(), BrowseError> {
        self.dispatch(BrowserAction::SortBy(field.into()))
    }

    pub fn reset_filters(&mut self) -> Result<(), BrowseError> {
        self.dispatch(BrowserAction::ResetFilters)
    }

    pub fn refresh(&mut self) -> Result<(), BrowseError> {
        self.dispatch(BrowserAction::Refresh)
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.dispatch_local(BrowserAction::SetPageSize(page_size));
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.dispatch_local(BrowserAction::GoToPage(page));
    }

    pub fn go_to_page_input(&mut self, input: &str) {
        self.dispatch_local(BrowserAction::GoToPageInput(input.to_string()));
    }

    pub fn go_first(&mut self) {
        self.dispatch_local(BrowserAction::GoFirst);
    }

    pub fn go_prev(&mut self) {
        self.dispatch_local(BrowserAction::GoPrev);
    }

    pub fn go_next(&mut self) {
        self.dispatch_local(BrowserAction::GoNext);
    }

    pub fn go_last(&mut self) {
        self.dispatch_local(BrowserAction::GoLast);
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn visible(&self) -> &[Record] {
        self.state.visible()
    }

    pub fn total_items(&self) -> usize {
        self.state.total_items()
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn sort(&self) -> &SortSpec {
        self.state.sort()
    }

    pub fn filters(&self) -> &ActiveFilters {
        self.state.filters()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.state.columns()
    }

    /// The clause currently applied to `column`, if any.
    pub fn active_clause(&self, column: &str) -> Option<&FilterClause> {
        self.state.filters().get(column)
    }

    /// Selectable values for `column`, taken from the loaded result set.
    /// Unknown columns have none.
    pub fn distinct_values(&self, column: &str) -> Vec<DistinctValue> {
        match self.state.column(column) {
            Some(descriptor) => {
                distinct_values(self.state.results(), column, &descriptor.column_type)
            }
            None => Vec::new(),
        }
    }

    pub fn subscribe_url(&mut self, item_id: i64, source: &str) -> Result<String, BrowseError> {
        let list_id = self.list_id()?;
        alert_links::subscribe_url(&self.web_url, &list_id, item_id, source)
    }

    pub fn manage_alerts_url(&self, source: &str) -> Result<String, BrowseError> {
        alert_links::manage_alerts_url(&self.web_url, source)
    }

    fn list_id(&mut self) -> Result<String, BrowseError> {
        if let Some(list_id) = &self.list_id {
            return Ok(list_id.clone());
        }
        let details = self
            .repo
            .list_details()
            .map_err(BrowseError::ListDetails)?;
        info!(list_id = %details.id, title = %details.title, "resolved list details");
        self.list_id = Some(details.id.clone());
        Ok(details.id)
    }

    fn dispatch_local(&mut self, action: BrowserAction) {
        let (next, request) = std::mem::take(&mut self.state).transition(action);
        self.state = next;
        debug_assert!(request.is_none(), "local actions never fetch");
    }

    fn dispatch(&mut self, action: BrowserAction) -> Result<(), BrowseError> {
        let (next, request) = std::mem::take(&mut self.state).transition(action);
        self.state = next;
        let Some(FetchRequest { generation, params }) = request else {
            return Ok(());
        };

        let outcome = self.execute(&params);
        let failure = outcome.as_ref().err().cloned();
        let (next, _) = std::mem::take(&mut self.state).transition(BrowserAction::FetchCompleted {
            generation,
            outcome,
        });
        self.state = next;

        match failure {
            Some(err) => Err(err),
            None => {
                info!(
                    generation,
                    total = self.state.total_items(),
                    pages = self.state.total_pages(),
                    "result set replaced"
                );
                Ok(())
            }
        }
    }

    fn execute(&self, params: &FetchParams) -> Result<Vec<Record>, BrowseError> {
        let records = self.query.fetch_enriched(params)?;
        Ok(apply_client_filters(records, &params.client_filters))
    }
}
