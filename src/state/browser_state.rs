//! Browser state and its pure transition function.
//!
//! Every action that needs fresh data yields a [`FetchRequest`] tagged with
//! a generation. Only the completion of the latest generation is applied;
//! anything older is dropped without touching the state.

use tracing::{debug, warn};

use crate::domain::entities::column::ColumnDescriptor;
use crate::domain::entities::filter::{ActiveFilters, FilterClause};
use crate::domain::entities::listing::{ListScope, SortDirection, SortSpec};
use crate::domain::entities::record::Record;
use crate::domain::pagination::{parse_page_input, Pagination};
use crate::usecase::error::BrowseError;
use crate::usecase::services::query_service::FetchParams;

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserAction {
    ColumnsLoaded {
        view_id: String,
        columns: Vec<ColumnDescriptor>,
    },
    SetScope(ListScope),
    ApplyFilter(FilterClause),
    SetSearchText(String),
    SubmitSearch,
    SortBy(String),
    SetPageSize(usize),
    GoToPage(i64),
    GoToPageInput(String),
    GoFirst,
    GoPrev,
    GoNext,
    GoLast,
    ResetFilters,
    Refresh,
    FetchCompleted {
        generation: u64,
        outcome: Result<Vec<Record>, BrowseError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub params: FetchParams,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserState {
    scope: ListScope,
    view_id: Option<String>,
    columns: Vec<ColumnDescriptor>,
    search_draft: String,
    search_text: String,
    filters: ActiveFilters,
    sort: SortSpec,
    results: Vec<Record>,
    pagination: Pagination,
    generation: u64,
    pending: Option<u64>,
    last_error: Option<BrowseError>,
}

impl BrowserState {
    pub fn new(scope: ListScope, page_size: usize) -> Self {
        Self {
            scope,
            pagination: Pagination::new(page_size),
            ..Self::default()
        }
    }

    pub fn transition(mut self, action: BrowserAction) -> (Self, Option<FetchRequest>) {
        match action {
            BrowserAction::ColumnsLoaded { view_id, columns } => {
                self.view_id = Some(view_id);
                self.columns = columns;
                self.request_fetch()
            }
            BrowserAction::SetScope(scope) => {
                self.scope = scope;
                self.request_fetch()
            }
            BrowserAction::ApplyFilter(clause) => {
                self.filters.apply(clause);
                self.request_fetch()
            }
            BrowserAction::SetSearchText(text) => {
                self.search_draft = text;
                (self, None)
            }
            BrowserAction::SubmitSearch => {
                self.search_text = self.search_draft.clone();
                self.request_fetch()
            }
            BrowserAction::SortBy(field) => {
                self.sort = if self.sort.field == field {
                    SortSpec::new(field, self.sort.direction.toggled())
                } else {
                    SortSpec::new(field, SortDirection::Desc)
                };
                self.request_fetch()
            }
            BrowserAction::SetPageSize(page_size) => {
                self.pagination = self.pagination.with_page_size(page_size);
                (self, None)
            }
            BrowserAction::GoToPage(page) => {
                self.pagination = self.pagination.go_to(page);
                (self, None)
            }
            BrowserAction::GoToPageInput(input) => {
                self.pagination = self.pagination.go_to(parse_page_input(&input));
                (self, None)
            }
            BrowserAction::GoFirst => {
                self.pagination = self.pagination.first();
                (self, None)
            }
            BrowserAction::GoPrev => {
                self.pagination = self.pagination.prev();
                (self, None)
            }
            BrowserAction::GoNext => {
                self.pagination = self.pagination.next();
                (self, None)
            }
            BrowserAction::GoLast => {
                self.pagination = self.pagination.last();
                (self, None)
            }
            BrowserAction::ResetFilters => {
                self.filters.clear();
                self.search_draft.clear();
                self.search_text.clear();
                self.sort = SortSpec::default();
                self.request_fetch()
            }
            BrowserAction::Refresh => self.request_fetch(),
            BrowserAction::FetchCompleted {
                generation,
                outcome,
            } => {
                self.complete_fetch(generation, outcome);
                (self, None)
            }
        }
    }

    fn request_fetch(mut self) -> (Self, Option<FetchRequest>) {
        self.generation += 1;
        self.pending = Some(self.generation);
        let request = FetchRequest {
            generation: self.generation,
            params: FetchParams {
                page_number: 1,
                page_size: self.pagination.page_size(),
                sort: self.sort.clone(),
                scope: self.scope.clone(),
                search_text: self.search_text.clone(),
                server_filters: self.filters.server().to_vec(),
                client_filters: self.filters.client().to_vec(),
                columns: self.columns.clone(),
            },
        };
        debug!(generation = self.generation, "fetch requested");
        (self, Some(request))
    }

    fn complete_fetch(&mut self, generation: u64, outcome: Result<Vec<Record>, BrowseError>) {
        if self.pending != Some(generation) {
            warn!(
                generation,
                latest = self.generation,
                "dropping stale fetch completion"
            );
            return;
        }
        self.pending = None;
        match outcome {
            Ok(records) => {
                self.pagination = self.pagination.with_total(records.len());
                self.results = records;
                self.last_error = None;
            }
            Err(err) => {
                warn!(generation, error = %err, "fetch failed; keeping previous results");
                self.last_error = Some(err);
            }
        }
    }

    pub fn visible(&self) -> &[Record] {
        &self.results[self.pagination.slice_range()]
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn total_items(&self) -> usize {
        self.pagination.total_items()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages()
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_draft(&self) -> &str {
        &self.search_draft
    }

    pub fn scope(&self) -> &ListScope {
        &self.scope
    }

    pub fn view_id(&self) -> Option<&str> {
        self.view_id.as_deref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, internal_name: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|column| column.internal_name == internal_name)
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&BrowseError> {
        self.last_error.as_ref()
    }
}
