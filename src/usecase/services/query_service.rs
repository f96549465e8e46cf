use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::column::ColumnDescriptor;
use crate::domain::entities::filter::FilterClause;
use crate::domain::entities::listing::{ListQuery, ListScope, SortSpec};
use crate::domain::entities::record::Record;
use crate::usecase::error::BrowseError;
use crate::usecase::ports::repo::PagesRepository;
use crate::usecase::services::filter_builder::{build_field_sets, build_filter};

pub const DEFAULT_FETCH_CAP: usize = 5000;

/// Everything one fetch needs, captured when the fetch is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub page_number: usize,
    pub page_size: usize,
    pub sort: SortSpec,
    pub scope: ListScope,
    pub search_text: String,
    pub server_filters: Vec<FilterClause>,
    pub client_filters: Vec<FilterClause>,
    pub columns: Vec<ColumnDescriptor>,
}

pub struct QueryService {
    repo: Arc<dyn PagesRepository>,
    list_title: String,
    fetch_cap: usize,
}

impl QueryService {
    pub fn new(repo: Arc<dyn PagesRepository>, list_title: impl Into<String>, fetch_cap: usize) -> Self {
        Self {
            repo,
            list_title: list_title.into(),
            fetch_cap: fetch_cap.max(1),
        }
    }

    pub fn build_query(&self, params: &FetchParams) -> ListQuery {
        let filter = build_filter(
            &params.scope.folder_path(),
            &params.search_text,
            &params.server_filters,
        );
        let fields = build_field_sets(&params.columns);
        ListQuery {
            filter: filter.expression,
            select: fields.select,
            expand: fields.expand,
            order_by: params.sort.clone(),
            skip: params.page_number.saturating_sub(1) * params.page_size,
            top: self.fetch_cap,
        }
    }

    /// One capped fetch, then the alert lookup. Either failure fails the whole call.
    pub fn fetch_enriched(&self, params: &FetchParams) -> Result<Vec<Record>, BrowseError> {
        let query = self.build_query(params);
        let mut records = self.repo.query_items(&query).map_err(|err| {
            warn!(error = %err, "item query failed");
            BrowseError::Fetch(err)
        })?;

        let subscribed = self.subscribed_file_names().map_err(|err| {
            warn!(error = %err, "alert lookup failed");
            err
        })?;
        tag_subscriptions(&mut records, &subscribed);

        info!(
            fetched = records.len(),
            subscribed = records.iter().filter(|record| record.subscribed()).count(),
            "fetched pages"
        );
        Ok(records)
    }

    fn subscribed_file_names(&self) -> Result<HashSet<String>, BrowseError> {
        let user_id = self.repo.current_user_id().map_err(BrowseError::Fetch)?;
        let titles = self
            .repo
            .alert_titles(user_id)
            .map_err(BrowseError::Fetch)?;
        Ok(subscribed_names(&titles, &self.list_title))
    }
}

/// Alert titles look like `<list title>: <file name>`.
pub fn subscribed_names(alert_titles: &[String], list_title: &str) -> HashSet<String> {
    let prefix = format!("{list_title}: ");
    alert_titles
        .iter()
        .filter_map(|title| title.split_once(prefix.as_str()).map(|(_, name)| name))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Matches on the file name only, so same-named files in other lists are
/// attributed too.
pub fn tag_subscriptions(records: &mut [Record], subscribed: &HashSet<String>) {
    for record in records.iter_mut() {
        let is_subscribed = record
            .file_name()
            .map(|name| subscribed.contains(name))
            .unwrap_or(false);
        record.set_subscribed(is_subscribed);
    }
}
