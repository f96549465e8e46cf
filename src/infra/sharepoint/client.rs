use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::entities::column::FieldInfo;
use crate::domain::entities::listing::ListQuery;
use crate::domain::entities::record::Record;
use crate::infra::sharepoint::wire::{
    AlertsResponse, CurrentUser, ItemsResponse, ListEntry, ViewFieldsResponse,
};
use crate::usecase::ports::repo::{ListDetails, PagesRepository, RepoError};

const JSON_NOMETADATA: &str = "application/json;odata=nometadata";
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Clone)]
pub struct SharePointConfig {
    pub web_url: String,
    pub list_title: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

/// Blocking client for the site's list REST API.
pub struct SharePointClient {
    http: Client,
    web_url: String,
    list_title: String,
}

impl SharePointClient {
    pub fn new(config: SharePointConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_NOMETADATA));
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("access token is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            web_url: config.web_url.trim_end_matches('/').to_string(),
            list_title: config.list_title,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/_api/web/{path}", self.web_url)
    }

    fn list_url(&self, path: &str) -> String {
        let title = odata_literal(&self.list_title);
        if path.is_empty() {
            self.api_url(&format!("lists/getbytitle('{title}')"))
        } else {
            self.api_url(&format!("lists/getbytitle('{title}')/{path}"))
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, RepoError> {
        debug!(url, ?params, "GET");
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RepoError::Status {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|err| RepoError::Decode(format!("{url}: {err}")))
    }

    fn field_info(&self, name: &str) -> Result<FieldInfo, RepoError> {
        let url = self.list_url(&format!(
            "fields/getbyinternalnameortitle('{}')",
            odata_literal(name)
        ));
        self.get_json(&url, &[])
    }
}

impl PagesRepository for SharePointClient {
    fn view_fields(&self, view_id: &str) -> Result<Vec<FieldInfo>, RepoError> {
        let url = self.list_url(&format!("views(guid'{view_id}')/viewfields"));
        let names: ViewFieldsResponse = self.get_json(&url, &[])?;
        names
            .items
            .iter()
            .map(|name| self.field_info(name))
            .collect()
    }

    fn query_items(&self, query: &ListQuery) -> Result<Vec<Record>, RepoError> {
        let url = self.list_url("items");
        let response: ItemsResponse = self.get_json(&url, &items_params(query))?;
        response
            .value
            .into_iter()
            .map(|item| {
                Record::from_value(item)
                    .ok_or_else(|| RepoError::Decode("list item is not an object".to_string()))
            })
            .collect()
    }

    fn current_user_id(&self) -> Result<i64, RepoError> {
        let user: CurrentUser = self.get_json(&self.api_url("currentuser"), &[])?;
        Ok(user.id)
    }

    fn alert_titles(&self, user_id: i64) -> Result<Vec<String>, RepoError> {
        let filter = format!(
            "UserId eq {user_id} and substringof('{}', Title)",
            odata_literal(&self.list_title)
        );
        let alerts: AlertsResponse = self.get_json(&self.api_url("alerts"), &[("$filter", filter)])?;
        Ok(alerts.value.into_iter().map(|alert| alert.title).collect())
    }

    fn list_details(&self) -> Result<ListDetails, RepoError> {
        let list: ListEntry =
            self.get_json(&self.list_url(""), &[("$select", "Id,Title".to_string())])?;
        Ok(ListDetails {
            id: list.id,
            title: list.title,
        })
    }
}

impl From<reqwest::Error> for RepoError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => RepoError::Status {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => RepoError::Transport(error.to_string()),
        }
    }
}

pub fn items_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let direction = if query.order_by.direction.is_ascending() {
        "asc"
    } else {
        "desc"
    };
    let mut params = vec![
        ("$filter", query.filter.clone()),
        ("$select", query.select.join(",")),
    ];
    if !query.expand.is_empty() {
        params.push(("$expand", query.expand.join(",")));
    }
    params.push(("$orderby", format!("{} {direction}", query.order_by.field)));
    params.push(("$skip", query.skip.to_string()));
    params.push(("$top", query.top.to_string()));
    params
}

/// Quotes inside an OData string literal are doubled.
fn odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}
