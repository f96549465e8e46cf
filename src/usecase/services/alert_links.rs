use reqwest::Url;

use crate::usecase::error::BrowseError;

const SUBSCRIBE_PAGE: &str = "_layouts/15/SubNew.aspx";
const MANAGE_ALERTS_PAGE: &str = "_layouts/15/mySubs.aspx";

/// "Alert me" link for one page of the list.
pub fn subscribe_url(
    web_url: &str,
    list_id: &str,
    item_id: i64,
    source: &str,
) -> Result<String, BrowseError> {
    let item_id = item_id.to_string();
    layout_url(
        web_url,
        SUBSCRIBE_PAGE,
        &[("List", list_id), ("Id", item_id.as_str()), ("source", source)],
    )
}

pub fn manage_alerts_url(web_url: &str, source: &str) -> Result<String, BrowseError> {
    layout_url(web_url, MANAGE_ALERTS_PAGE, &[("source", source)])
}

fn layout_url(web_url: &str, page: &str, params: &[(&str, &str)]) -> Result<String, BrowseError> {
    let base = format!("{}/{page}", web_url.trim_end_matches('/'));
    Url::parse_with_params(&base, params)
        .map(String::from)
        .map_err(|err| BrowseError::InvalidLink(format!("{base}: {err}")))
}
