//! Response bodies of the REST endpoints, requested with
//! `odata=nometadata`.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ViewFieldsResponse {
    #[serde(rename = "Items", default)]
    pub items: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValueResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

pub type ItemsResponse = ValueResponse<Value>;

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "Id")]
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AlertEntry {
    #[serde(rename = "Title", default)]
    pub title: String,
}

pub type AlertsResponse = ValueResponse<AlertEntry>;

#[derive(Debug, Deserialize)]
pub struct ListEntry {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
}
