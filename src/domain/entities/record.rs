use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "TermGuid", default)]
    pub term_guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Title")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRef {
    #[serde(rename = "Url")]
    pub url: Option<String>,
}

/// A fetched list item. Field shapes depend on the column type; the
/// subscription flag is filled in after the alert lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(rename = "Subscribed", default)]
    subscribed: bool,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            subscribed: false,
        }
    }

    /// Wraps a JSON object; anything else is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn subscribed(&self) -> bool {
        self.subscribed
    }

    pub(crate) fn set_subscribed(&mut self, subscribed: bool) {
        self.subscribed = subscribed;
    }

    pub fn item_id(&self) -> Option<i64> {
        self.field("Id")
            .or_else(|| self.field("ID"))
            .and_then(Value::as_i64)
    }

    pub fn title(&self) -> Option<&str> {
        self.field("Title").and_then(Value::as_str)
    }

    pub fn file_ref(&self) -> Option<&str> {
        self.field("FileRef").and_then(Value::as_str)
    }

    /// Last path segment of `FileRef`.
    pub fn file_name(&self) -> Option<&str> {
        self.file_ref()
            .and_then(|file_ref| file_ref.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }

    /// Text form of a scalar field. Falsy values (null, `false`, `0`, `""`)
    /// yield `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        let value = self.field(name)?;
        if !is_truthy(value) {
            return None;
        }
        match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Taxonomy terms of a multi-valued field; `None` when the field is
    /// missing or not list-shaped.
    pub fn taxonomy_terms(&self, name: &str) -> Option<Vec<TaxonomyTerm>> {
        let items = self.field(name)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<TaxonomyTerm>(item.clone()).ok())
                .collect(),
        )
    }

    /// The term of a single-valued taxonomy field.
    pub fn taxonomy_term(&self, name: &str) -> Option<TaxonomyTerm> {
        let value = self.field(name)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn user(&self, name: &str) -> Option<UserRef> {
        let value = self.field(name)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn url(&self, name: &str) -> Option<UrlRef> {
        let value = self.field(name)?;
        serde_json::from_value(value.clone()).ok()
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
