use serde::{Deserialize, Serialize};

pub const DEFAULT_SORT_FIELD: &str = "Created";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Asc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, SortDirection::Desc)
    }
}

/// Which folder of the pages library is being browsed. Owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListScope {
    pub web_server_relative_url: String,
    pub category: Option<String>,
}

impl ListScope {
    pub fn new(web_server_relative_url: impl Into<String>) -> Self {
        Self {
            web_server_relative_url: web_server_relative_url.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn folder_path(&self) -> String {
        let web = self.web_server_relative_url.trim_end_matches('/');
        match &self.category {
            Some(category) => format!("{web}/SitePages/{}", category.trim_matches('/')),
            None => format!("{web}/SitePages"),
        }
    }
}

/// A fully built list query, ready for the list service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: String,
    pub select: Vec<String>,
    pub expand: Vec<String>,
    pub order_by: SortSpec,
    pub skip: usize,
    pub top: usize,
}
