use serde::{Deserialize, Serialize};

/// Computed fields that alias the page file name and filter through `Title`.
pub const NAME_ALIAS_FIELDS: [&str; 4] = ["Name", "FileLeafRef", "LinkFilename", "LinkFilenameNoMenu"];

/// Semantic classification of a list column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    DateTime,
    User,
    Url,
    Computed,
    TaxonomyMulti,
    Taxonomy,
    Number,
    Choice,
    Text(String),
}

/// How a clause on a column is turned into server filter text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerFilter {
    DayRange,
    Member(&'static str),
    TitleAlias,
    Equals,
    ClientOnly,
    Unsupported,
}

/// How a column contributes to the `$select` / `$expand` field sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Plain,
    Expanded,
}

/// How distinct display values are pulled out of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctStrategy {
    TaxonomyLabels,
    TaxonomyLabel,
    CalendarDay,
    UserName,
    UrlOnly,
    FileStem,
    Scalar,
}

impl ColumnType {
    pub fn from_remote(type_as_string: &str) -> Self {
        match type_as_string {
            "DateTime" => ColumnType::DateTime,
            "User" => ColumnType::User,
            "URL" => ColumnType::Url,
            "Computed" => ColumnType::Computed,
            "TaxonomyFieldTypeMulti" => ColumnType::TaxonomyMulti,
            "TaxonomyFieldType" => ColumnType::Taxonomy,
            "Number" => ColumnType::Number,
            "Choice" => ColumnType::Choice,
            other => ColumnType::Text(other.to_string()),
        }
    }

    pub fn is_client_only(&self) -> bool {
        matches!(self.server_filter(""), ServerFilter::ClientOnly)
    }

    /// The single table mapping a tag (and, for computed columns, the field
    /// name) to its server filter rule.
    pub fn server_filter(&self, field: &str) -> ServerFilter {
        match self {
            ColumnType::DateTime => ServerFilter::DayRange,
            ColumnType::User => ServerFilter::Member("Id"),
            ColumnType::Url => ServerFilter::Member("Url"),
            ColumnType::Computed if NAME_ALIAS_FIELDS.contains(&field) => ServerFilter::TitleAlias,
            ColumnType::Computed => ServerFilter::Unsupported,
            ColumnType::TaxonomyMulti => ServerFilter::ClientOnly,
            ColumnType::Taxonomy
            | ColumnType::Number
            | ColumnType::Choice
            | ColumnType::Text(_) => ServerFilter::Equals,
        }
    }

    pub fn projection(&self) -> Projection {
        match self {
            ColumnType::User => Projection::Expanded,
            _ => Projection::Plain,
        }
    }

    pub fn distinct_strategy(&self) -> DistinctStrategy {
        match self {
            ColumnType::TaxonomyMulti => DistinctStrategy::TaxonomyLabels,
            ColumnType::DateTime => DistinctStrategy::CalendarDay,
            ColumnType::User => DistinctStrategy::UserName,
            ColumnType::Url => DistinctStrategy::UrlOnly,
            ColumnType::Computed => DistinctStrategy::FileStem,
            ColumnType::Taxonomy => DistinctStrategy::TaxonomyLabel,
            ColumnType::Number
            | ColumnType::Choice
            | ColumnType::Text(_) => DistinctStrategy::Scalar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub internal_name: String,
    pub display_name: String,
    pub column_type: ColumnType,
    pub min_width: u32,
    pub max_width: u32,
}

/// Raw field metadata as the list service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    #[serde(rename = "InternalName")]
    pub internal_name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "TypeAsString")]
    pub type_as_string: String,
}

pub fn column_width_hints(internal_name: &str) -> (u32, u32) {
    match internal_name {
        "Title" | "FileLeafRef" | "LinkFilename" | "LinkFilenameNoMenu" | "Name" => (150, 350),
        "Created" | "Modified" => (100, 140),
        "Author" | "Editor" => (120, 180),
        "Article_x0020_ID" => (80, 120),
        _ => (100, 200),
    }
}
