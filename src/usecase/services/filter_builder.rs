//! Translates search text, folder scope and typed column filters into the
//! list service's filter expression and field sets.
//!
//! Values are inserted verbatim: nothing is quoted or escaped, so callers
//! must not route untrusted text through here.

use tracing::debug;

use crate::domain::calendar::{calendar_day, day_bounds};
use crate::domain::entities::column::{ColumnDescriptor, Projection, ServerFilter};
use crate::domain::entities::filter::FilterClause;

pub const PATH_FIELD: &str = "FileDirRef";
pub const OBJECT_TYPE_FIELD: &str = "FSObjType";
pub const ARTICLE_ID_FIELD: &str = "Article_x0020_ID";
pub const MODIFIED_FIELD: &str = "Modified";
/// `FSObjType` of a file (as opposed to a folder).
pub const DOCUMENT_OBJECT_TYPE: u8 = 0;

/// Always selected, whatever the view shows.
pub const BASE_SELECT: [&str; 5] = ["FileRef", "FileDirRef", "FSObjType", "Title", "Id"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFilter {
    pub expression: String,
    /// Clauses the list service cannot evaluate; applied after the fetch.
    pub client_only: Vec<FilterClause>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSets {
    pub select: Vec<String>,
    pub expand: Vec<String>,
}

pub fn base_predicate(folder_path: &str) -> String {
    format!("startswith({PATH_FIELD}, '{folder_path}') and {OBJECT_TYPE_FIELD} eq {DOCUMENT_OBJECT_TYPE}")
}

pub fn build_filter(folder_path: &str, search_text: &str, filters: &[FilterClause]) -> BuiltFilter {
    let mut clauses = vec![base_predicate(folder_path)];
    let mut client_only = Vec::new();

    if !search_text.is_empty() {
        clauses.push(format!(
            "(substringof('{search_text}', Title) or {ARTICLE_ID_FIELD} eq '{search_text}' or substringof('{search_text}', {MODIFIED_FIELD}))"
        ));
    }

    for clause in filters.iter().filter(|clause| !clause.is_empty()) {
        let rule = clause.column_type.server_filter(&clause.column);
        if rule == ServerFilter::ClientOnly {
            client_only.push(clause.clone());
            continue;
        }

        let alternatives: Vec<String> = clause
            .values
            .iter()
            .filter_map(|value| value_expression(rule, &clause.column, value))
            .collect();

        if alternatives.is_empty() {
            debug!(column = %clause.column, ?rule, "filter clause has no server expression");
            continue;
        }
        clauses.push(format!("({})", alternatives.join(" or ")));
    }

    let expression = clauses.join(" and ");
    debug!(%expression, client_only = client_only.len(), "built list filter");
    BuiltFilter {
        expression,
        client_only,
    }
}

fn value_expression(rule: ServerFilter, column: &str, value: &str) -> Option<String> {
    match rule {
        ServerFilter::DayRange => {
            let (start, end) = calendar_day(value).and_then(day_bounds)?;
            Some(format!(
                "{column} ge datetime'{start}' and {column} lt datetime'{end}'"
            ))
        }
        ServerFilter::Member(member) => Some(format!("{column}/{member} eq '{value}'")),
        ServerFilter::TitleAlias => Some(format!("Title eq '{value}'")),
        ServerFilter::Equals => Some(format!("{column} eq '{value}'")),
        ServerFilter::ClientOnly | ServerFilter::Unsupported => None,
    }
}

pub fn build_field_sets(columns: &[ColumnDescriptor]) -> FieldSets {
    let mut sets = FieldSets {
        select: BASE_SELECT.iter().map(|field| field.to_string()).collect(),
        expand: Vec::new(),
    };

    for column in columns {
        let field = column.internal_name.as_str();
        match column.column_type.projection() {
            Projection::Expanded => {
                push_unique(&mut sets.select, format!("{field}/Id"));
                push_unique(&mut sets.select, format!("{field}/Title"));
                let base = field.split('/').next().unwrap_or(field);
                push_unique(&mut sets.expand, base.to_string());
            }
            Projection::Plain => push_unique(&mut sets.select, field.to_string()),
        }
    }

    debug!(select = ?sets.select, expand = ?sets.expand, "built field sets");
    sets
}

fn push_unique(target: &mut Vec<String>, value: String) {
    if !target.contains(&value) {
        target.push(value);
    }
}
