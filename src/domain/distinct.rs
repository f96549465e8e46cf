use std::collections::HashSet;

use serde::Serialize;

use crate::domain::calendar::calendar_day;
use crate::domain::entities::column::{ColumnType, DistinctStrategy};
use crate::domain::entities::record::Record;

/// One selectable value in a column's filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DistinctValue {
    Text(String),
    User { name: String, id: i64 },
}

impl DistinctValue {
    pub fn label(&self) -> &str {
        match self {
            DistinctValue::Text(text) => text,
            DistinctValue::User { name, .. } => name,
        }
    }

    /// The string a filter clause stores when this value is selected.
    pub fn filter_value(&self) -> String {
        match self {
            DistinctValue::Text(text) => text.clone(),
            DistinctValue::User { id, .. } => id.to_string(),
        }
    }
}

/// Deduplicated display values of `column` across `records`, first-seen order.
pub fn distinct_values(
    records: &[Record],
    column: &str,
    column_type: &ColumnType,
) -> Vec<DistinctValue> {
    let strategy = column_type.distinct_strategy();
    let mut seen = HashSet::new();
    let mut values = Vec::new();

    for record in records {
        for value in extract(record, column, strategy) {
            if seen.insert(value.label().to_string()) {
                values.push(value);
            }
        }
    }

    values
}

fn extract(record: &Record, column: &str, strategy: DistinctStrategy) -> Vec<DistinctValue> {
    match strategy {
        DistinctStrategy::TaxonomyLabels => record
            .taxonomy_terms(column)
            .unwrap_or_default()
            .into_iter()
            .filter(|term| !term.label.is_empty())
            .map(|term| DistinctValue::Text(term.label))
            .collect(),
        DistinctStrategy::TaxonomyLabel => record
            .taxonomy_term(column)
            .filter(|term| !term.label.is_empty())
            .map(|term| DistinctValue::Text(term.label))
            .into_iter()
            .collect(),
        DistinctStrategy::CalendarDay => record
            .text(column)
            .and_then(|raw| calendar_day(&raw))
            .map(|day| DistinctValue::Text(day.format("%Y-%m-%d").to_string()))
            .into_iter()
            .collect(),
        DistinctStrategy::UserName => record
            .user(column)
            .filter(|user| !user.title.is_empty())
            .map(|user| DistinctValue::User {
                name: user.title,
                id: user.id,
            })
            .into_iter()
            .collect(),
        DistinctStrategy::UrlOnly => record
            .url(column)
            .and_then(|url| url.url)
            .filter(|url| !url.is_empty())
            .map(DistinctValue::Text)
            .into_iter()
            .collect(),
        DistinctStrategy::FileStem => record
            .text(column)
            .and_then(|raw| raw.split('.').next().map(str::to_string))
            .filter(|stem| !stem.is_empty())
            .map(DistinctValue::Text)
            .into_iter()
            .collect(),
        DistinctStrategy::Scalar => record
            .text(column)
            .map(DistinctValue::Text)
            .into_iter()
            .collect(),
    }
}
