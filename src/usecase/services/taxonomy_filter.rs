use crate::domain::entities::filter::FilterClause;
use crate::domain::entities::record::Record;

/// Keeps the records that satisfy every client-only clause.
pub fn apply_client_filters(records: Vec<Record>, filters: &[FilterClause]) -> Vec<Record> {
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| filters.iter().all(|clause| matches_clause(record, clause)))
        .collect()
}

/// A record matches when its term list carries one of the selected labels.
/// A missing or non-list field never matches.
pub fn matches_clause(record: &Record, clause: &FilterClause) -> bool {
    let Some(terms) = record.taxonomy_terms(&clause.column) else {
        return false;
    };
    clause
        .values
        .iter()
        .any(|value| terms.iter().any(|term| &term.label == value))
}
