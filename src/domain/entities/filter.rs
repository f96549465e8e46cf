use serde::{Deserialize, Serialize};

use crate::domain::entities::column::ColumnType;

/// One column filter: the selected values are OR-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub column: String,
    pub column_type: ColumnType,
    pub values: Vec<String>,
}

impl FilterClause {
    /// Builds a clause, dropping repeated values but keeping selection order.
    pub fn new<I, S>(column: impl Into<String>, column_type: ColumnType, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self {
            column: column.into(),
            column_type,
            values: unique,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_client_only(&self) -> bool {
        self.column_type.is_client_only()
    }
}

/// Active filters, split into what the list service can evaluate and what
/// has to run over the fetched batch. Never holds an empty clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters {
    server: Vec<FilterClause>,
    client: Vec<FilterClause>,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts by column; a clause without values removes the column's filter.
    pub fn apply(&mut self, clause: FilterClause) {
        self.server.retain(|existing| existing.column != clause.column);
        self.client.retain(|existing| existing.column != clause.column);
        if clause.is_empty() {
            return;
        }
        if clause.is_client_only() {
            self.client.push(clause);
        } else {
            self.server.push(clause);
        }
    }

    pub fn clear(&mut self) {
        self.server.clear();
        self.client.clear();
    }

    pub fn server(&self) -> &[FilterClause] {
        &self.server
    }

    pub fn client(&self) -> &[FilterClause] {
        &self.client
    }

    pub fn get(&self, column: &str) -> Option<&FilterClause> {
        self.server
            .iter()
            .chain(self.client.iter())
            .find(|clause| clause.column == column)
    }

    pub fn is_empty(&self) -> bool {
        self.server.is_empty() && self.client.is_empty()
    }

    pub fn len(&self) -> usize {
        self.server.len() + self.client.len()
    }
}
