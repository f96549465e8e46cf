use std::sync::Arc;

use tracing::info;

use crate::domain::entities::column::{column_width_hints, ColumnDescriptor, ColumnType, FieldInfo};
use crate::usecase::error::BrowseError;
use crate::usecase::ports::repo::PagesRepository;

pub struct ColumnService {
    repo: Arc<dyn PagesRepository>,
}

impl ColumnService {
    pub fn new(repo: Arc<dyn PagesRepository>) -> Self {
        Self { repo }
    }

    pub fn resolve_columns(&self, view_id: &str) -> Result<Vec<ColumnDescriptor>, BrowseError> {
        let fields = self
            .repo
            .view_fields(view_id)
            .map_err(|source| BrowseError::Metadata {
                view_id: view_id.to_string(),
                source,
            })?;
        let columns = describe_columns(fields);
        info!(view_id, columns = columns.len(), "resolved view columns");
        Ok(columns)
    }
}

/// Keeps view order and drops repeated internal names.
pub fn describe_columns(fields: Vec<FieldInfo>) -> Vec<ColumnDescriptor> {
    let mut columns: Vec<ColumnDescriptor> = Vec::with_capacity(fields.len());
    for field in fields {
        if columns
            .iter()
            .any(|column| column.internal_name == field.internal_name)
        {
            continue;
        }
        let (min_width, max_width) = column_width_hints(&field.internal_name);
        columns.push(ColumnDescriptor {
            column_type: ColumnType::from_remote(&field.type_as_string),
            internal_name: field.internal_name,
            display_name: field.title,
            min_width,
            max_width,
        });
    }
    columns
}
