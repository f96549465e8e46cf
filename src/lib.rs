pub mod config;
pub mod domain;
pub mod infra;
pub mod state;
pub mod usecase;


pub use crate::domain::distinct::DistinctValue;
pub use crate::domain::entities::column::{ColumnDescriptor, ColumnType};
pub use crate::domain::entities::filter::{ActiveFilters, FilterClause};
pub use crate::domain::entities::listing::{ListScope, SortDirection, SortSpec};
pub use crate::domain::entities::record::Record;
pub use crate::usecase::error::BrowseError;
pub use crate::usecase::ports::repo::{PagesRepository, RepoError};
pub use crate::usecase::services::browser_service::{BrowserSettings, PagesBrowser};
