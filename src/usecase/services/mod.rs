pub mod alert_links;
pub mod browser_service;
pub mod column_service;
pub mod filter_builder;
pub mod query_service;
pub mod taxonomy_filter;
