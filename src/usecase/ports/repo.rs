use crate::domain::entities::column::FieldInfo;
use crate::domain::entities::listing::ListQuery;
use crate::domain::entities::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// The remote pages library: view metadata, item queries and the alert
/// registry of the signed-in user.
pub trait PagesRepository: Send + Sync {
    /// Fields shown by a view, in display order.
    fn view_fields(&self, view_id: &str) -> Result<Vec<FieldInfo>, RepoError>;

    fn query_items(&self, query: &ListQuery) -> Result<Vec<Record>, RepoError>;

    fn current_user_id(&self) -> Result<i64, RepoError>;

    /// Titles of the user's alerts that mention the pages library.
    fn alert_titles(&self, user_id: i64) -> Result<Vec<String>, RepoError>;

    fn list_details(&self) -> Result<ListDetails, RepoError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDetails {
    pub id: String,
    pub title: String,
}
