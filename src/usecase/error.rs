use crate::usecase::ports::repo::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowseError {
    /// The view's columns could not be resolved; the view cannot render.
    #[error("failed to resolve columns for view {view_id}: {source}")]
    Metadata {
        view_id: String,
        #[source]
        source: RepoError,
    },
    /// The item query or the alert lookup failed; nothing was replaced.
    #[error("failed to fetch pages: {0}")]
    Fetch(#[source] RepoError),
    #[error("failed to load list details: {0}")]
    ListDetails(#[source] RepoError),
    #[error("invalid link: {0}")]
    InvalidLink(String),
}
