// Malformed individual cells never show up here: they degrade to `0` while parsing.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no data found")]
    NoDataFound,
    #[error("data not available yet")]
    NotYetAvailable,
    #[error("upstream failure: {0:#}")]
    Upstream(#[from] anyhow::Error),
}
