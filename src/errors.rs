use thiserror::Error;

/// Errors that can occur while loading a corpus or resolving its citations.
///
/// Per-citation outcomes (unresolved, dangling, uncorroborated) are not
/// errors; they are tallied in [`crate::metrics::CitationMetrics`].
#[derive(Error, Debug)]
pub enum CiteGraphError {
    #[error("file error: {message} (path: {path})")]
    File { message: String, path: String },

    #[error("parse error: {message} (path: {path})")]
    Parse { message: String, path: String },

    #[error("malformed citation: pattern matched '{span}' but volume/page could not be extracted")]
    MalformedCitation { span: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `CiteGraphError`.
pub type Result<T> = std::result::Result<T, CiteGraphError>;
