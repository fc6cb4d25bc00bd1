use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("node `{0}` declared more than once")]
    DuplicateNode(String),

    #[error("edge references undeclared node `{0}`")]
    UnknownNode(String),

    #[error("self-loop on node `{0}`")]
    SelfLoop(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
