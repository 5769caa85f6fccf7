use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FurloughError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(furlough::io))]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(furlough::config))]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(furlough::serde))]
    Serde(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    #[diagnostic(code(furlough::db))]
    Db(#[from] sea_orm::DbErr),

    #[error("Permission type {0} does not exist")]
    #[diagnostic(code(furlough::invalid_reference))]
    InvalidReference(i32),

    #[error("Permission {0} not readable after commit")]
    #[diagnostic(code(furlough::inconsistent_state))]
    InconsistentState(i32),

    #[error("Search index error: {0}")]
    #[diagnostic(code(furlough::index))]
    Index(String),

    #[error("Event publish error: {0}")]
    #[diagnostic(code(furlough::publish))]
    Publish(String),

    #[error("Bad request: {0}")]
    #[diagnostic(code(furlough::bad_request))]
    BadRequest(String),

    #[error("{0}")]
    #[diagnostic(code(furlough::other))]
    Other(String),
}
