//! Board Errors
//!
//! Every fallible board operation returns [`BoardResult`].

use crate::project_list::ListType;

/// Common result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Board-level errors
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("No element matches selector: {0}")]
    SelectorNoMatch(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Invalid hierarchy: {0}")]
    Hierarchy(String),

    #[error("Template missing: {0}")]
    TemplateMissing(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("No switch handler registered for the {0} list")]
    NoSwitchHandler(ListType),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
