//! Events and Actions
//!
//! Listeners are registered against a node and carry an [`Action`] instead of
//! a closure. The board routes actions when the node is clicked.

use crate::project_list::ListType;

/// Handle returned by listener registration, used to deregister it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Kinds of UI events the tree dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
}

/// What happens when a listener fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the tooltip of a project item
    ShowMoreInfo(String),
    /// Close the tooltip owned by a project item
    CloseTooltip(String),
    /// Move a project out of the list that currently owns it
    Switch { project_id: String, list: ListType },
}
