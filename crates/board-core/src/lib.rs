//! Project Board Core
//!
//! Everything the board does, independent of the browser:
//! - tree: the owned UI tree, listeners and templates
//! - component / tooltip: attachable pieces of UI
//! - project_item / project_list / board: list wiring and click routing
//! - markup / config: the initial page and its settings

pub mod board;
pub mod component;
pub mod config;
pub mod dom_helper;
pub mod error;
pub mod event;
pub mod markup;
pub mod project_item;
pub mod project_list;
pub mod selector;
pub mod tooltip;
pub mod tree;

pub use board::Board;
pub use component::{Component, ComponentBase};
pub use config::{BoardConfig, ProjectSeed, TooltipSettings};
pub use error::{BoardError, BoardResult};
pub use event::{Action, EventKind, ListenerId};
pub use project_item::ProjectItem;
pub use project_list::{ListEvent, ListType, ProjectList};
pub use selector::Selector;
pub use tooltip::{Tooltip, TooltipClosed};
pub use tree::{Layout, NodeKey, UiTree};
