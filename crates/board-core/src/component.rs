//! Component Base
//!
//! Something that renders one element and inserts it into a host.

use crate::error::BoardResult;
use crate::tree::{NodeKey, UiTree};

/// Host, rendered element and insertion side shared by all components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBase {
    host: NodeKey,
    element: Option<NodeKey>,
    insert_before: bool,
}

impl ComponentBase {
    /// Resolve the host by id, falling back to the document body
    pub fn new(tree: &UiTree, host_id: Option<&str>, insert_before: bool) -> BoardResult<Self> {
        let host = match host_id {
            Some(id) => tree.require_id(id)?,
            None => tree.body(),
        };
        Ok(Self {
            host,
            element: None,
            insert_before,
        })
    }

    pub fn host(&self) -> NodeKey {
        self.host
    }

    pub fn element(&self) -> Option<NodeKey> {
        self.element
    }

    pub fn set_element(&mut self, element: NodeKey) {
        self.element = Some(element);
    }

    pub fn insert_before(&self) -> bool {
        self.insert_before
    }
}

/// Attach/detach behaviour for anything built on [`ComponentBase`]
pub trait Component {
    fn base(&self) -> &ComponentBase;

    /// Insert the element into its host, first or last depending on `insert_before`
    fn attach(&self, tree: &mut UiTree) -> BoardResult<()> {
        let base = self.base();
        let Some(element) = base.element() else {
            log::warn!("attach called before the component rendered an element");
            return Ok(());
        };
        if base.insert_before() {
            tree.prepend_child(base.host(), element)
        } else {
            tree.append_child(base.host(), element)
        }
    }

    /// Remove the element from the document; no-op when absent or already removed
    fn detach(&self, tree: &mut UiTree) {
        if let Some(element) = self.base().element() {
            tree.detach(element);
        }
    }
}
