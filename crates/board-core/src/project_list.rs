//! Project List
//!
//! Ordered projects of one status. Items leave a list as a
//! [`ListEvent::ItemRemoved`]; the board inserts them into the target list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom_helper;
use crate::error::{BoardError, BoardResult};
use crate::project_item::ProjectItem;
use crate::selector::Selector;
use crate::tree::UiTree;

/// Which column a project sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Active,
    Finished,
}

impl ListType {
    pub const ALL: [ListType; 2] = [ListType::Active, ListType::Finished];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Active => "active",
            ListType::Finished => "finished",
        }
    }

    /// Id of the section holding this list
    pub fn container_id(&self) -> String {
        format!("{}-projects", self.as_str())
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ListType::Active => "Active Projects",
            ListType::Finished => "Finished Projects",
        }
    }

    /// Label of the switch button for a project in this list
    pub fn switch_label(&self) -> &'static str {
        match self {
            ListType::Active => "Finish",
            ListType::Finished => "Activate",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitted by a list for its coordinator
#[derive(Debug)]
pub enum ListEvent {
    /// A project left `from` and should be added to `to`
    ItemRemoved {
        item: ProjectItem,
        from: ListType,
        to: ListType,
    },
}

#[derive(Debug)]
pub struct ProjectList {
    list_type: ListType,
    projects: Vec<ProjectItem>,
    switch_handler: Option<ListType>,
}

impl ProjectList {
    /// Wrap every `li` already under this list's section, in document order
    pub fn new(tree: &mut UiTree, list_type: ListType) -> BoardResult<Self> {
        let selector = Selector::parse(&format!("#{} li", list_type.container_id()))?;
        let mut projects = Vec::new();
        for element in tree.query_selector_all(&selector) {
            let id = tree
                .id_of(element)
                .ok_or_else(|| BoardError::ElementNotFound(format!("id of {selector} entry")))?
                .to_string();
            projects.push(ProjectItem::new(tree, &id, list_type)?);
        }
        let list = Self {
            list_type,
            projects,
            switch_handler: None,
        };
        log::debug!("{} list: {:?}", list_type, list.ids());
        Ok(list)
    }

    pub fn projects(&self) -> &[ProjectItem] {
        &self.projects
    }

    pub fn ids(&self) -> Vec<&str> {
        self.projects.iter().map(ProjectItem::id).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.projects.iter().any(|p| p.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ProjectItem> {
        self.projects.iter_mut().find(|p| p.id() == id)
    }

    /// Register the list that receives projects leaving this one
    pub fn set_switch_handler(&mut self, target: ListType) {
        self.switch_handler = Some(target);
    }

    /// Take ownership of a project arriving from another list.
    ///
    /// The item is rebound to this list before its element moves, so a
    /// failed move still leaves its switch button pointing here.
    pub fn add_project(
        &mut self,
        tree: &mut UiTree,
        mut item: ProjectItem,
        scroll: bool,
    ) -> BoardResult<()> {
        let id = item.id().to_string();
        let updated = item.update(tree, self.list_type);
        self.projects.push(item);
        log::debug!("{} list: {:?}", self.list_type, self.ids());
        updated?;

        let destination = format!("#{} ul", self.list_type.container_id());
        dom_helper::move_element(tree, &id, &destination, scroll)?;
        Ok(())
    }

    /// Remove a project and emit it for insertion elsewhere.
    ///
    /// Nothing changes when the id is unknown or no handler is registered.
    pub fn switch_project(&mut self, id: &str) -> BoardResult<ListEvent> {
        let to = self
            .switch_handler
            .ok_or(BoardError::NoSwitchHandler(self.list_type))?;
        let index = self
            .projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.to_string()))?;
        let item = self.projects.remove(index);
        log::info!("switching {id} from {} to {to}", self.list_type);
        Ok(ListEvent::ItemRemoved {
            item,
            from: self.list_type,
            to,
        })
    }
}
