//! Board
//!
//! Owns the UI tree and both project lists. Clicks come in as node keys,
//! listeners turn them into [`Action`]s, and list events are routed here so
//! the lists never reference each other.

use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};
use crate::event::{Action, EventKind};
use crate::markup;
use crate::project_item::ProjectItem;
use crate::project_list::{ListEvent, ListType, ProjectList};
use crate::tree::{Layout, NodeKey, UiTree};

#[derive(Debug)]
pub struct Board {
    tree: UiTree,
    active: ProjectList,
    finished: ProjectList,
    config: BoardConfig,
}

impl Board {
    /// Render the page, discover both lists and wire each to the other
    pub fn init(config: BoardConfig) -> BoardResult<Self> {
        config.validate()?;
        let mut tree = UiTree::new();
        markup::render(&mut tree, &config)?;

        let mut active = ProjectList::new(&mut tree, ListType::Active)?;
        let mut finished = ProjectList::new(&mut tree, ListType::Finished)?;
        active.set_switch_handler(ListType::Finished);
        finished.set_switch_handler(ListType::Active);

        log::info!(
            "board ready: {} active, {} finished",
            active.projects().len(),
            finished.projects().len()
        );
        Ok(Self {
            tree,
            active,
            finished,
            config,
        })
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn list(&self, list_type: ListType) -> &ProjectList {
        match list_type {
            ListType::Active => &self.active,
            ListType::Finished => &self.finished,
        }
    }

    pub fn projects(&self, list_type: ListType) -> &[ProjectItem] {
        self.list(list_type).projects()
    }

    /// Every project id, active first
    pub fn project_ids(&self) -> Vec<String> {
        ListType::ALL
            .iter()
            .flat_map(|list| self.list(*list).ids())
            .map(str::to_string)
            .collect()
    }

    pub fn find_project(&self, id: &str) -> Option<&ProjectItem> {
        ListType::ALL
            .iter()
            .flat_map(|list| self.list(*list).projects())
            .find(|p| p.id() == id)
    }

    /// Which list currently owns `id`
    pub fn list_of(&self, id: &str) -> Option<ListType> {
        ListType::ALL
            .into_iter()
            .find(|list| self.list(*list).contains(id))
    }

    /// Record measured layout for an element, used to place tooltips
    pub fn set_layout(&mut self, element_id: &str, layout: Layout) -> BoardResult<()> {
        let key = self.tree.require_id(element_id)?;
        self.tree.set_layout(key, layout)
    }

    /// Element ids the renderer should scroll into view
    pub fn take_scroll_targets(&mut self) -> Vec<String> {
        self.tree
            .take_scroll_requests()
            .into_iter()
            .filter_map(|key| self.tree.id_of(key).map(str::to_string))
            .collect()
    }

    // ========================
    // Dispatch
    // ========================

    /// Dispatch a click on `target`, bubbling through its ancestors
    pub fn click(&mut self, target: NodeKey) -> BoardResult<()> {
        let actions = self.tree.dispatch_actions(target, EventKind::Click)?;
        for action in actions {
            self.handle(action)?;
        }
        Ok(())
    }

    /// Click an element by id
    pub fn click_id(&mut self, element_id: &str) -> BoardResult<()> {
        let key = self.tree.require_id(element_id)?;
        self.click(key)
    }

    pub fn handle(&mut self, action: Action) -> BoardResult<()> {
        log::trace!("handling {action:?}");
        match action {
            Action::ShowMoreInfo(id) => {
                self.show_more_info(&id)?;
            }
            Action::CloseTooltip(id) => {
                self.close_tooltip(&id)?;
            }
            Action::Switch { project_id, list } => {
                let event = self.list_mut(list).switch_project(&project_id)?;
                self.route(event)?;
            }
        }
        Ok(())
    }

    fn route(&mut self, event: ListEvent) -> BoardResult<()> {
        match event {
            ListEvent::ItemRemoved { item, from, to } => {
                log::info!("moving {} from {from} to {to}", item.id());
                let scroll = self.config.scroll_on_move;
                let (list, tree, _) = self.split_mut(to);
                list.add_project(tree, item, scroll)
            }
        }
    }

    // ========================
    // Operations
    // ========================

    /// Open the tooltip of `id`. Returns `false` when one is already open.
    pub fn show_more_info(&mut self, id: &str) -> BoardResult<bool> {
        let list = self.require_list_of(id)?;
        let (list, tree, config) = self.split_mut(list);
        let item = list
            .find_mut(id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.to_string()))?;
        item.show_more_info(tree, &config.tooltip)
    }

    pub fn close_tooltip(&mut self, id: &str) -> BoardResult<bool> {
        let list = self.require_list_of(id)?;
        let (list, tree, _) = self.split_mut(list);
        let item = list
            .find_mut(id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.to_string()))?;
        Ok(item.close_tooltip(tree))
    }

    /// Move `id` to the other list, as its switch button would
    pub fn switch(&mut self, id: &str) -> BoardResult<()> {
        let list = self.require_list_of(id)?;
        self.handle(Action::Switch {
            project_id: id.to_string(),
            list,
        })
    }

    fn require_list_of(&self, id: &str) -> BoardResult<ListType> {
        self.list_of(id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.to_string()))
    }

    fn list_mut(&mut self, list_type: ListType) -> &mut ProjectList {
        self.split_mut(list_type).0
    }

    /// Borrow one list alongside the tree and config
    fn split_mut(&mut self, list_type: ListType) -> (&mut ProjectList, &mut UiTree, &BoardConfig) {
        let list = match list_type {
            ListType::Active => &mut self.active,
            ListType::Finished => &mut self.finished,
        };
        (list, &mut self.tree, &self.config)
    }
}
