//! Project Item
//!
//! Wires the two buttons of one list entry: the first opens a tooltip,
//! the last moves the project to the other list.

use crate::component::Component;
use crate::config::TooltipSettings;
use crate::dom_helper;
use crate::error::{BoardError, BoardResult};
use crate::event::{Action, EventKind, ListenerId};
use crate::project_list::ListType;
use crate::selector::Selector;
use crate::tooltip::{Tooltip, TooltipClosed};
use crate::tree::{NodeKey, UiTree};

const MORE_INFO_BUTTON: &str = "button:first-of-type";
const SWITCH_BUTTON: &str = "button:last-of-type";

#[derive(Debug, Clone)]
pub struct ProjectItem {
    id: String,
    has_active_tooltip: bool,
    /// List whose switch handler the switch button invokes
    owner: ListType,
    more_info_listener: Option<ListenerId>,
    tooltip: Option<Tooltip>,
}

impl ProjectItem {
    pub fn new(tree: &mut UiTree, id: &str, owner: ListType) -> BoardResult<Self> {
        let mut item = Self {
            id: id.to_string(),
            has_active_tooltip: false,
            owner,
            more_info_listener: None,
            tooltip: None,
        };
        item.connect_more_info_button(tree)?;
        item.connect_switch_button(tree)?;
        Ok(item)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> ListType {
        self.owner
    }

    pub fn has_active_tooltip(&self) -> bool {
        self.has_active_tooltip
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    fn button(&self, tree: &UiTree, which: &str) -> BoardResult<NodeKey> {
        let element = tree.require_id(&self.id)?;
        tree.query_selector_in(element, &Selector::parse(which)?)
            .ok_or_else(|| BoardError::ElementNotFound(format!("#{} {which}", self.id)))
    }

    pub fn more_info_button(&self, tree: &UiTree) -> BoardResult<NodeKey> {
        self.button(tree, MORE_INFO_BUTTON)
    }

    pub fn switch_button(&self, tree: &UiTree) -> BoardResult<NodeKey> {
        self.button(tree, SWITCH_BUTTON)
    }

    pub fn connect_more_info_button(&mut self, tree: &mut UiTree) -> BoardResult<()> {
        let button = self.more_info_button(tree)?;
        if let Some(previous) = self.more_info_listener.take() {
            tree.remove_listener(previous);
        }
        let action = Action::ShowMoreInfo(self.id.clone());
        let listener = tree.add_listener(button, EventKind::Click, action)?;
        self.more_info_listener = Some(listener);
        Ok(())
    }

    /// Open the tooltip. Returns `false` when one is already showing.
    ///
    /// The flag is checked before anything is built, so a second click
    /// constructs nothing.
    pub fn show_more_info(
        &mut self,
        tree: &mut UiTree,
        settings: &TooltipSettings,
    ) -> BoardResult<bool> {
        if self.has_active_tooltip {
            return Ok(false);
        }
        let element = tree.require_id(&self.id)?;
        let text = tree.data(element, "extra-info").map(str::to_string);
        let tooltip = Tooltip::new(tree, &self.id, text.as_deref(), Some(&self.id), settings)?;
        tooltip.attach(tree)?;
        self.tooltip = Some(tooltip);
        self.has_active_tooltip = true;
        Ok(true)
    }

    /// Close the open tooltip, if any. Returns whether one was closed.
    pub fn close_tooltip(&mut self, tree: &mut UiTree) -> bool {
        let Some(mut tooltip) = self.tooltip.take() else {
            return false;
        };
        match tooltip.close(tree) {
            Some(closed) => {
                self.on_tooltip_closed(&closed);
                true
            }
            None => false,
        }
    }

    fn on_tooltip_closed(&mut self, closed: &TooltipClosed) {
        debug_assert_eq!(closed.owner, self.id);
        self.has_active_tooltip = false;
    }

    /// Rebind the switch button. Old listeners are dropped first, so repeated
    /// calls never stack handlers.
    pub fn connect_switch_button(&mut self, tree: &mut UiTree) -> BoardResult<()> {
        let button = self.switch_button(tree)?;
        let button = dom_helper::clear_event_listeners(tree, button);
        tree.add_listener(
            button,
            EventKind::Click,
            Action::Switch {
                project_id: self.id.clone(),
                list: self.owner,
            },
        )?;
        Ok(())
    }

    /// Called after the project lands in another list
    pub fn update(&mut self, tree: &mut UiTree, list_type: ListType) -> BoardResult<()> {
        self.owner = list_type;
        let button = self.switch_button(tree)?;
        tree.set_text(button, list_type.switch_label())?;
        self.connect_switch_button(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tooltip::TOOLTIP_TEMPLATE;

    fn tree_with_item(extra_info: Option<&str>) -> UiTree {
        let mut tree = UiTree::new();
        let template = tree.create_template(TOOLTIP_TEMPLATE).unwrap();
        let p = tree.create_element("p");
        tree.append_child(template, p).unwrap();

        let li = tree.create_element("li");
        tree.set_id(li, "p1").unwrap();
        if let Some(info) = extra_info {
            tree.set_data(li, "extra-info", info).unwrap();
        }
        for label in ["More Info", "Finish"] {
            let button = tree.create_element("button");
            tree.set_text(button, label).unwrap();
            tree.append_child(li, button).unwrap();
        }
        tree.append_child(tree.body(), li).unwrap();
        tree
    }

    fn card_count(tree: &UiTree) -> usize {
        tree.query_selector_all(&Selector::parse("div.card").unwrap()).len()
    }

    #[test]
    fn test_binds_both_buttons() {
        let mut tree = tree_with_item(None);
        let item = ProjectItem::new(&mut tree, "p1", ListType::Active).unwrap();

        let more = item.more_info_button(&tree).unwrap();
        let switch = item.switch_button(&tree).unwrap();
        assert_eq!(tree.actions(more, EventKind::Click), vec![Action::ShowMoreInfo("p1".into())]);
        assert_eq!(
            tree.actions(switch, EventKind::Click),
            vec![Action::Switch { project_id: "p1".into(), list: ListType::Active }]
        );
    }

    #[test]
    fn test_tooltip_state_machine() {
        let mut tree = tree_with_item(Some("Got lifetime access"));
        let mut item = ProjectItem::new(&mut tree, "p1", ListType::Active).unwrap();
        let settings = TooltipSettings::default();

        assert!(item.show_more_info(&mut tree, &settings).unwrap());
        assert!(item.has_active_tooltip());
        assert_eq!(item.tooltip().unwrap().text(), "Got lifetime access");
        assert_eq!(card_count(&tree), 1);

        let nodes_before = tree.node_count();
        assert!(!item.show_more_info(&mut tree, &settings).unwrap());
        assert_eq!(card_count(&tree), 1);
        assert_eq!(tree.node_count(), nodes_before);

        assert!(item.close_tooltip(&mut tree));
        assert!(!item.has_active_tooltip());
        assert_eq!(card_count(&tree), 0);
        assert!(!item.close_tooltip(&mut tree));

        assert!(item.show_more_info(&mut tree, &settings).unwrap());
        assert_eq!(card_count(&tree), 1);
    }

    #[test]
    fn test_update_relabels_and_rebinds() {
        let mut tree = tree_with_item(None);
        let mut item = ProjectItem::new(&mut tree, "p1", ListType::Active).unwrap();
        let switch = item.switch_button(&tree).unwrap();

        item.update(&mut tree, ListType::Finished).unwrap();
        item.update(&mut tree, ListType::Finished).unwrap();

        assert_eq!(item.owner(), ListType::Finished);
        assert_eq!(tree.text(switch), Some("Activate"));
        assert_eq!(
            tree.actions(switch, EventKind::Click),
            vec![Action::Switch { project_id: "p1".into(), list: ListType::Finished }]
        );

        item.update(&mut tree, ListType::Active).unwrap();
        assert_eq!(tree.text(switch), Some("Finish"));
        assert_eq!(tree.listener_count(switch), 1);
    }

    #[test]
    fn test_missing_element() {
        let mut tree = UiTree::new();
        let err = ProjectItem::new(&mut tree, "ghost", ListType::Active).unwrap_err();
        assert!(matches!(err, BoardError::ElementNotFound(_)));
    }
}
