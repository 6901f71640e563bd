//! DOM Helpers
//!
//! Element relocation and listener reset against the owned [`UiTree`].

use crate::error::{BoardError, BoardResult};
use crate::selector::Selector;
use crate::tree::{NodeKey, UiTree};

/// Drop every listener registered on `element` and hand the same element back.
///
/// The element keeps its identity, so callers can rebind handlers on it
/// without leaving the previous ones attached.
pub fn clear_event_listeners(tree: &mut UiTree, element: NodeKey) -> NodeKey {
    let removed = tree.clear_listeners(element);
    if removed > 0 {
        log::trace!("cleared {removed} listener(s) from {element:?}");
    }
    element
}

/// Append the element with `element_id` as the last child of the first element
/// matching `destination`. With `scroll` set, a scroll-into-view is queued for
/// the renderer.
pub fn move_element(
    tree: &mut UiTree,
    element_id: &str,
    destination: &str,
    scroll: bool,
) -> BoardResult<NodeKey> {
    let element = tree.require_id(element_id)?;
    let selector = Selector::parse(destination)?;
    let target = tree
        .query_selector(&selector)
        .ok_or_else(|| BoardError::SelectorNoMatch(destination.to_string()))?;
    tree.append_child(target, element)?;
    if scroll {
        tree.request_scroll(element);
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Action, EventKind};

    fn two_lists() -> (UiTree, NodeKey, NodeKey, NodeKey) {
        let mut tree = UiTree::new();
        let mut lists = Vec::new();
        for name in ["left", "right"] {
            let section = tree.create_element("section");
            tree.set_id(section, name).unwrap();
            let ul = tree.create_element("ul");
            tree.append_child(tree.body(), section).unwrap();
            tree.append_child(section, ul).unwrap();
            lists.push(ul);
        }
        let item = tree.create_element("li");
        tree.set_id(item, "p1").unwrap();
        tree.append_child(lists[0], item).unwrap();
        (tree, lists[0], lists[1], item)
    }

    #[test]
    fn test_move_element_appends_and_scrolls() {
        let (mut tree, left, right, item) = two_lists();
        let moved = move_element(&mut tree, "p1", "#right ul", true).unwrap();

        assert_eq!(moved, item);
        assert!(tree.children(left).is_empty());
        assert_eq!(tree.children(right), &[item]);
        assert_eq!(tree.take_scroll_requests(), vec![item]);
    }

    #[test]
    fn test_move_element_without_scroll() {
        let (mut tree, _, _, _) = two_lists();
        move_element(&mut tree, "p1", "#right ul", false).unwrap();
        assert!(tree.take_scroll_requests().is_empty());
    }

    #[test]
    fn test_move_element_errors() {
        let (mut tree, left, _, item) = two_lists();
        assert!(matches!(
            move_element(&mut tree, "nope", "#right ul", false),
            Err(BoardError::ElementNotFound(_))
        ));
        assert!(matches!(
            move_element(&mut tree, "p1", "#middle ul", false),
            Err(BoardError::SelectorNoMatch(_))
        ));
        assert!(matches!(
            move_element(&mut tree, "p1", "ul >", false),
            Err(BoardError::InvalidSelector(_))
        ));
        assert_eq!(tree.children(left), &[item]);
    }

    #[test]
    fn test_clear_event_listeners_keeps_identity() {
        let (mut tree, _, _, item) = two_lists();
        tree.add_listener(item, EventKind::Click, Action::ShowMoreInfo("p1".into())).unwrap();
        tree.add_listener(item, EventKind::Click, Action::CloseTooltip("p1".into())).unwrap();

        let same = clear_event_listeners(&mut tree, item);
        assert_eq!(same, item);
        assert_eq!(tree.listener_count(item), 0);
        assert_eq!(tree.get_element_by_id("p1"), Some(item));
    }
}
