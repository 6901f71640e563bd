//! UI Tree
//!
//! The document the board owns. Nodes live in an arena and are addressed by
//! [`NodeKey`]; element ids map onto keys for lookups. The browser layer renders
//! this tree node by node and feeds clicks back in.

use std::collections::{BTreeMap, HashMap};

use crate::error::{BoardError, BoardResult};
use crate::event::{Action, EventKind, ListenerId};
use crate::selector::{Compound, Pseudo, Selector};

/// Stable handle to a node in the tree.
///
/// Freed slots are reused; the generation makes keys to a discarded node
/// stay dead after its slot is handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    index: usize,
    generation: u32,
}

/// Layout metrics measured by the renderer, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    pub offset_left: f64,
    pub offset_top: f64,
    pub offset_height: f64,
    /// Scroll offset of the node's parent element
    pub parent_scroll_top: f64,
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: Option<String>,
    data: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    layout: Layout,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            text: None,
            data: BTreeMap::new(),
            style: BTreeMap::new(),
            layout: Layout::default(),
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Clone)]
struct Listener {
    node: NodeKey,
    kind: EventKind,
    action: Action,
}

/// Arena-backed element tree rooted at `body`
#[derive(Debug, Clone)]
pub struct UiTree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    ids: HashMap<String, NodeKey>,
    templates: HashMap<String, NodeKey>,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener: u64,
    scroll_requests: Vec<NodeKey>,
    body: NodeKey,
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UiTree {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot { generation: 0, node: Some(Node::new("body")) }],
            free: Vec::new(),
            ids: HashMap::new(),
            templates: HashMap::new(),
            listeners: BTreeMap::new(),
            next_listener: 0,
            scroll_requests: Vec::new(),
            body: NodeKey { index: 0, generation: 0 },
        }
    }

    /// Document root; components without an explicit host attach here
    pub fn body(&self) -> NodeKey {
        self.body
    }

    // ========================
    // Nodes
    // ========================

    pub fn create_element(&mut self, tag: &str) -> NodeKey {
        self.insert_node(Node::new(tag))
    }

    fn insert_node(&mut self, node: Node) -> NodeKey {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            return NodeKey { index, generation: slot.generation };
        }
        self.slots.push(Slot { generation: 0, node: Some(node) });
        NodeKey { index: self.slots.len() - 1, generation: 0 }
    }

    /// Live nodes, attached or not
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.node(key).is_ok()
    }

    fn node(&self, key: NodeKey) -> BoardResult<&Node> {
        self.slots
            .get(key.index)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or_else(|| BoardError::ElementNotFound(format!("{key:?}")))
    }

    fn node_mut(&mut self, key: NodeKey) -> BoardResult<&mut Node> {
        self.slots
            .get_mut(key.index)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| BoardError::ElementNotFound(format!("{key:?}")))
    }

    pub fn tag(&self, key: NodeKey) -> Option<&str> {
        self.node(key).ok().map(|n| n.tag.as_str())
    }

    /// Assign an element id; ids are unique across the tree
    pub fn set_id(&mut self, key: NodeKey, id: &str) -> BoardResult<()> {
        match self.ids.get(id) {
            Some(existing) if *existing != key => {
                return Err(BoardError::DuplicateId(id.to_string()));
            }
            _ => {}
        }
        let node = self.node_mut(key)?;
        let previous = node.id.replace(id.to_string());
        if let Some(previous) = previous {
            self.ids.remove(&previous);
        }
        self.ids.insert(id.to_string(), key);
        Ok(())
    }

    pub fn id_of(&self, key: NodeKey) -> Option<&str> {
        self.node(key).ok().and_then(|n| n.id.as_deref())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeKey> {
        self.ids.get(id).copied()
    }

    /// Like [`get_element_by_id`](Self::get_element_by_id) but missing ids are errors
    pub fn require_id(&self, id: &str) -> BoardResult<NodeKey> {
        self.get_element_by_id(id)
            .ok_or_else(|| BoardError::ElementNotFound(format!("#{id}")))
    }

    pub fn add_class(&mut self, key: NodeKey, class: &str) -> BoardResult<()> {
        let node = self.node_mut(key)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn classes(&self, key: NodeKey) -> &[String] {
        self.node(key).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    pub fn has_class(&self, key: NodeKey, class: &str) -> bool {
        self.node(key)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn set_text(&mut self, key: NodeKey, text: &str) -> BoardResult<()> {
        self.node_mut(key)?.text = Some(text.to_string());
        Ok(())
    }

    pub fn text(&self, key: NodeKey) -> Option<&str> {
        self.node(key).ok().and_then(|n| n.text.as_deref())
    }

    /// Set a `data-*` attribute; `name` is given without the prefix
    pub fn set_data(&mut self, key: NodeKey, name: &str, value: &str) -> BoardResult<()> {
        self.node_mut(key)?
            .data
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn data(&self, key: NodeKey, name: &str) -> Option<&str> {
        self.node(key)
            .ok()
            .and_then(|n| n.data.get(name))
            .map(String::as_str)
    }

    pub fn set_style(&mut self, key: NodeKey, property: &str, value: &str) -> BoardResult<()> {
        self.node_mut(key)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    pub fn style(&self, key: NodeKey, property: &str) -> Option<&str> {
        self.node(key)
            .ok()
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    /// Inline style as a `style` attribute value
    pub fn inline_style(&self, key: NodeKey) -> Option<String> {
        let node = self.node(key).ok()?;
        (!node.style.is_empty()).then(|| {
            node.style
                .iter()
                .map(|(prop, value)| format!("{prop}: {value};"))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    pub fn set_layout(&mut self, key: NodeKey, layout: Layout) -> BoardResult<()> {
        self.node_mut(key)?.layout = layout;
        Ok(())
    }

    pub fn layout(&self, key: NodeKey) -> Layout {
        self.node(key).map(|n| n.layout).unwrap_or_default()
    }

    // ========================
    // Structure
    // ========================

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.node(key).ok().and_then(|n| n.parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.node(key).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Append `child` as the last child of `parent`, moving it if already placed
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> BoardResult<()> {
        self.insert_child(parent, child, false)
    }

    /// Insert `child` as the first child of `parent`, moving it if already placed
    pub fn prepend_child(&mut self, parent: NodeKey, child: NodeKey) -> BoardResult<()> {
        self.insert_child(parent, child, true)
    }

    fn insert_child(&mut self, parent: NodeKey, child: NodeKey, at_start: bool) -> BoardResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if child == self.body || self.is_inclusive_ancestor(child, parent) {
            return Err(BoardError::Hierarchy(format!(
                "cannot insert {child:?} under {parent:?}"
            )));
        }
        self.detach(child);
        self.node_mut(child)?.parent = Some(parent);
        let siblings = &mut self.node_mut(parent)?.children;
        if at_start {
            siblings.insert(0, child);
        } else {
            siblings.push(child);
        }
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeKey, mut key: NodeKey) -> bool {
        loop {
            if key == ancestor {
                return true;
            }
            match self.parent(key) {
                Some(parent) => key = parent,
                None => return false,
            }
        }
    }

    /// Unlink a node from its parent. Returns whether it had one.
    pub fn detach(&mut self, key: NodeKey) -> bool {
        let Some(parent) = self.parent(key) else {
            return false;
        };
        if let Ok(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != key);
        }
        if let Ok(node) = self.node_mut(key) {
            node.parent = None;
        }
        true
    }

    /// Whether the node is reachable from `body`
    pub fn is_connected(&self, key: NodeKey) -> bool {
        self.contains(key) && self.is_inclusive_ancestor(self.body, key)
    }

    /// Detach a subtree and free its nodes, ids and listeners
    pub fn discard(&mut self, key: NodeKey) {
        if key == self.body || !self.contains(key) {
            return;
        }
        self.detach(key);
        let mut doomed = vec![key];
        doomed.extend(self.descendants(key));
        for dead in &doomed {
            let Some(node) = self.slots.get_mut(dead.index).and_then(|slot| slot.node.take()) else {
                continue;
            };
            if let Some(id) = node.id {
                self.ids.remove(&id);
            }
            self.free.push(dead.index);
        }
        self.listeners.retain(|_, l| !doomed.contains(&l.node));
        self.scroll_requests.retain(|k| !doomed.contains(k));
        self.templates.retain(|_, k| !doomed.contains(k));
    }

    /// Descendants of `scope` in document order, excluding `scope`
    pub fn descendants(&self, scope: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeKey> = self.children(scope).iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            out.push(key);
            stack.extend(self.children(key).iter().rev().copied());
        }
        out
    }

    // ========================
    // Templates
    // ========================

    /// Create an inert `template` whose children are cloned on instantiation
    pub fn create_template(&mut self, name: &str) -> BoardResult<NodeKey> {
        if self.templates.contains_key(name) {
            return Err(BoardError::DuplicateId(name.to_string()));
        }
        let key = self.create_element("template");
        self.templates.insert(name.to_string(), key);
        Ok(key)
    }

    /// Deep-clone the template's content. Clones carry no ids or listeners.
    pub fn instantiate_template(&mut self, name: &str) -> BoardResult<Vec<NodeKey>> {
        let template = *self
            .templates
            .get(name)
            .ok_or_else(|| BoardError::TemplateMissing(name.to_string()))?;
        let content = self.children(template).to_vec();
        content.into_iter().map(|key| self.deep_clone(key)).collect()
    }

    fn deep_clone(&mut self, key: NodeKey) -> BoardResult<NodeKey> {
        let source = self.node(key)?;
        let mut copy = Node::new(&source.tag);
        copy.classes = source.classes.clone();
        copy.text = source.text.clone();
        copy.data = source.data.clone();
        copy.style = source.style.clone();
        let children = source.children.clone();

        let clone = self.insert_node(copy);
        for child in children {
            let child_clone = self.deep_clone(child)?;
            self.append_child(clone, child_clone)?;
        }
        Ok(clone)
    }

    // ========================
    // Listeners
    // ========================

    pub fn add_listener(
        &mut self,
        node: NodeKey,
        kind: EventKind,
        action: Action,
    ) -> BoardResult<ListenerId> {
        self.node(node)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Listener { node, kind, action });
        Ok(id)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Deregister every listener on `node`, returning how many were removed
    pub fn clear_listeners(&mut self, node: NodeKey) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|_, l| l.node != node);
        before - self.listeners.len()
    }

    pub fn listener_count(&self, node: NodeKey) -> usize {
        self.listeners.values().filter(|l| l.node == node).count()
    }

    /// Actions registered on `node` for `kind`, in registration order
    pub fn actions(&self, node: NodeKey, kind: EventKind) -> Vec<Action> {
        self.listeners
            .values()
            .filter(|l| l.node == node && l.kind == kind)
            .map(|l| l.action.clone())
            .collect()
    }

    /// Actions fired by an event on `target`, bubbling up through its ancestors
    pub fn dispatch_actions(&self, target: NodeKey, kind: EventKind) -> BoardResult<Vec<Action>> {
        self.node(target)?;
        let mut actions = Vec::new();
        let mut current = Some(target);
        while let Some(key) = current {
            actions.extend(self.actions(key, kind));
            current = self.parent(key);
        }
        Ok(actions)
    }

    // ========================
    // Scrolling
    // ========================

    pub fn request_scroll(&mut self, key: NodeKey) {
        if !self.scroll_requests.contains(&key) {
            self.scroll_requests.push(key);
        }
    }

    pub fn take_scroll_requests(&mut self) -> Vec<NodeKey> {
        std::mem::take(&mut self.scroll_requests)
    }

    // ========================
    // Queries
    // ========================

    pub fn query_selector(&self, selector: &Selector) -> Option<NodeKey> {
        self.query_selector_in(self.body, selector)
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeKey> {
        self.query_selector_all_in(self.body, selector)
    }

    /// First descendant of `scope` matching `selector`, in document order
    pub fn query_selector_in(&self, scope: NodeKey, selector: &Selector) -> Option<NodeKey> {
        self.descendants(scope)
            .into_iter()
            .find(|key| self.matches(*key, selector))
    }

    pub fn query_selector_all_in(&self, scope: NodeKey, selector: &Selector) -> Vec<NodeKey> {
        self.descendants(scope)
            .into_iter()
            .filter(|key| self.matches(*key, selector))
            .collect()
    }

    pub fn matches(&self, key: NodeKey, selector: &Selector) -> bool {
        let Some((last, outer)) = selector.compounds().split_last() else {
            return false;
        };
        if !self.matches_compound(key, last) {
            return false;
        }
        let mut ancestor = self.parent(key);
        for compound in outer.iter().rev() {
            loop {
                match ancestor {
                    Some(a) if self.matches_compound(a, compound) => {
                        ancestor = self.parent(a);
                        break;
                    }
                    Some(a) => ancestor = self.parent(a),
                    None => return false,
                }
            }
        }
        true
    }

    fn matches_compound(&self, key: NodeKey, compound: &Compound) -> bool {
        let Ok(node) = self.node(key) else {
            return false;
        };
        if compound.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if compound.id.is_some() && compound.id != node.id {
            return false;
        }
        if !compound
            .classes
            .iter()
            .all(|class| node.classes.contains(class))
        {
            return false;
        }
        match (compound.pseudo, node.parent) {
            (None, _) | (Some(_), None) => true,
            (Some(pseudo), Some(parent)) => {
                let mut same_type = self
                    .children(parent)
                    .iter()
                    .copied()
                    .filter(|sibling| self.tag(*sibling) == Some(node.tag.as_str()));
                let edge = match pseudo {
                    Pseudo::FirstOfType => same_type.next(),
                    Pseudo::LastOfType => same_type.last(),
                };
                edge == Some(key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project_list::ListType;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    /// body > section#list > ul > [li#a > (button, button), li#b]
    fn sample() -> (UiTree, NodeKey, NodeKey, NodeKey) {
        let mut tree = UiTree::new();
        let section = tree.create_element("section");
        tree.set_id(section, "list").unwrap();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        tree.set_id(a, "a").unwrap();
        tree.set_id(b, "b").unwrap();
        for label in ["More Info", "Finish"] {
            let button = tree.create_element("button");
            tree.set_text(button, label).unwrap();
            tree.append_child(a, button).unwrap();
        }
        tree.append_child(tree.body(), section).unwrap();
        tree.append_child(section, ul).unwrap();
        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();
        (tree, ul, a, b)
    }

    #[test]
    fn test_append_moves_existing_child() {
        let (mut tree, ul, a, b) = sample();
        tree.append_child(ul, a).unwrap();
        assert_eq!(tree.children(ul), &[b, a]);

        tree.prepend_child(ul, a).unwrap();
        assert_eq!(tree.children(ul), &[a, b]);
    }

    #[test]
    fn test_rejects_cycles() {
        let (mut tree, ul, a, _) = sample();
        assert!(matches!(tree.append_child(a, ul), Err(BoardError::Hierarchy(_))));
        assert!(matches!(tree.append_child(a, a), Err(BoardError::Hierarchy(_))));
        assert_eq!(tree.parent(a), Some(ul));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let (mut tree, ul, a, _) = sample();
        assert!(matches!(tree.set_id(ul, "a"), Err(BoardError::DuplicateId(_))));
        // Re-assigning a node its own id is fine
        tree.set_id(a, "a").unwrap();
        tree.set_id(a, "renamed").unwrap();
        assert_eq!(tree.get_element_by_id("a"), None);
        assert_eq!(tree.get_element_by_id("renamed"), Some(a));
    }

    #[test]
    fn test_query_selectors() {
        let (tree, ul, a, b) = sample();
        assert_eq!(tree.query_selector(&sel("#list ul")), Some(ul));
        assert_eq!(tree.query_selector_all(&sel("#list li")), vec![a, b]);
        assert_eq!(tree.query_selector(&sel("#missing li")), None);

        let first = tree.query_selector_in(a, &sel("button:first-of-type")).unwrap();
        let last = tree.query_selector_in(a, &sel("button:last-of-type")).unwrap();
        assert_eq!(tree.text(first), Some("More Info"));
        assert_eq!(tree.text(last), Some("Finish"));
        assert_eq!(tree.query_selector_in(b, &sel("button")), None);
    }

    #[test]
    fn test_template_clones_without_ids() {
        let mut tree = UiTree::new();
        let template = tree.create_template("tooltip").unwrap();
        let h2 = tree.create_element("h2");
        tree.set_text(h2, "More Info").unwrap();
        tree.set_id(h2, "heading").unwrap();
        let p = tree.create_element("p");
        tree.append_child(template, h2).unwrap();
        tree.append_child(template, p).unwrap();

        let copies = tree.instantiate_template("tooltip").unwrap();
        assert_eq!(copies.len(), 2);
        assert_eq!(tree.text(copies[0]), Some("More Info"));
        assert_eq!(tree.id_of(copies[0]), None);
        assert_eq!(tree.tag(copies[1]), Some("p"));
        assert!(!tree.is_connected(copies[0]));

        assert!(matches!(
            tree.instantiate_template("nope"),
            Err(BoardError::TemplateMissing(_))
        ));
    }

    #[test]
    fn test_listener_registration() {
        let (mut tree, _, a, _) = sample();
        let action = Action::Switch { project_id: "a".into(), list: ListType::Active };
        let first = tree.add_listener(a, EventKind::Click, action.clone()).unwrap();
        tree.add_listener(a, EventKind::Click, Action::ShowMoreInfo("a".into())).unwrap();
        assert_eq!(tree.listener_count(a), 2);
        assert_eq!(tree.actions(a, EventKind::Click)[0], action);

        assert!(tree.remove_listener(first));
        assert!(!tree.remove_listener(first));
        assert_eq!(tree.clear_listeners(a), 1);
        assert!(tree.actions(a, EventKind::Click).is_empty());
    }

    #[test]
    fn test_dispatch_bubbles_to_ancestors() {
        let (mut tree, ul, a, _) = sample();
        let button = tree.children(a)[0];
        tree.add_listener(button, EventKind::Click, Action::ShowMoreInfo("inner".into())).unwrap();
        tree.add_listener(ul, EventKind::Click, Action::CloseTooltip("outer".into())).unwrap();

        let actions = tree.dispatch_actions(button, EventKind::Click).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::ShowMoreInfo("inner".into()),
                Action::CloseTooltip("outer".into()),
            ]
        );
    }

    #[test]
    fn test_discard_frees_subtree() {
        let (mut tree, ul, a, b) = sample();
        let button = tree.children(a)[1];
        tree.add_listener(button, EventKind::Click, Action::ShowMoreInfo("a".into())).unwrap();
        tree.request_scroll(a);

        tree.discard(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(button));
        assert_eq!(tree.get_element_by_id("a"), None);
        assert_eq!(tree.listener_count(button), 0);
        assert!(tree.take_scroll_requests().is_empty());
        assert_eq!(tree.children(ul), &[b]);
    }

    #[test]
    fn test_discarded_slots_are_reused() {
        let (mut tree, _, a, b) = sample();
        let slots = tree.slot_count();
        let live = tree.node_count();

        tree.discard(b);
        let fresh = tree.create_element("div");
        assert_eq!(tree.slot_count(), slots);
        assert_ne!(fresh, b);
        // A stale key must not reach the node now living in its slot
        assert!(!tree.contains(b));
        assert!(tree.set_text(b, "stale").is_err());
        assert_eq!(tree.text(fresh), None);
        assert_eq!(tree.get_element_by_id("b"), None);

        // li#a and its two buttons
        tree.discard(a);
        for _ in 0..3 {
            tree.create_element("p");
        }
        assert_eq!(tree.slot_count(), slots);
        assert_eq!(tree.node_count(), live);
    }

    #[test]
    fn test_classes_and_inline_style() {
        let (mut tree, _, a, b) = sample();
        tree.add_class(a, "card").unwrap();
        tree.add_class(a, "card").unwrap();
        tree.set_style(a, "position", "absolute").unwrap();
        tree.set_style(a, "left", "20px").unwrap();

        assert_eq!(tree.classes(a), &["card".to_string()]);
        assert_eq!(tree.inline_style(a).as_deref(), Some("left: 20px; position: absolute;"));
        assert_eq!(tree.inline_style(b), None);
    }
}
