//! Tooltip Component
//!
//! An info card rendered from the `tooltip` template, placed just under the
//! bottom-left corner of its host. Clicking it closes it.

use crate::component::{Component, ComponentBase};
use crate::config::TooltipSettings;
use crate::error::{BoardError, BoardResult};
use crate::event::{Action, EventKind};
use crate::selector::Selector;
use crate::tree::{NodeKey, UiTree};

/// Id of the template the card body is cloned from
pub const TOOLTIP_TEMPLATE: &str = "tooltip";

/// Close notification, produced exactly once per tooltip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipClosed {
    /// Id of the project item the tooltip belongs to
    pub owner: String,
}

#[derive(Debug, Clone)]
pub struct Tooltip {
    base: ComponentBase,
    owner: String,
    text: String,
    closed: bool,
}

impl Tooltip {
    /// Build the card. It is not in the document until [`Component::attach`].
    pub fn new(
        tree: &mut UiTree,
        owner: &str,
        text: Option<&str>,
        host_id: Option<&str>,
        settings: &TooltipSettings,
    ) -> BoardResult<Self> {
        let mut base = ComponentBase::new(tree, host_id, false)?;
        let text = text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(settings.placeholder.as_str())
            .to_string();

        let card = tree.create_element("div");
        if let Err(err) = render_card(tree, card, base.host(), owner, &text, settings) {
            tree.discard(card);
            return Err(err);
        }
        base.set_element(card);

        Ok(Self {
            base,
            owner: owner.to_string(),
            text,
            closed: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Remove the card and notify the owner. A second call does nothing.
    pub fn close(&mut self, tree: &mut UiTree) -> Option<TooltipClosed> {
        if self.closed {
            return None;
        }
        self.closed = true;
        self.detach(tree);
        if let Some(element) = self.base.element() {
            tree.discard(element);
        }
        Some(TooltipClosed {
            owner: self.owner.clone(),
        })
    }
}

impl Component for Tooltip {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

fn render_card(
    tree: &mut UiTree,
    card: NodeKey,
    host: NodeKey,
    owner: &str,
    text: &str,
    settings: &TooltipSettings,
) -> BoardResult<()> {
    tree.add_class(card, "card")?;
    for node in tree.instantiate_template(TOOLTIP_TEMPLATE)? {
        tree.append_child(card, node)?;
    }
    let paragraph = tree
        .query_selector_in(card, &Selector::parse("p")?)
        .ok_or_else(|| BoardError::TemplateMissing(format!("{TOOLTIP_TEMPLATE} p")))?;
    tree.set_text(paragraph, text)?;

    let host_layout = tree.layout(host);
    let x = host_layout.offset_left + settings.offset_x;
    let y = host_layout.offset_top + host_layout.offset_height - host_layout.parent_scroll_top
        + settings.offset_y;
    tree.set_style(card, "position", "absolute")?;
    tree.set_style(card, "left", &format!("{x}px"))?;
    tree.set_style(card, "top", &format!("{y}px"))?;

    tree.add_listener(card, EventKind::Click, Action::CloseTooltip(owner.to_string()))?;
    Ok(())
}
