//! Board Context
//!
//! The board provided via Leptos Context API, plus click forwarding.

use board_core::{Board, EventKind, NodeKey};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dom;

#[derive(Clone, Copy)]
pub struct BoardContext {
    pub board: RwSignal<Board>,
}

impl BoardContext {
    pub fn new(board: Board) -> Self {
        Self { board: RwSignal::new(board) }
    }

    /// Forward a DOM click on `node` into the board.
    ///
    /// Layout is measured from the rendered page first so tooltips can be
    /// placed. Scroll requests run after the re-render has moved the element.
    pub fn click(&self, node: NodeKey) {
        let handled = self.board.with_untracked(|board| {
            board
                .tree()
                .dispatch_actions(node, EventKind::Click)
                .map(|actions| !actions.is_empty())
                .unwrap_or(false)
        });
        if !handled {
            return;
        }

        let targets = self.board.try_update(|board| {
            for id in board.project_ids() {
                if let Some(layout) = dom::measure(&id) {
                    if let Err(err) = board.set_layout(&id, layout) {
                        log::warn!("layout for #{id} not recorded: {err}");
                    }
                }
            }
            if let Err(err) = board.click(node) {
                log::error!("click not handled: {err}");
            }
            board.take_scroll_targets()
        });

        let targets = targets.unwrap_or_default();
        if targets.is_empty() {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            for id in targets {
                dom::scroll_into_view(&id);
            }
        });
    }
}

pub fn use_board() -> BoardContext {
    expect_context::<BoardContext>()
}
