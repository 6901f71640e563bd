//! Board View Component
//!
//! Renders the children of the tree's `body` into the page.

use leptos::prelude::*;

use crate::components::NodeView;
use crate::context::use_board;

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_board();
    let roots = move || ctx.board.with(|board| {
        let tree = board.tree();
        tree.children(tree.body()).to_vec()
    });

    view! {
        <div class="board">
            <For
                each=roots
                key=|node| *node
                children=move |node| view! { <NodeView node=node /> }
            />
        </div>
    }
}
