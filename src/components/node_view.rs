//! Node View Component
//!
//! One element of the UI tree. Attributes and text track the board reactively;
//! children are keyed by node so moved and removed elements are diffed rather
//! than re-rendered.

use board_core::NodeKey;
use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::context::use_board;

#[component]
pub fn NodeView(node: NodeKey) -> AnyView {
    let ctx = use_board();

    // Tag, id and data attributes never change after an element is created
    let (tag, id, extra_info) = ctx.board.with_untracked(|board| {
        let tree = board.tree();
        (
            tree.tag(node).unwrap_or("div").to_string(),
            tree.id_of(node).map(str::to_string),
            tree.data(node, "extra-info").map(str::to_string),
        )
    });

    let class = move || ctx.board.with(|board| board.tree().classes(node).join(" "));
    let style = move || ctx.board.with(|board| board.tree().inline_style(node).unwrap_or_default());
    let text = move || ctx.board.with(|board| board.tree().text(node).map(str::to_string));
    let child_keys = move || ctx.board.with(|board| board.tree().children(node).to_vec());

    // The tree bubbles clicks itself, so the DOM event stops here
    let on_click = move |ev: MouseEvent| {
        ev.stop_propagation();
        ctx.click(node);
    };

    let inner = view! {
        {text}
        <For
            each=child_keys
            key=|child| *child
            children=move |child| view! { <NodeView node=child /> }
        />
    };

    match tag.as_str() {
        "section" => view! {
            <section id=id class=class style=style on:click=on_click>{inner}</section>
        }
        .into_any(),
        "header" => view! {
            <header id=id class=class style=style on:click=on_click>{inner}</header>
        }
        .into_any(),
        "h1" => view! { <h1 id=id class=class style=style on:click=on_click>{inner}</h1> }
            .into_any(),
        "h2" => view! { <h2 id=id class=class style=style on:click=on_click>{inner}</h2> }
            .into_any(),
        "ul" => view! { <ul id=id class=class style=style on:click=on_click>{inner}</ul> }
            .into_any(),
        "li" => view! {
            <li id=id class=class style=style data-extra-info=extra_info on:click=on_click>
                {inner}
            </li>
        }
        .into_any(),
        "p" => view! { <p id=id class=class style=style on:click=on_click>{inner}</p> }
            .into_any(),
        "button" => view! {
            <button type="button" id=id class=class style=style on:click=on_click>{inner}</button>
        }
        .into_any(),
        _ => view! { <div id=id class=class style=style on:click=on_click>{inner}</div> }
            .into_any(),
    }
}
