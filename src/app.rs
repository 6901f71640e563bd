//! Project Board App
//!
//! Loads configuration, builds the board and mounts its view.

use board_core::{Board, BoardConfig};
use leptos::prelude::*;

use crate::components::BoardView;
use crate::context::BoardContext;
use crate::dom;

const BUNDLED_CONFIG: &str = include_str!("../assets/board.json");

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();

    if let Some(src) = config.analytics_script.as_deref() {
        if let Err(err) = dom::load_script(src) {
            log::warn!("analytics script not loaded: {err:?}");
        }
    }

    match Board::init(config) {
        Ok(board) => {
            provide_context(BoardContext::new(board));
            view! { <BoardView /> }.into_any()
        }
        Err(err) => {
            log::error!("failed to build board: {err}");
            let message = format!("Failed to build board: {err}");
            view! { <p class="board-error">{message}</p> }.into_any()
        }
    }
}

/// Inline page config wins over the bundled one; bad inline config falls back
fn load_config() -> BoardConfig {
    if let Some(json) = dom::inline_config() {
        match BoardConfig::from_json(&json) {
            Ok(config) => return config,
            Err(err) => log::warn!("ignoring inline config: {err}"),
        }
    }
    bundled_config()
}

fn bundled_config() -> BoardConfig {
    BoardConfig::from_json(BUNDLED_CONFIG).unwrap_or_else(|err| {
        log::error!("bundled config invalid: {err}");
        BoardConfig::default()
    })
}
