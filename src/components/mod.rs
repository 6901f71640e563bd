//! UI Components
//!
//! Leptos components rendering the board's UI tree.

mod board_view;
mod node_view;

pub use board_view::BoardView;
pub use node_view::NodeView;
