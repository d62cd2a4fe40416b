//! Command model and menu navigation
//!
//! A command tree is a static configuration built once at startup: leaf
//! commands only run an action, navigable commands additionally open a
//! sub-menu of child commands. [`menu::MenuState`] tracks which sibling set
//! is currently visible as the user descends into sub-menus.

pub mod command;
pub mod menu;
