//! Hierarchical text menus for interactive console programs.

pub mod config;
pub mod menu;
pub mod platform;
pub mod session;
