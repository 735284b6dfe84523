//! menuforge: a terminal-canvas visual designer for application menu bars.
//!
//! The designer edits an in-memory menu tree. Submenus open as lightweight
//! in-canvas panels instead of real popup windows, so selection rectangles
//! and drop guides can paint on top of them. Everything runs on the single
//! event-loop thread.

pub mod canvas;
pub mod constants;
pub mod designer;
pub mod drag;
pub mod event_loop;
pub mod geometry;
pub mod keybindings;
pub mod layout;
pub mod navigator;
pub mod paint;
pub mod popup;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod tree;
