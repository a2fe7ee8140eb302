//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads the simulated page and the controller snapshot and turns
//! them into cells on the terminal.  It never mutates either.

pub mod inspector;
pub mod layout;
pub mod page_view;
pub mod theme;
