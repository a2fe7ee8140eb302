//! Core algorithms – hero scroll-lock engine, section-tab sync, reveal.
//!
//! Nothing in this module depends on any TUI or rendering crate, and
//! nothing here touches a page: every function maps geometry and input to
//! new state, leaving effect application to [`crate::app::controller`].

pub mod easing;
pub mod geometry;
pub mod hero;
pub mod parallax;
pub mod reveal;
pub mod tabs;
