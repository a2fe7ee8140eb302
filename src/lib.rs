//! Scroll choreography for the creator landing page: hero scroll-lock with
//! parallax, sticky section tabs, and reveal-on-intersect.
//!
//! [`core`] holds the pure state machines, [`app::controller`] applies them
//! to anything implementing [`app::controller::Page`], and the rest is the
//! terminal simulator that hosts a virtual page.

pub mod app;
pub mod config;
pub mod constants;
pub mod core;
pub mod ui;
