//! Application orchestration: the scroll controller, the simulated page it
//! drives, input handling and headless replay.

pub mod controller;
pub mod event;
pub mod handler;
pub mod page;
pub mod replay;
pub mod smooth_scroll;
pub mod state;
