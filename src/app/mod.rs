//! Application orchestration — session state, frame loop plumbing, and
//! input handling.

pub mod event;
pub mod frame;
pub mod handler;
pub mod media;
pub mod scroll;
pub mod settings;
pub mod smooth_scroll;
pub mod state;
