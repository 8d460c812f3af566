//! Core engine — scroll progress in, visual parameters out.
//!
//! Nothing in this module depends on any TUI or rendering crate, and
//! nothing here holds state between frames.

pub mod boundaries;
pub mod chrome;
pub mod easing;
pub mod frame;
pub mod motion;
pub mod phase;
pub mod range;
pub mod router;
pub mod section;
pub mod timing;
pub mod transition;
