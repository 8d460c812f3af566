//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer reads the frame output computed by the session and turns it
//! into cells on the terminal.  No state is mutated here.

pub mod chrome;
pub mod layout;
pub mod popup;
pub mod spinner;
pub mod theme;
pub mod track;
pub mod transition;
pub mod view;
