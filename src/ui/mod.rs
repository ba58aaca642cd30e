//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No dataset I/O happens here.

pub mod animation;
pub mod chart_widget;
pub mod layout;
pub mod nav_widget;
pub mod palette;
pub mod popup;
pub mod spinner;
pub mod theme;
