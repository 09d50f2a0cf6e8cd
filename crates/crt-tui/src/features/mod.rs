//! Feature slices.
//!
//! Each slice keeps its state, reducer and view side by side.

pub mod autocomplete;
pub mod input;
pub mod session;
pub mod statusline;
pub mod transcript;
