//! Helpers shared by the feature slices.

mod text;

pub use text::{sanitize_for_display, truncate_with_ellipsis, wrap_to_width};
