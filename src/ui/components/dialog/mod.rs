//! Dialog components for TUI

mod base;

pub use base::Dialog;
