//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - [`paths`]: Path manipulation (tilde expansion, absolutisation, parent creation)

/// Path manipulation and resolution utilities
pub mod paths;

pub use paths::{ensure_parent_dirs, expand_tilde, make_absolute};
