//! Application module: the page-flow model used by the TUI and runtime.

mod model;

pub use model::*;
