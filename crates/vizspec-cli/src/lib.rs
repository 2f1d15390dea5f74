//! CLI library components for the vizspec replay tool.

pub mod logging;
pub mod replay;
