//! Output formatting for dispatch results

pub mod console;
pub mod formatter;
pub mod json;
