//! Output formatting for license records

pub mod json;
pub mod terminal;
