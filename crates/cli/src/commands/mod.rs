//! CLI commands

pub mod check;
pub mod clear_cache;
pub mod init;
pub mod policy;
pub mod status;
