//! One module per CLI command.

pub mod completions;
pub mod init;
pub mod password;
pub mod snippet;
pub mod status;
pub mod todo;
