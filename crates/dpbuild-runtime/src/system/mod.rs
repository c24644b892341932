//! Build tool probing via command execution.

mod cmake;
mod commands;

pub use cmake::CmakeProbe;
pub use commands::{get_command_version, parse_cmake_version};
