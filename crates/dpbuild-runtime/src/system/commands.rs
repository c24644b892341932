//! Generic command version extraction.

use std::process::Command;

use tracing::debug;

/// Run `cmd version_flag` and return the first non-empty output line.
///
/// Returns `None` when the command cannot be spawned or exits unsuccessfully.
pub fn get_command_version(cmd: &str, version_flag: &str) -> Option<String> {
    let output = match Command::new(cmd).arg(version_flag).output() {
        Ok(output) => output,
        Err(err) => {
            debug!(command = %cmd, error = %err, "Failed to run command");
            return None;
        }
    };

    if !output.status.success() {
        debug!(command = %cmd, status = ?output.status.code(), "Command exited unsuccessfully");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Try stdout first, fall back to stderr (some tools output to stderr)
    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToString::to_string)
}

/// Extract the version from a `<name> version <v>` banner line.
///
/// "cmake version 3.28.1" -> "3.28.1"; packaged builds such as EPEL's
/// `cmake3` print their own executable name first.
pub fn parse_cmake_version(first_line: &str) -> Option<String> {
    let mut words = first_line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(_), Some(word), Some(version)) if word.eq_ignore_ascii_case("version") => {
            Some(version.to_string())
        }
        _ => None,
    }
}
