//! Display utilities for environment check output.

use super::{Check, CheckState, GREEN, RESET, YELLOW};

const RED: &str = "\x1b[31m";

pub fn format_state(state: &CheckState) -> String {
    match state {
        CheckState::Ready(detail) => format!("{GREEN}✓ {detail}{RESET}"),
        CheckState::Degraded(detail) => format!("{YELLOW}○ {detail}{RESET}"),
        CheckState::Missing => format!("{RED}✗ missing{RESET}"),
    }
}

/// Print a single row in the status table.
pub fn print_check(check: &Check) {
    println!(
        " {:<19} {:<34} {}",
        check.name,
        format_state(&check.state),
        check.note
    );
}
