//! Environment variable access.

/// Read-only view of the process environment.
#[cfg_attr(test, mockall::automock)]
pub trait EnvironmentPort: Send + Sync {
    /// Value of `key`, or `None` when unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}
