//! Interpreter module resolution.

use crate::domain::{InterpreterInfo, Lookup};

/// Port for asking the target Python interpreter where a package lives.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleLocatorPort: Send + Sync {
    /// Resolve `name` through the interpreter's normal import machinery.
    ///
    /// Returns the package's first submodule search location.
    fn find_package(&self, name: &str) -> Lookup;

    /// Version, platform and stdlib location of the interpreter, or `None`
    /// when no interpreter could be queried.
    fn interpreter_info(&self) -> Option<InterpreterInfo>;
}
