//! Build/version metadata for the dpbuild CLI.

/// Crate version from Cargo.
pub const SEMVER: &str = env!("CARGO_PKG_VERSION");

/// Short git SHA emitted by the build script, or `"unknown"`.
pub const GIT_SHA_SHORT: &str = env!("VERGEN_GIT_SHA");

/// True when `GIT_SHA_SHORT` is a real 7-character hex hash.
pub const HAS_GIT_SHA: bool = is_short_hex(GIT_SHA_SHORT);

const VERSION_WITH_SHA: &str =
    concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

/// `--version` text: `0.1.0 (a1b2c3d)`, or just `0.1.0` without git data.
pub const LONG_VERSION: &str = if HAS_GIT_SHA {
    VERSION_WITH_SHA
} else {
    SEMVER
};

const fn is_short_hex(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_hexdigit() {
            return false;
        }
        i += 1;
    }
    true
}
