use std::env;
use std::path::{Path, PathBuf};

use vergen_gix::{Emitter, GixBuilder};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Packagers can pin the SHA without any git probing.
    println!("cargo:rerun-if-env-changed=DPBUILD_BUILD_SHA_SHORT");
    if let Some(sha) = env::var("DPBUILD_BUILD_SHA_SHORT")
        .ok()
        .and_then(|s| normalize_sha_short(&s))
    {
        emit_fallback(Some(&sha));
        return;
    }

    // Git probing is best effort and never fails the build.
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let Some(repo_root) = find_repo_root(Path::new(&manifest_dir)) else {
        emit_fallback(None);
        return;
    };

    let git = match GixBuilder::default()
        .repo_path(Some(repo_root))
        .sha(true)
        .build()
    {
        Ok(git) => git,
        Err(err) => {
            println!("cargo:warning=dpbuild-build-info: git metadata unavailable: {err}");
            emit_fallback(None);
            return;
        }
    };

    if let Err(err) = Emitter::default()
        .add_instructions(&git)
        .and_then(|e| e.emit())
    {
        println!("cargo:warning=dpbuild-build-info: failed to emit git metadata: {err}");
        emit_fallback(None);
    }
}

/// `env!()` in lib.rs needs this variable on every path.
fn emit_fallback(sha_short: Option<&str>) {
    println!(
        "cargo:rustc-env=VERGEN_GIT_SHA={}",
        sha_short.unwrap_or("unknown")
    );
}

fn normalize_sha_short(raw: &str) -> Option<String> {
    let candidate: String = raw.trim().chars().take(7).collect();
    (candidate.len() == 7 && candidate.chars().all(|c| c.is_ascii_hexdigit())).then_some(candidate)
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
