use chrono::Local;
use std::process::Command;

/// Embeds `BUILD_HASH` for `bithread --version`.
///
/// Source tarballs have no git metadata, so `BITHREAD_BUILD_HASH` may be set
/// to supply the hash directly.
fn main() {
    println!("cargo:rerun-if-env-changed=BITHREAD_BUILD_HASH");
    // .git is at workspace root, two levels up from this crate
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");

    let build_hash = std::env::var("BITHREAD_BUILD_HASH")
        .ok()
        .filter(|hash| !hash.trim().is_empty())
        .unwrap_or_else(git_build_hash);

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");
}

fn git_build_hash() -> String {
    let head = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string());

    let Some(hash) = head else {
        return "unknown".to_string();
    };

    // Tracked-file modifications only; untracked files don't mark the build dirty
    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .map(|s| !s.success())
        .unwrap_or(false);

    if dirty {
        format!("{hash}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        hash
    }
}
