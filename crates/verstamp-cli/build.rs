//! Stamps `verstamp --version` with the tool's own four-part version.
//!
//! Uses the same resolution as the `verstamp` binary, with the crate version
//! standing in for the default base when `HEAD` is untagged.

use std::path::PathBuf;

use verstamp_core::{GitProbe, base_version_from_tag, normalize_version};

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/tags");

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let git = GitProbe::default();

    let commit = git.resolve_commit(&manifest_dir);
    let tag = git.resolve_tag(&manifest_dir);
    let base = base_version_from_tag(&tag).unwrap_or(env!("CARGO_PKG_VERSION"));

    println!(
        "cargo:rustc-env=VERSTAMP_BUILD_VERSION={}",
        normalize_version(base, &commit)
    );
}
