//! Build script for storefront crate.
//!
//! Fingerprints the stylesheet and client script so they can be served with
//! long cache lifetimes.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    fingerprint(&static_dir.join("css/main.css"), "CSS_HASH");
    fingerprint(&static_dir.join("js/storefront.js"), "JS_HASH");
}

/// Hash an asset and expose the first 8 hex chars as `env_var`.
///
/// Templates append the hash as a `?v=` query so a new build busts caches.
fn fingerprint(path: &Path, env_var: &str) {
    println!("cargo:rerun-if-changed={}", path.display());

    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", path.display());
            println!("cargo:rustc-env={env_var}=dev");
            return;
        }
    };

    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = format!("{:x}", hasher.finalize());
    let short_hash = hash.get(..8).unwrap_or("dev");

    println!("cargo:rustc-env={env_var}={short_hash}");
}
