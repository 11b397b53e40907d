// Builds the web bundle with wasm-pack (wasm32 only) and stages `static/` into `dist/`.
use std::process::Command;
use std::{env, fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

// Set on the nested wasm-pack invocation so its own cargo build doesn't recurse.
const NESTED_ENV: &str = "FOLIO_WASM_PACK_NESTED";

fn main() {
    println!("cargo:rerun-if-changed=static");
    println!("cargo:rerun-if-env-changed={NESTED_ENV}");

    let target = env::var("TARGET").unwrap_or_default();
    let nested = env::var_os(NESTED_ENV).is_some();
    if target == "wasm32-unknown-unknown" && !nested {
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .env(NESTED_ENV, "1")
            .status();

        match status {
            Ok(st) if st.success() => {}
            Ok(_) => println!("cargo:warning=wasm-pack build failed"),
            Err(_) => println!("cargo:warning=wasm-pack not installed – skipping"),
        }
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let options = CopyOptions {
            overwrite: true,
            content_only: true,
            ..CopyOptions::new()
        };
        if let Err(e) = copy(static_dir, out_dir, &options) {
            println!("cargo:warning=failed to stage static/ into dist/: {e}");
        }
    }
}
