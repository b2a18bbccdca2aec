use std::env;
use std::fs;
use std::path::Path;

// Copies the workspace config.toml (and the directory seed it may point to)
// next to the built binary, where `load_config` looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=../../directory.json");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");

    // OUT_DIR is target/<profile>/build/backend-xxx/out
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    for file in ["config.toml", "directory.json"] {
        let source = workspace_root.join(file);
        if !source.exists() {
            println!("cargo:warning={} not found at {:?}, using built-in default", file, source);
            continue;
        }
        let dest = target_dir.join(file);
        fs::copy(&source, &dest).unwrap_or_else(|e| panic!("Failed to copy {}: {}", file, e));
    }
}
