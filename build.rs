use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // askama reads templates at compile time; cargo does not track them on its own.
    watch(Path::new("templates"));
    println!("cargo:rerun-if-changed=build.rs");

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "dev".to_string());
    println!(
        "cargo:rustc-env=HOOPNIGHT_BUILD_ID={}-{}",
        env!("CARGO_PKG_VERSION"),
        stamp
    );
}

fn watch(path: &Path) {
    if path.is_dir() {
        println!("cargo:rerun-if-changed={}", path.display());
        for entry in fs::read_dir(path).into_iter().flatten().flatten() {
            watch(&entry.path());
        }
    } else if path.extension().is_some_and(|ext| ext == "html") {
        println!("cargo:rerun-if-changed={}", path.display());
    }
}
