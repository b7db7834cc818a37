use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let target = env::var("TARGET").unwrap_or_default();
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    /* Host builds only run the tests, nothing to link */
    if !target.starts_with("thumbv6m") {
        return;
    }

    // Tell the linker where to find memory.x
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let memory_x = fs::read("memory.x").expect("failed to read memory.x");
    fs::write(out_dir.join("memory.x"), memory_x).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-examples=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
    }
}
