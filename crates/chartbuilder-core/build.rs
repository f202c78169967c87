// File: crates/chartbuilder-core/build.rs
// Summary: Build script to link Windows system libraries required by Skia's font manager.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's DirectWrite font manager reads the registry (RegOpenKeyExW & co).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
