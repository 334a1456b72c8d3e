// File: crates/dashplot-core/build.rs
// Summary: Links the Windows system libraries Skia's raster and text backends need.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's font manager reads the registry (RegOpenKeyExW, RegQueryInfoKeyW).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
