//! Build script - adds the ESP32 linker scripts for the firmware binary.
//!
//! Host builds (`cargo test`) do not enable the `embedded` feature and get
//! no extra link arguments.

use std::env;

fn main() {
    if env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        // esp-hal ships `linkall.x`; defmt needs its own section script.
        println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
