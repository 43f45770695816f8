use std::env;

fn main() {
    let target = env::var("TARGET").unwrap_or_default();

    // Host builds run the simulator and the unit tests; nothing to link.
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega128
    println!("cargo:rustc-link-arg=-mmcu=atmega128");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:warning=Building sensor monitor for ATmega128 at 16MHz");
}
