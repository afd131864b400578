// Build script: runs before compilation
// Configures the linker for ESP32-C6 embedded Rust

fn main() {
    // Register the helpful error handler for linker errors
    linker_be_nice();

    // Add linker scripts:

    // 1. defmt.x - defmt logging support
    //    Defines the symbols for defmt's binary log format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // 2. linkall.x - ESP32 memory layout
    //    IMPORTANT: must come last (otherwise problems with flip-link)
    //    Defines the flash/RAM layout and startup code
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Error handler: shows helpful tips on linker errors
// Invoked by the linker as "--error-handling-script"
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    // When invoked by the linker (with error kind and symbol name)
    if args.len() > 1 {
        let kind = &args[1]; // error kind (e.g. "undefined-symbol")
        let what = &args[2]; // symbol name (e.g. "_defmt_...")

        match kind.as_str() {
            // Undefined symbol found
            "undefined-symbol" => match what.as_str() {
                what if what.starts_with("_defmt_") => {
                    eprintln!();
                    eprintln!(
                        "💡 `defmt` not found - make sure `defmt.x` is added as a linker script and you have included `use defmt_rtt as _;`"
                    );
                    eprintln!();
                }
                "_stack_start" => {
                    eprintln!();
                    eprintln!("💡 Is the linker script `linkall.x` missing?");
                    eprintln!();
                }
                what if what.starts_with("esp_rtos_") => {
                    eprintln!();
                    eprintln!(
                        "💡 `esp-rtos` is not initialized. Make sure you have started `esp-rtos` or provided an external scheduler."
                    );
                    eprintln!();
                }
                "embedded_test_linker_file_not_added_to_rustflags" => {
                    eprintln!();
                    eprintln!(
                        "💡 `embedded-test` not found - make sure `embedded-test.x` is added as a linker script for tests"
                    );
                    eprintln!();
                }
                "free"
                | "malloc"
                | "calloc"
                | "get_free_internal_heap_size"
                | "malloc_internal"
                | "realloc_internal"
                | "calloc_internal"
                | "free_internal" => {
                    eprintln!();
                    eprintln!(
                        "💡 Did you forget the `esp-alloc` dependency or didn't enable the `compat` feature on it?"
                    );
                    eprintln!();
                }
                _ => (),
            },
            // we don't have anything helpful for "missing-lib" yet
            _ => {
                std::process::exit(1);
            }
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg=--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
