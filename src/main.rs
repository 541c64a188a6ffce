#[cfg(not(target_arch = "wasm32"))]
mod commands;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    commands::main();
}

/// The browser entry points live in the library; the binary is a no-op there.
#[cfg(target_arch = "wasm32")]
fn main() {}
