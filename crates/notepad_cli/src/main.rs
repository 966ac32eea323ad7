//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notepad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("notepad_core ping={}", notepad_core::ping());
    println!("notepad_core version={}", notepad_core::core_version());
}
