//! Platform abstraction layer
//!
//! The simulation itself is platform-free. This module holds the thin
//! embedding layers that hand it time and pointer input:
//! - `web`: wasm-bindgen wrapper driven by requestAnimationFrame (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;
