//! Platform abstraction layer
//!
//! The simulation is host-agnostic; this layer adapts it to a host:
//! - `web`: wasm-bindgen bindings for a browser renderer (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a fresh race when the host does not supply one
pub fn fresh_seed() -> u64 {
    rand::random()
}
