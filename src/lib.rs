//! Test-only library interface for hid-mouse.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required): the report layout and
//! descriptor, the descriptor walker, and the input → report mapping.
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod hid;

pub mod input {
    pub mod event;
    pub mod mapping;

    pub use event::InputEvent;
    pub use mapping::{MouseState, Outcome};
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
