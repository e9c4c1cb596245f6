#![forbid(unsafe_code)]

//! WASM exports for the auto-scrolling list widget.
//!
//! [`WidgetSession`] holds everything the JS glue talks to, using plain Rust
//! types so it can be tested natively. The `wasm-bindgen` class in `wasm.rs`
//! only converts arguments and results.

mod session;

pub use session::{SessionOutputs, WidgetSession, duration_from_ms};

#[cfg(target_arch = "wasm32")]
mod wasm;
