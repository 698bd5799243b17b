//! E-paper monitor render pipeline.
//!
//! Every panel update goes through one [`RenderService`](service::RenderService):
//! producers (HTTP handlers, button callbacks, app pollers) enqueue jobs
//! without blocking, and a single [`RenderWorker`](tasks::RenderWorker)
//! executes them in order against the panel. Structured content is laid out
//! by the page composition engine in [`render`].
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), using the embassy std time
//! driver and the std critical section, while the device build is `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

extern crate alloc;

// Logging (macros are exported at the crate root)
pub mod log_buffer;

// Configuration
pub mod config;

// Panel access
pub mod drivers;
pub mod framebuffer;
pub mod status;

// Content and layout
pub mod pages;
pub mod render;
pub mod screens;
pub mod widgets;

// Job pipeline
pub mod jobs;
pub mod service;
pub mod tasks;

mod state;
mod ui;

// Re-export at top level for existing imports
pub use state::settings;
pub use ui::{colors, styles};
