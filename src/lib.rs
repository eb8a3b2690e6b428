//! Stagekit
//!
//! Runtime support layer for small game engines: a task-execution arena with
//! unmanaged, managed and captured operating modes, a scene-frame lifecycle,
//! rectangle geometry and launch-option parsing.
//!
//! # Example
//!
//! ```
//! use stagekit::arena::RuntimeArena;
//! use std::sync::Arc;
//!
//! fn main() -> stagekit::Result<()> {
//!     let arena = RuntimeArena::managed();
//!     arena.push_task(Arc::new(|| println!("hello from the arena")))?;
//!     arena.start()?;
//!     arena.stop()?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/stagekit")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod arena;
pub mod math;
pub mod options;
pub mod scene;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "stagekit";
