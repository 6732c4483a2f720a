//! # vhscan common
//!
//! Shared building blocks for the virtual-host scanner.
//!
//! * **[`network`]**: target parsing and IPv4 range expansion.
//! * **[`models`]**: probe units, outcomes and results.
//! * **[`status`]**: include/exclude status code filtering.
//! * **[`domains`]**: wordlist × domain combination.
//! * **[`config`]**: scan tuning shared by the CLI and the engine.

pub mod config;
pub mod domains;
pub mod error;
pub mod macros;
pub mod models;
pub mod network;
pub mod status;

#[doc(hidden)]
pub use tracing;
