//! # vhscan core
//!
//! The probing engine of the virtual-host scanner.
//!
//! * **[`scanner`]**: plans the IP × domain × protocol work set and drives it to completion.
//! * **[`gate`]**: the counting permit that bounds in-flight probes.
//! * **[`results`]**: the shared, append-only result collection.
//! * **[`network`]**: the HTTP(S) probe that connects to an IP while claiming another host.

pub mod gate;
pub mod network;
pub mod results;
pub mod scanner;
