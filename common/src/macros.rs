//! Logging shorthands shared by every crate in the workspace.
//!
//! Events are plain `tracing` events; the CLI formatter picks the prefix
//! symbol from the level, and from the target for [`success!`].

/// Target used to tag events that report a positive outcome.
pub const SUCCESS_TARGET: &str = "vhscan::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::macros::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
