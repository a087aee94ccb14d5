//!
//! Shared plumbing for Glacier connectors
//!
//! Provides logging setup and connection configuration used by the
//! Snowflake DDL layer.
#![deny(missing_docs)]

pub use config::{fetch_connections, ConnectionConfig};

pub mod config;
pub mod logging;

#[macro_export]
/// Time the code inside the macro. Write the elapsed time to debug logs.
/// Derived from https://notes.iveselov.info/programming/time_it-a-case-study-in-rust-macros
macro_rules! log_runtime {
    ($context:literal, $($tt:tt)+) => {
        {
            $crate::logging::debug!("{}: starting", $context);
            let timer = std::time::Instant::now();
            let x =
            $(
                $tt
            )+;
            $crate::logging::debug!("{}: {:?}", $context, timer.elapsed());
            x
        }
    }
}
