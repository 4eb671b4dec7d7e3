//! Logging infrastructure for structured console and file output.
//!
//! The [`Log`] trait is the reporter boundary the reconciliation core talks
//! to: fire-and-forget message sinks plus per-mapping result recording for
//! the run summary. [`Logger`] is the production implementation, backed by
//! a [`tracing`] subscriber with a console formatter and a persistent file
//! layer (see [`init_subscriber`]).

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, MappingEntry, MappingStatus};
