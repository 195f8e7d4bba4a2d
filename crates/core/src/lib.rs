//! Tomasulo instruction scheduler library.
//!
//! This crate implements a cycle-accurate simulator of dynamic instruction
//! scheduling with the following:
//! 1. **Core:** register scoreboard, rename map, functional-unit pools, and
//!    the issue/execute/write-back pipeline ([`core::scheduler::Scheduler`]).
//! 2. **Config:** construction-time unit counts, latencies, and register/
//!    memory sizing ([`config::Config`]).
//! 3. **Simulation:** a textual instruction-file loader ([`sim::loader`]).
//! 4. **Common:** error types for the loader/CLI boundary.

/// Error types for the loader/CLI boundary.
pub mod common;
/// Scheduler configuration (pool sizes, latencies, register/memory sizing).
pub mod config;
/// The scheduler core: data model, pipeline stages, trace formatting.
pub mod core;
/// Instruction-file loading.
pub mod sim;

/// Root configuration type; use `Config::default()` for reference values.
pub use crate::config::Config;
/// The scheduler; construct with `Scheduler::new` and drive with `run`.
pub use crate::core::scheduler::Scheduler;
/// Errors from loading a program or opening its I/O.
pub use crate::common::error::SchedulerError;
