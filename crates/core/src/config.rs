//! Configuration for the scheduler: unit pool sizes, latencies, register and
//! memory sizing.
//!
//! All knobs are construction-time integers. There is no external config
//! file format — [`Config::default`] reproduces the reference constants, and
//! callers who want something else just build a `Config` literal.

/// Baseline constants, reproduced from the reference implementation.
mod defaults {
    /// Number of add/sub functional units.
    pub const ADD_UNITS: usize = 2;
    /// Number of mul/div functional units.
    pub const MUL_UNITS: usize = 2;
    /// Number of load/store functional units.
    pub const SW_UNITS: usize = 2;

    /// Latency, in cycles, of an add/sub unit.
    pub const ADD_LATENCY: u32 = 4;
    /// Latency, in cycles, of a mul/div unit.
    pub const MUL_LATENCY: u32 = 4;
    /// Latency, in cycles, of a load/store unit.
    pub const SW_LATENCY: u32 = 2;

    /// Architectural register count (`F0..F{n-1}`). The rename pool
    /// (`R0..R{n-1}`) is the same size, so the register file holds `2 *
    /// ARCH_REGISTERS` entries in total.
    pub const ARCH_REGISTERS: usize = 16;
    /// Value every register (both halves) is initialized to.
    ///
    /// Not stated by the distilled spec; fixed by
    /// `original_source/main.cpp`'s `createRegisters`.
    pub const REGISTER_INIT: i64 = 1;

    /// Number of entries in the scratch memory array.
    pub const MEMORY_SIZE: usize = 32;
    /// Value every memory entry is initialized to.
    pub const MEMORY_INIT: i64 = 2;
}

/// Construction-time configuration for a [`crate::core::scheduler::Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of add/sub functional units.
    pub add_units: usize,
    /// Number of mul/div functional units.
    pub mul_units: usize,
    /// Number of load/store functional units.
    pub sw_units: usize,
    /// Latency, in cycles, of an add/sub unit.
    pub add_latency: u32,
    /// Latency, in cycles, of a mul/div unit.
    pub mul_latency: u32,
    /// Latency, in cycles, of a load/store unit.
    pub sw_latency: u32,
    /// Architectural register count; the rename pool matches this size.
    pub arch_registers: usize,
    /// Initial value of every register.
    pub register_init: i64,
    /// Number of entries in the scratch memory array.
    pub memory_size: usize,
    /// Initial value of every memory entry.
    pub memory_init: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            add_units: defaults::ADD_UNITS,
            mul_units: defaults::MUL_UNITS,
            sw_units: defaults::SW_UNITS,
            add_latency: defaults::ADD_LATENCY,
            mul_latency: defaults::MUL_LATENCY,
            sw_latency: defaults::SW_LATENCY,
            arch_registers: defaults::ARCH_REGISTERS,
            register_init: defaults::REGISTER_INIT,
            memory_size: defaults::MEMORY_SIZE,
            memory_init: defaults::MEMORY_INIT,
        }
    }
}
