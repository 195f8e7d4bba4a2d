//! Functional units and the three fixed-category pools.

use crate::core::instruction::InstrId;
use crate::core::opcode::UnitCategory;

/// One execution slot. Holds at most one instruction for its full latency —
/// units are not pipelined.
#[derive(Debug, Clone)]
pub struct FunctionalUnit {
    pub latency: u32,
    pub busy: bool,
    pub current: Option<InstrId>,
}

impl FunctionalUnit {
    fn new(latency: u32) -> Self {
        Self {
            latency,
            busy: false,
            current: None,
        }
    }

    fn occupy(&mut self, instr: InstrId) {
        self.busy = true;
        self.current = Some(instr);
    }

    fn release(&mut self) {
        self.busy = false;
        self.current = None;
    }
}

/// A homogeneous pool of units sharing a category and latency.
#[derive(Debug, Clone)]
pub struct UnitPool {
    pub category: UnitCategory,
    pub units: Vec<FunctionalUnit>,
}

impl UnitPool {
    pub fn new(category: UnitCategory, count: usize, latency: u32) -> Self {
        Self {
            category,
            units: (0..count).map(|_| FunctionalUnit::new(latency)).collect(),
        }
    }

    /// The index of the first free unit, in pool order, if any.
    pub fn find_free(&self) -> Option<usize> {
        self.units.iter().position(|u| !u.busy)
    }

    /// Marks unit `idx` busy with `instr`, reserving it for `unit.latency`
    /// cycles.
    pub fn occupy(&mut self, idx: usize, instr: InstrId) {
        self.units[idx].occupy(instr);
    }

    /// Frees unit `idx`.
    pub fn release(&mut self, idx: usize) {
        self.units[idx].release();
    }
}
